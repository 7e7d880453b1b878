// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI arguments for the `db` command.
//!
//! ```text
//! appconfig db reset             drop and recreate, SQL echo on
//! appconfig db --no-echo reset   same, quietly
//! ```

use clap::{ArgAction, Args, Subcommand};

/// Arguments for the `db` command.
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    /// Logs SQL statements (default).
    #[arg(long = "echo", action = ArgAction::SetTrue, conflicts_with = "no_echo")]
    pub echo: bool,

    /// Does not log SQL statements.
    #[arg(long = "no-echo", action = ArgAction::SetTrue, conflicts_with = "echo")]
    pub no_echo: bool,

    #[command(subcommand)]
    pub operation: DbOperation,
}

/// Database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum DbOperation {
    /// Drops and recreates the database.
    Reset,
}

impl DbArgs {
    /// Returns the effective echo setting.
    #[must_use]
    pub const fn echo_setting(&self) -> bool {
        !self.no_echo
    }
}
