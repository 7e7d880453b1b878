// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for appconfig-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! appconfig [global options] <command>
//! dev       (default when no command is given)
//! serve
//! db reset
//! options
//! ```

pub mod db;
pub mod dev;
pub mod global;
pub mod serve;


use crate::cli::db::DbArgs;
use crate::cli::dev::DevArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::serve::ServeArgs;
use clap::{Parser, Subcommand};

/// Application configuration loader and launcher.
#[derive(Debug, Parser)]
#[command(
    name = "appconfig",
    author,
    version,
    about = "Application configuration loader and launcher",
    long_about = "appconfig-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Loads application settings from files, the hosting platform\n\
                  and the environment, then runs the application with a\n\
                  development or production server. See\n\
                  `appconfig <command> --help` for more information about a command.",
    after_help = "APPLICATION SETTINGS:\n\n\
                  Settings are read from <app>/default_settings.toml, the file\n\
                  given with --configfile, the file named by <APP>_SETTINGS and\n\
                  finally every <APP>_* environment variable, later sources\n\
                  overriding earlier ones. Values of environment variables are\n\
                  parsed as JSON when possible."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the development server.
    Dev(DevArgs),

    /// Runs the application with a production server.
    Serve(ServeArgs),

    /// Manages the application database.
    Db(DbArgs),

    /// Lists the application's settings and their values.
    Options,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
