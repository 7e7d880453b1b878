// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `options` command.

use crate::app::App;
use crate::cli::global::GlobalOptions;
use crate::core::env::container::Env;
use crate::error::Result;

use super::Session;

/// Lines printed by `options`: every setting, secrets hidden.
#[must_use]
pub fn options_lines(app: &App) -> Vec<String> {
    let lines = app.settings().format_options();
    if lines.is_empty() {
        vec![format!("No settings loaded for {}", app.name())]
    } else {
        lines
    }
}

/// Display the application's merged settings.
///
/// # Errors
///
/// Returns an error if the application cannot be created.
pub fn run_options_command(global: &GlobalOptions, base: Env) -> Result<()> {
    let session = Session::load(global, base, &[])?;
    let app = session.create_app(global)?;
    for line in options_lines(&app) {
        println!("{line}");
    }
    Ok(())
}
