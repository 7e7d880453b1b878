// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --app MODULE           ← Application reference (or $FLASK_APP)
//! --configfile FILE      ← Application settings file
//! --env FILE             ← Dotenv file merged into the snapshot
//! --launcher-config FILE ← Additional launcher config files (can repeat)
//! --log-level N          ← Console verbosity (0-6)
//! --file-log-level       ← File verbosity (overrides --log-level)
//! --set KEY=VAL          ← Direct launcher config override
//!
//! Precedence: command flags > --set > APPCONFIG_* > --launcher-config > appconfig.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Application to load, as `module` or `module:callable`.
    #[arg(short = 'a', long = "app", value_name = "APP", env = "FLASK_APP")]
    pub app: Option<String>,

    /// Application settings file, loaded after the packaged defaults.
    #[arg(short = 'c', long = "configfile", value_name = "FILE")]
    pub configfile: Option<PathBuf>,

    /// Dotenv file read into the environment. Defaults to `.env` when present.
    #[arg(short = 'e', long = "env", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Path to additional launcher configuration file(s).
    /// Can be specified multiple times.
    #[arg(long = "launcher-config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub launcher_configs: Vec<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Sets a launcher option, such as 'serve.port=8000'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// The application name: the module part of `--app`.
    #[must_use]
    pub fn app_name(&self) -> Option<&str> {
        self.app
            .as_deref()
            .map(|app| app.split_once(':').map_or(app, |(module, _)| module))
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
