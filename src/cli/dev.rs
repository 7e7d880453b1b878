// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Development server arguments.
//!
//! ```text
//! -d/--debug, -D/--no-debug           debug wiring (default on)
//! --flask-debug/--no-flask-debug      framework debug mode (default: same as debug)
//! -R/--extended-reload SECS           restart delay after a crash, 0 disables
//! ```

use clap::ArgAction;
use clap::Args;

/// Arguments for the `dev` command.
#[derive(Debug, Clone, Default, Args)]
pub struct DevArgs {
    /// Enables debug extensions and the framework debugger.
    #[arg(short = 'd', long = "debug", action = ArgAction::SetTrue, conflicts_with = "no_debug")]
    pub debug: bool,

    /// Disables debug extensions and the framework debugger.
    #[arg(short = 'D', long = "no-debug", action = ArgAction::SetTrue, conflicts_with = "debug")]
    pub no_debug: bool,

    /// Hostname to bind to.
    #[arg(short = 'H', long = "hostname", value_name = "HOST")]
    pub hostname: Option<String>,

    /// Port to listen on.
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Serves over TLS with an ad-hoc certificate.
    #[arg(short = 'S', long = "ssl", action = ArgAction::SetTrue)]
    pub ssl: bool,

    /// Sets the framework's own debug mode.
    #[arg(long = "flask-debug", action = ArgAction::SetTrue, conflicts_with = "no_flask_debug")]
    pub flask_debug: bool,

    /// Clears the framework's own debug mode.
    #[arg(long = "no-flask-debug", action = ArgAction::SetTrue, conflicts_with = "flask_debug")]
    pub no_flask_debug: bool,

    /// Seconds to wait before restarting a crashed app, 0 disables restarts.
    #[arg(short = 'R', long = "extended-reload", value_name = "SECS")]
    pub extended_reload: Option<f64>,
}

impl DevArgs {
    /// Returns the effective debug setting.
    #[must_use]
    pub const fn debug_setting(&self) -> bool {
        !self.no_debug
    }

    /// Returns the effective framework debug setting, following `--debug`
    /// unless given.
    #[must_use]
    pub const fn flask_debug_setting(&self) -> bool {
        if self.flask_debug {
            true
        } else if self.no_flask_debug {
            false
        } else {
            self.debug_setting()
        }
    }

    /// Converts the given flags to launcher configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref host) = self.hostname {
            overrides.push(format!("dev.host={host}"));
        }
        if let Some(port) = self.port {
            overrides.push(format!("dev.port={port}"));
        }
        if let Some(secs) = self.extended_reload {
            overrides.push(format!("dev.extended_reload={secs}"));
        }
        overrides
    }
}
