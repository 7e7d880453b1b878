// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Production server arguments.
//!
//! ```text
//! appconfig serve -b waitress,werkzeug -p 8000
//! appconfig serve --list
//! ```

use clap::ArgAction;
use clap::Args;

/// Arguments for the `serve` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Hostname to bind to.
    #[arg(short = 'H', long = "hostname", value_name = "HOST")]
    pub hostname: Option<String>,

    /// Port to listen on.
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Number of worker processes, 0 for one per CPU.
    #[arg(short = 'w', long = "processes", value_name = "N")]
    pub processes: Option<usize>,

    /// Comma-separated list of backends to try, in order.
    #[arg(short = 'b', long = "backends", value_name = "LIST")]
    pub backends: Option<String>,

    /// Lists the candidate backends and their availability.
    #[arg(short = 'l', long = "list", action = ArgAction::SetTrue)]
    pub list: bool,

    /// Trusts X-Forwarded-* headers from a reverse proxy.
    #[arg(long = "reverse-proxied", action = ArgAction::SetTrue)]
    pub reverse_proxied: bool,
}

impl ServeArgs {
    /// Converts the given flags to launcher configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if let Some(ref host) = self.hostname {
            overrides.push(format!("serve.host={host}"));
        }
        if let Some(port) = self.port {
            overrides.push(format!("serve.port={port}"));
        }
        if let Some(processes) = self.processes {
            overrides.push(format!("serve.processes={processes}"));
        }
        if let Some(ref backends) = self.backends {
            overrides.push(format!("serve.backends={backends}"));
        }
        if self.reverse_proxied {
            overrides.push("serve.reverse_proxied=true".to_string());
        }
        overrides
    }
}
