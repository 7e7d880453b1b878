// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Built-in server backends.
//!
//! ```text
//! gunicorn           gunicorn --bind H:P --workers N APP
//! uwsgi              uwsgi --http H:P --processes N --module APP
//! waitress           waitress-serve --listen=H:P --threads=N APP
//! werkzeug-threaded  flask --app APP run --host H --port P --with-threads
//! werkzeug           flask --app APP run --host H --port P --without-threads
//! ```

use super::{ServeTarget, ServerBackend};

/// Pre-fork worker server.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gunicorn;

impl ServerBackend for Gunicorn {
    fn name(&self) -> &'static str {
        "gunicorn"
    }

    fn executable(&self) -> &'static str {
        "gunicorn"
    }

    fn command_args(&self, target: &ServeTarget<'_>) -> Vec<String> {
        let mut args = vec![
            "--bind".to_string(),
            target.addr(),
            "--workers".to_string(),
            target.processes.to_string(),
        ];
        if target.reverse_proxied {
            args.push("--forwarded-allow-ips=*".to_string());
        }
        args.push(target.app.to_string());
        args
    }
}

/// uWSGI in HTTP mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uwsgi;

impl ServerBackend for Uwsgi {
    fn name(&self) -> &'static str {
        "uwsgi"
    }

    fn executable(&self) -> &'static str {
        "uwsgi"
    }

    fn command_args(&self, target: &ServeTarget<'_>) -> Vec<String> {
        vec![
            "--http".to_string(),
            target.addr(),
            "--processes".to_string(),
            target.processes.to_string(),
            "--module".to_string(),
            target.app.to_string(),
        ]
    }
}

/// Pure-Python multi-threaded server.
#[derive(Debug, Clone, Copy, Default)]
pub struct Waitress;

impl ServerBackend for Waitress {
    fn name(&self) -> &'static str {
        "waitress"
    }

    fn executable(&self) -> &'static str {
        "waitress-serve"
    }

    fn command_args(&self, target: &ServeTarget<'_>) -> Vec<String> {
        let mut args = vec![
            format!("--listen={}", target.addr()),
            format!("--threads={}", target.processes),
        ];
        if target.reverse_proxied {
            args.push("--trusted-proxy=*".to_string());
            args.push("--trusted-proxy-headers=x-forwarded-for x-forwarded-proto".to_string());
        }
        args.push(target.app.to_string());
        args
    }
}

/// The framework's own development server.
#[derive(Debug, Clone, Copy, Default)]
pub struct Werkzeug {
    threaded: bool,
}

impl Werkzeug {
    #[must_use]
    pub const fn new(threaded: bool) -> Self {
        Self { threaded }
    }

    /// Arguments selecting the app, placed before the `run` subcommand.
    #[must_use]
    pub fn app_args(app: &str) -> Vec<String> {
        vec!["--app".to_string(), app.to_string()]
    }

    /// Arguments of the `run` subcommand.
    #[must_use]
    pub fn run_args(&self, target: &ServeTarget<'_>) -> Vec<String> {
        vec![
            "run".to_string(),
            "--host".to_string(),
            target.host.to_string(),
            "--port".to_string(),
            target.port.to_string(),
            if self.threaded {
                "--with-threads"
            } else {
                "--without-threads"
            }
            .to_string(),
        ]
    }
}

impl ServerBackend for Werkzeug {
    fn name(&self) -> &'static str {
        if self.threaded {
            "werkzeug-threaded"
        } else {
            "werkzeug"
        }
    }

    fn executable(&self) -> &'static str {
        "flask"
    }

    fn processes(&self, _requested: usize) -> usize {
        1
    }

    /// `flask --version` lists Python and Flask before Werkzeug.
    fn version_line<'o>(&self, output: &'o str) -> Option<&'o str> {
        output
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("Werkzeug"))
    }

    fn command_args(&self, target: &ServeTarget<'_>) -> Vec<String> {
        let mut args = Self::app_args(target.app);
        args.extend(self.run_args(target));
        args
    }
}
