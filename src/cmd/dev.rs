// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `dev` command.
//!
//! ```text
//! create app
//!   -> debug wiring (when --flask-debug): debug, debugtoolbar
//!   -> " * Flask-DebugToolbar: on, Flask-Debug: off"
//!   -> flask --app APP [--debug] run --host H --port P --with-threads
//!          [--reload] [--cert adhoc] [--extra-files a:b]
//!   -> RestartPolicy::supervise (unless --extended-reload 0)
//! ```

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::app::{App, SettingsEnvVar};
use crate::capability::{Availability, CapabilityTable, DEBUG, DEBUG_TOOLBAR};
use crate::cli::dev::DevArgs;
use crate::cli::global::GlobalOptions;
use crate::core::env::container::Env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{ProcessError, Result};
use crate::reload::RestartPolicy;
use crate::server::{ServeTarget, Werkzeug, child_env};

use super::{Session, cancel_on_ctrl_c};

pub const SERVER_NAME: &str = "SERVER_NAME";
pub const DISABLE_STRICT: &str = "FLASK_DEBUG_DISABLE_STRICT";
pub const SECRET_KEY: &str = "SECRET_KEY";

/// Secret key used when a debug session has none.
pub const INSECURE_SECRET_KEY: &str = "devkey";

/// Which debug extensions were enabled, and why anything changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugStatus {
    pub toolbar: Availability,
    pub debug: Availability,
    pub messages: Vec<String>,
}

impl DebugStatus {
    /// The line printed before the server starts.
    #[must_use]
    pub fn status_line(&self) -> String {
        let mut parts = vec![
            format!("Flask-DebugToolbar: {}", self.toolbar.on_off()),
            format!("Flask-Debug: {}", self.debug.on_off()),
        ];
        parts.extend(self.messages.iter().cloned());
        format!(" * {}", parts.join(", "))
    }
}

/// Enables the installed debug extensions on `app`.
///
/// Extensions are only looked at when `flask_debug` is set. The toolbar
/// turns `DEBUG` on, and supplies an insecure secret key, only when `debug`
/// is set too.
pub fn wire_debug(
    app: &mut App,
    capabilities: &CapabilityTable,
    debug: bool,
    flask_debug: bool,
    addr: &str,
) -> DebugStatus {
    let mut status = DebugStatus::default();
    if !flask_debug {
        return status;
    }

    status.debug = capabilities.resolve(DEBUG, app);
    if status.debug.is_available() {
        app.settings_mut().insert(SERVER_NAME, addr);
        app.settings_mut().insert(DISABLE_STRICT, true);
    }

    status.toolbar = capabilities.resolve(DEBUG_TOOLBAR, app);
    if status.toolbar.is_available() && debug {
        app.set_debug(true);
        let has_key = app
            .settings()
            .get(SECRET_KEY)
            .is_some_and(|key| !key.is_null() && key.as_str() != Some(""));
        if !has_key {
            status
                .messages
                .push(format!("{SECRET_KEY} not set, using insecure \"{INSECURE_SECRET_KEY}\""));
            app.settings_mut().insert(SECRET_KEY, INSECURE_SECRET_KEY);
        }
    }

    status
}

/// Options of a development server run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServer<'a> {
    pub target: ServeTarget<'a>,
    pub debug: bool,
    pub ssl: bool,
    /// Files whose change restarts the server.
    pub extra_files: Vec<PathBuf>,
}

impl DevServer<'_> {
    /// The `flask` invocation for this run.
    #[must_use]
    pub fn command(&self, env: Env) -> ProcessBuilder {
        let werkzeug = Werkzeug::new(true);
        let mut args = Werkzeug::app_args(self.target.app);
        if self.debug {
            args.push("--debug".to_string());
        }
        args.extend(werkzeug.run_args(&self.target));
        if self.debug {
            args.push("--reload".to_string());
        }
        if self.ssl {
            args.extend(["--cert".to_string(), "adhoc".to_string()]);
        }
        if !self.extra_files.is_empty() {
            let joined = std::env::join_paths(&self.extra_files)
                .map(|paths| paths.to_string_lossy().into_owned())
                .unwrap_or_else(|_| {
                    self.extra_files
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(":")
                });
            args.extend(["--extra-files".to_string(), joined]);
        }

        ProcessBuilder::new("flask")
            .name("werkzeug")
            .args(args)
            .env(env)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .inherit_stdio()
    }
}

/// Runs `server` once, returning its exit status; an interrupted run counts
/// as a clean exit.
async fn run_once(server: ProcessBuilder, token: CancellationToken) -> Result<i32> {
    let output = server.run_with_cancellation(token).await?;
    if output.is_interrupted() {
        return Ok(0);
    }
    Ok(output.exit_code())
}

/// Main handler for the dev command.
///
/// # Errors
///
/// Returns an error if the application cannot be created, the server cannot
/// be started, or it exits with a failure after all restarts.
pub async fn run_dev_command(args: &DevArgs, global: &GlobalOptions, base: Env) -> Result<()> {
    let session = Session::load(global, base, &args.to_config_overrides())?;
    let mut app = session.create_app(global)?;
    let config = &session.config.dev;

    let app_ref = global
        .app
        .clone()
        .unwrap_or_else(|| app.name().to_string());
    let target = ServeTarget {
        app: &app_ref,
        host: &config.host,
        port: config.port,
        processes: 1,
        reverse_proxied: false,
    };
    let addr = target.addr();

    let status = wire_debug(
        &mut app,
        &CapabilityTable::with_builtins(),
        args.debug_setting(),
        args.flask_debug_setting(),
        &addr,
    );
    println!("{}", status.status_line());

    let template = session.config.app.app_config();
    let mut extra_files: Vec<PathBuf> = global.configfile.iter().cloned().collect();
    extra_files.extend(session.env_file.iter().cloned());
    if let Some(variable) = SettingsEnvVar::Auto.variable(app.name())
        && let Some(path) = session.env.get(&variable)
    {
        extra_files.push(PathBuf::from(path));
    }

    let server = DevServer {
        target,
        debug: args.debug_setting(),
        ssl: args.ssl,
        extra_files,
    };
    let env = child_env(&session.env, app.settings(), &template.prefix_for(&app));
    let builder = server.command(env);
    let token = cancel_on_ctrl_c();

    let exit_code = match RestartPolicy::from_secs(config.extended_reload, config.max_restarts) {
        Some(policy) => {
            policy
                .supervise(&token, || run_once(builder.clone(), token.clone()))
                .await?
        }
        None => run_once(builder, token).await?,
    };

    if exit_code != 0 {
        return Err(ProcessError::NonZeroExit {
            command: "werkzeug".to_string(),
            code: exit_code,
        }
        .into());
    }
    Ok(())
}
