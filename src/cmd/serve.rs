// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `serve` command.
//!
//! ```text
//! --list: probe every candidate and print one line each
//! else:   create app -> select backend -> check port -> summary -> run
//! ```

use crate::app::App;
use crate::cli::global::GlobalOptions;
use crate::cli::serve::ServeArgs;
use crate::core::env::container::Env;
use crate::error::Result;
use crate::server::{
    BackendRegistry, ServeTarget, check_port, child_env, command, list_backends,
    resolve_processes, run_summary, select,
};

use super::{Session, cancel_on_ctrl_c};

/// Setting exported when running behind a reverse proxy.
pub const REVERSE_PROXIED: &str = "REVERSE_PROXIED";

/// Main handler for the serve command.
///
/// # Errors
///
/// Returns an error if the application cannot be created, no backend is
/// available, the port cannot be bound, or the server exits with a failure.
pub async fn run_serve_command(args: &ServeArgs, global: &GlobalOptions, base: Env) -> Result<()> {
    let session = Session::load(global, base, &args.to_config_overrides())?;
    let registry = BackendRegistry::with_builtins();

    if args.list {
        for line in list_backends(&registry, &session.config.serve.backends).await {
            println!("{line}");
        }
        return Ok(());
    }

    let mut app = session.create_app(global)?;
    serve(&session, global, &registry, &mut app).await
}

async fn serve(
    session: &Session,
    global: &GlobalOptions,
    registry: &BackendRegistry,
    app: &mut App,
) -> Result<()> {
    let config = &session.config.serve;
    if config.reverse_proxied {
        app.settings_mut().insert(REVERSE_PROXIED, true);
    }
    let app = &*app;

    let (backend, info) = select(registry, &config.backends).await?;
    let processes = backend.processes(resolve_processes(config.processes)?);
    let target = ServeTarget {
        app: global.app.as_deref().unwrap_or_else(|| app.name()),
        host: &config.host,
        port: config.port,
        processes,
        reverse_proxied: config.reverse_proxied,
    };

    check_port(target.host, target.port)?;

    let backend_label = format!("{} {}", backend.name(), info.version);
    for line in run_summary(app.name(), processes, &backend_label, &target.addr()) {
        println!("{line}");
    }

    let prefix = session.config.app.app_config().prefix_for(app);
    let env = child_env(&session.env, app.settings(), &prefix);
    let output = command(backend, &target, env)
        .run_with_cancellation(cancel_on_ctrl_c())
        .await?;

    if output.is_interrupted() {
        tracing::info!(backend = backend.name(), "server stopped");
    }
    Ok(())
}
