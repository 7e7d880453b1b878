// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! process env + .env file --> Env snapshot
//!                               |
//!     appconfig.toml, --launcher-config, APPCONFIG_*, --set, flags
//!                               v
//!                        LauncherConfig
//!                               |
//!              FactoryRegistry::create(--app, --configfile)
//!                               v
//!                              App --> dev / serve / db / options
//! ```

pub mod db;
pub mod dev;
pub mod options;
pub mod serve;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use crate::app::{App, FactoryRegistry};
use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{DEFAULT_CONFIG_FILE, LauncherConfig};
use crate::core::env::container::Env;
use crate::core::env::dotenv::load_env_file;
use crate::error::{AppError, ConfigError, Result, ServeError, other};

/// Process exit code when binding a privileged port is not permitted.
pub const EXIT_PERMISSION_DENIED: u8 = 13;

/// Process exit code for any other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Dotenv file picked up from the working directory when present.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Reported when no application was named.
pub const MISSING_APP_MESSAGE: &str = "No --app parameter and FLASK_APP is not set.";

/// Everything a command needs before it touches the application.
#[derive(Debug, Clone)]
pub struct Session {
    /// Process environment with the dotenv file applied.
    pub env: Env,
    /// The dotenv file that was read, if any.
    pub env_file: Option<PathBuf>,
    pub config: LauncherConfig,
}

impl Session {
    /// Reads the dotenv file and the launcher configuration.
    ///
    /// `overrides` are `key=value` launcher options derived from command flags;
    /// they take precedence over `--set`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file is missing or any source is
    /// malformed.
    pub fn load(global: &GlobalOptions, base: Env, overrides: &[String]) -> Result<Self> {
        let (env, env_file) = load_env(global.env_file.as_deref(), base)?;
        let config = load_launcher_config(global, &env, overrides)?;
        Ok(Self {
            env,
            env_file,
            config,
        })
    }

    /// Creates the application named by `--app`.
    ///
    /// # Errors
    ///
    /// Returns an error if no application is named or loading its
    /// configuration fails.
    pub fn create_app(&self, global: &GlobalOptions) -> Result<App> {
        let name = app_name(global)?;
        let factories = FactoryRegistry::new(self.config.app.app_config());
        factories.create(name, global.configfile.as_deref(), &self.env)
    }
}

/// The application name given with `--app` or `FLASK_APP`.
///
/// # Errors
///
/// Returns an error when neither is set.
pub fn app_name(global: &GlobalOptions) -> Result<&str> {
    global
        .app_name()
        .ok_or_else(|| other(MISSING_APP_MESSAGE).into())
}

/// Overlays the dotenv file onto `base`.
///
/// Without an explicit path, `.env` in the working directory is used when it
/// exists.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` when an explicit file does not exist, or
/// the read error of the file.
pub fn load_env(env_file: Option<&Path>, mut base: Env) -> Result<(Env, Option<PathBuf>)> {
    let path = match env_file {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_ENV_FILE)).filter(|path| path.is_file()),
    };

    if let Some(path) = &path {
        let vars = load_env_file(path)?;
        tracing::debug!(path = %path.display(), count = vars.len(), "loaded env file");
        base.overlay(vars);
    }
    Ok((base, path))
}

/// Loads the launcher configuration in priority order.
///
/// # Errors
///
/// Returns an error if a `--launcher-config` file is missing, a source is
/// malformed or a `--set` value is not `key=value`.
pub fn load_launcher_config(
    global: &GlobalOptions,
    env: &Env,
    overrides: &[String],
) -> Result<LauncherConfig> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.launcher_configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env(env);
    for assignment in global.options.iter().chain(overrides) {
        loader = loader.set_assignment(assignment)?;
    }

    for line in loader.format_loaded_files() {
        tracing::debug!(file = %line, "launcher config");
    }
    loader.build()
}

/// A token cancelled on Ctrl+C.
#[must_use]
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping server...");
            cancel_token.cancel();
        }
    });
    token
}

/// Maps a command failure to the process exit code.
///
/// A `ServeError` is found whether it was returned directly or wrapped in
/// `AppError::Serve`.
#[must_use]
pub fn exit_code(error: &anyhow::Error) -> u8 {
    let serve_error = error.downcast_ref::<ServeError>().or_else(|| {
        error.downcast_ref::<AppError>().and_then(|e| match e {
            AppError::Serve(inner) => Some(&**inner),
            _ => None,
        })
    });

    match serve_error {
        Some(ServeError::PrivilegedPort { .. }) => EXIT_PERMISSION_DENIED,
        _ => EXIT_FAILURE,
    }
}
