// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `appconfig` extension.

use std::path::{Path, PathBuf};

use bon::Builder;
use serde_json::json;

use super::{App, env_name};
use crate::core::env::container::Env;
use crate::envvars::{Coercion, Selection, from_envvars};
use crate::error::{AppResult, ConfigError};
use crate::provider::ProviderKind;
use crate::settings::Settings;

/// Name under which the extension registers itself.
pub const EXTENSION_NAME: &str = "appconfig";

/// File name looked up in `<root>/<name>/` for packaged defaults.
pub const DEFAULT_SETTINGS_FILE: &str = "default_settings.toml";

/// Where the lowest-priority settings come from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DefaultSettings {
    /// `<root>/<name>/default_settings.toml`, skipped when absent.
    #[default]
    Auto,
    /// A settings file that must exist.
    File(PathBuf),
    /// Settings supplied in code.
    Object(Settings),
    Disabled,
}

/// The environment variable naming an extra settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SettingsEnvVar {
    /// `<NAME>_SETTINGS`.
    #[default]
    Auto,
    Named(String),
    Disabled,
}

impl SettingsEnvVar {
    /// Resolves the variable name for `app_name`.
    #[must_use]
    pub fn variable(&self, app_name: &str) -> Option<String> {
        match self {
            Self::Auto => Some(format!("{}_SETTINGS", env_name(app_name))),
            Self::Named(name) => Some(name.clone()),
            Self::Disabled => None,
        }
    }
}

/// Loads application settings from files, a hosting provider and the
/// environment.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::builder()
///     .with_provider(ProviderKind::Heroku)
///     .build();
/// config.init_app(&mut app, &env)?;
/// ```
#[derive(Debug, Clone, Builder)]
pub struct AppConfig {
    #[builder(setters(name = with_default_settings), default)]
    default_settings: DefaultSettings,
    #[builder(setters(name = with_configfile), into)]
    configfile: Option<PathBuf>,
    #[builder(setters(name = with_settings_envvar), default)]
    settings_envvar: SettingsEnvVar,
    #[builder(setters(name = with_from_envvars), default = true)]
    from_envvars: bool,
    #[builder(setters(name = with_coercion), default)]
    coercion: Coercion,
    #[builder(setters(name = with_prefix), into)]
    prefix: Option<String>,
    #[builder(setters(name = with_provider))]
    provider: Option<ProviderKind>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppConfig {
    #[must_use]
    pub fn configfile(&self) -> Option<&Path> {
        self.configfile.as_deref()
    }

    /// Replaces the configuration file, e.g. with one given on the command line.
    pub fn set_configfile(&mut self, configfile: Option<PathBuf>) {
        self.configfile = configfile;
    }

    /// Coercion used for the environment import, `None` when disabled.
    #[must_use]
    pub const fn from_envvars(&self) -> Option<Coercion> {
        if self.from_envvars {
            Some(self.coercion)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn provider(&self) -> Option<ProviderKind> {
        self.provider
    }

    /// The environment prefix used for `app`.
    #[must_use]
    pub fn prefix_for(&self, app: &App) -> String {
        self.prefix.clone().unwrap_or_else(|| app.env_prefix())
    }

    /// Loads every configured source into `app` and marks it attached.
    ///
    /// Sources are applied in priority order, later ones overwriting
    /// earlier ones key by key. A failure aborts the sequence; settings
    /// already applied stay in place.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyAttached` when called twice on the same
    /// app, a `ConfigError` when a required settings file is missing or
    /// malformed, and a `ProviderError` when the provider adapter fails.
    pub fn init_app(&self, app: &mut App, env: &Env) -> AppResult<()> {
        if app.has_extension(EXTENSION_NAME) {
            return Err(ConfigError::AlreadyAttached(app.name().to_string()).into());
        }

        self.load_default_settings(app)?;

        if let Some(path) = &self.configfile {
            tracing::debug!(path = %path.display(), "loading configuration file");
            app.settings_mut().update_from_file(path)?;
        }

        if let Some(variable) = self.settings_envvar.variable(app.name())
            && let Some(path) = env.get(&variable)
        {
            tracing::debug!(%variable, path, "loading settings file from environment");
            app.settings_mut().update_from_file(Path::new(path))?;
        }

        if let Some(provider) = self.provider {
            provider.apply(app.settings_mut(), env)?;
        }

        let prefix = self.prefix_for(app);
        if let Some(coercion) = self.from_envvars() {
            let selection = Selection::prefix(prefix.clone());
            let written = from_envvars(app.settings_mut(), env, &selection, coercion);
            tracing::debug!(%prefix, written, "imported environment variables");
        }

        app.register_extension(
            EXTENSION_NAME,
            json!({
                "prefix": prefix,
                "coercion": self.from_envvars().map(|c| c.to_string()),
                "provider": self.provider.map(|p| p.to_string()),
            }),
        );
        tracing::info!(app = app.name(), "configuration loaded");
        Ok(())
    }

    fn load_default_settings(&self, app: &mut App) -> AppResult<()> {
        match &self.default_settings {
            DefaultSettings::Auto => {
                let path = app.root().join(app.name()).join(DEFAULT_SETTINGS_FILE);
                if path.is_file() {
                    app.settings_mut().update_from_file(&path)?;
                } else {
                    tracing::trace!(path = %path.display(), "no packaged default settings");
                }
            }
            DefaultSettings::File(path) => app.settings_mut().update_from_file(path)?,
            DefaultSettings::Object(defaults) => app.settings_mut().update(defaults),
            DefaultSettings::Disabled => {}
        }
        Ok(())
    }
}
