// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Launcher configuration.
//!
//! This configures the launcher itself (where to serve, which backends to
//! try), not the application: application settings live in
//! [`crate::settings::Settings`] and are loaded by [`crate::app::AppConfig`].
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. appconfig.toml (cwd, optional)
//! 3. --launcher-config files
//! 4. APPCONFIG_* env vars
//! 5. --set key=value overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! APPCONFIG_SERVE__PORT=8000             → serve.port = 8000
//! APPCONFIG_DEV__EXTENDED_RELOAD=0       → dev.extended_reload = 0
//! APPCONFIG_APP__PROVIDER=heroku         → app.provider = "heroku"
//! APPCONFIG_DEBUG=1                      → ignored, not a launcher section
//! ```

pub mod loader;


use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::AppConfig;
use crate::envvars::Coercion;
use crate::error::Result;
use crate::provider::ProviderKind;
use crate::server::DEFAULT_BACKENDS;

use loader::ConfigLoader;

/// File picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "appconfig.toml";

/// Prefix of launcher environment variables.
pub const ENV_PREFIX: &str = "APPCONFIG";

/// Top-level tables of [`LauncherConfig`].
pub const SECTIONS: [&str; 3] = ["serve", "dev", "app"];

/// Complete launcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    pub serve: ServeConfig,
    pub dev: DevConfig,
    pub app: AppSection,
}

/// `[serve]`: production server defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    /// `0` means one per CPU.
    pub processes: usize,
    /// Comma-separated, priority-ordered backend names.
    pub backends: String,
    pub reverse_proxied: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            processes: 0,
            backends: DEFAULT_BACKENDS.to_string(),
            reverse_proxied: false,
        }
    }
}

/// `[dev]`: development server defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevConfig {
    pub host: String,
    pub port: u16,
    /// Seconds before restarting a crashed app, `0` disables restarts.
    pub extended_reload: f64,
    pub max_restarts: u32,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5000,
            extended_reload: 2.0,
            max_restarts: 10,
        }
    }
}

/// `[app]`: how the default factory attaches configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSection {
    pub provider: Option<ProviderKind>,
    pub coercion: Coercion,
    /// Overrides the `<NAME>_` prefix.
    pub prefix: Option<String>,
}

impl AppSection {
    /// Template used by the default application factory.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig::builder()
            .with_coercion(self.coercion)
            .maybe_with_prefix(self.prefix.clone())
            .maybe_with_provider(self.provider)
            .build()
    }
}

impl LauncherConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `LauncherConfig` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `LauncherConfig` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }
}
