// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Applications and the configuration extension.
//!
//! ```text
//!  FactoryRegistry --create(name)--> App { name, root, settings, extensions }
//!                                      ^
//!                                      | AppConfig::init_app(&mut app, &env)
//!                                      |
//!   default_settings -> configfile -> <NAME>_SETTINGS file
//!     -> provider (docker | heroku) -> <NAME>_* variables
//!     -> extensions["appconfig"]
//! ```

pub mod config;
pub mod factory;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::settings::Settings;

pub use config::{AppConfig, DefaultSettings, SettingsEnvVar};
pub use factory::{AppFactory, FactoryRegistry};

/// An application: a name, its settings and the extensions attached to it.
#[derive(Debug, Clone)]
pub struct App {
    name: String,
    root: PathBuf,
    settings: Settings,
    extensions: BTreeMap<String, Value>,
}

impl App {
    /// Creates an application rooted at the current directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: PathBuf::from("."),
            settings: Settings::new(),
            extensions: BTreeMap::new(),
        }
    }

    /// Sets the directory relative to which packaged defaults are found.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub const fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// The `DEBUG` setting.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.settings.get_bool("DEBUG").unwrap_or(false)
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.settings.insert("DEBUG", debug);
    }

    /// Records an attached extension with a description of its options.
    pub fn register_extension(&mut self, name: impl Into<String>, info: Value) {
        self.extensions.insert(name.into(), info);
    }

    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    #[must_use]
    pub const fn extensions(&self) -> &BTreeMap<String, Value> {
        &self.extensions
    }

    /// Default environment prefix for this application: `myapp` -> `MYAPP_`.
    #[must_use]
    pub fn env_prefix(&self) -> String {
        format!("{}_", env_name(&self.name))
    }
}

/// Upper-cases `name` and maps characters that cannot appear in an
/// environment variable name to `_`.
#[must_use]
pub fn env_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
