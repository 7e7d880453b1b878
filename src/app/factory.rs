// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application factories by name.
//!
//! ```text
//! create("shop", configfile, env)
//!   registered "shop"  --> custom factory
//!   anything else      --> App::new("shop") + AppConfig template
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::{App, AppConfig};
use crate::core::env::container::Env;
use crate::error::Result;

/// Builds an application from its name, an optional configuration file and
/// the environment snapshot.
pub type AppFactory = Arc<dyn Fn(&str, Option<&Path>, &Env) -> Result<App> + Send + Sync>;

/// Registry for looking up application factories by name.
pub struct FactoryRegistry {
    /// Registered factories.
    factories: BTreeMap<String, AppFactory>,

    /// Configuration attached by the fallback factory.
    template: AppConfig,
}

impl FactoryRegistry {
    /// Creates a registry whose fallback attaches `template` to a new app.
    #[must_use]
    pub const fn new(template: AppConfig) -> Self {
        Self {
            factories: BTreeMap::new(),
            template,
        }
    }

    /// Registers a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str, Option<&Path>, &Env) -> Result<App> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn template(&self) -> &AppConfig {
        &self.template
    }

    /// Creates the application called `name`.
    ///
    /// # Errors
    ///
    /// Returns the factory's error, for the fallback any error raised while
    /// loading configuration.
    pub fn create(&self, name: &str, configfile: Option<&Path>, env: &Env) -> Result<App> {
        if let Some(factory) = self.factories.get(name) {
            tracing::debug!(app = name, "using registered factory");
            return factory(name, configfile, env);
        }
        self.create_default(name, configfile, env)
    }

    fn create_default(&self, name: &str, configfile: Option<&Path>, env: &Env) -> Result<App> {
        let mut config = self.template.clone();
        if let Some(path) = configfile {
            config.set_configfile(Some(path.to_path_buf()));
        }

        let mut app = App::new(name);
        config.init_app(&mut app, env)?;
        Ok(app)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
