// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Optional features with explicit registration.
//!
//! ```text
//! CapabilityTable
//!   "debug"        -> probe(app) -> Available { version } | Missing
//!   "debugtoolbar" -> probe(app) -> ...
//!
//! INSTALLED_EXTENSIONS = ["debug", "debugtoolbar==0.10"]
//!                     or "debug, debugtoolbar==0.10"
//! ```
//!
//! An unregistered name resolves to `Missing`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::app::App;
use crate::settings::Settings;

#[cfg(test)]
mod tests;

/// Setting listing the extensions an application ships with.
pub const INSTALLED_EXTENSIONS: &str = "INSTALLED_EXTENSIONS";

/// Debug helper extension.
pub const DEBUG: &str = "debug";

/// Debug toolbar extension.
pub const DEBUG_TOOLBAR: &str = "debugtoolbar";

/// Result of probing a capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Availability {
    Available { version: String },
    #[default]
    Missing,
}

impl Availability {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// `on` or `off`, as printed in status lines.
    #[must_use]
    pub const fn on_off(&self) -> &'static str {
        if self.is_available() { "on" } else { "off" }
    }
}

/// Probes whether a capability is present for an application.
pub type Probe = Box<dyn Fn(&App) -> Availability + Send + Sync>;

/// Registry of capabilities by name.
#[derive(Default)]
pub struct CapabilityTable {
    probes: BTreeMap<String, Probe>,
}

impl CapabilityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with the built-in debug extensions registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for name in [DEBUG, DEBUG_TOOLBAR] {
            table.register(name, move |app| installed_extension(app.settings(), name));
        }
        table
    }

    /// Registers `probe` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, probe: F)
    where
        F: Fn(&App) -> Availability + Send + Sync + 'static,
    {
        self.probes.insert(name.into(), Box::new(probe));
    }

    /// Probes `name` for `app`.
    #[must_use]
    pub fn resolve(&self, name: &str, app: &App) -> Availability {
        let availability = self
            .probes
            .get(name)
            .map_or(Availability::Missing, |probe| probe(app));
        tracing::debug!(capability = name, available = availability.is_available(), "probe");
        availability
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.probes.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.probes.keys()).finish()
    }
}

/// Looks `name` up in the `INSTALLED_EXTENSIONS` setting.
///
/// Entries are bare names or `name==version`.
#[must_use]
pub fn installed_extension(settings: &Settings, name: &str) -> Availability {
    installed_extensions(settings)
        .iter()
        .find_map(|entry| {
            let (entry_name, version) = entry
                .split_once("==")
                .map_or((entry.as_str(), "unknown"), |(n, v)| (n.trim(), v.trim()));
            (entry_name == name).then(|| Availability::Available {
                version: version.to_string(),
            })
        })
        .unwrap_or(Availability::Missing)
}

/// Entries of the `INSTALLED_EXTENSIONS` setting, as an array of strings or
/// a comma-separated string.
#[must_use]
pub fn installed_extensions(settings: &Settings) -> Vec<String> {
    match settings.get(INSTALLED_EXTENSIONS) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
