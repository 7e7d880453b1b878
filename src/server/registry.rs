// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Backend registry for resolving candidate lists.
//!
//! ```text
//! input "waitress, nginx,,werkzeug"
//!   parse_candidates: ["waitress", "nginx", "werkzeug"]
//!   resolve:          [Known(waitress), Unknown("nginx"), Known(werkzeug)]
//! ```

use std::collections::BTreeMap;

use super::ServerBackend;
use super::backends::{Gunicorn, Uwsgi, Waitress, Werkzeug};

/// A name from a candidate list, looked up in the registry.
pub enum Candidate<'r> {
    Known(&'r dyn ServerBackend),
    Unknown(String),
}

impl std::fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(backend) => f.debug_tuple("Known").field(&backend.name()).finish(),
            Self::Unknown(name) => f.debug_tuple("Unknown").field(name).finish(),
        }
    }
}

/// Registry for looking up server backends by name.
#[derive(Default)]
pub struct BackendRegistry {
    backends: BTreeMap<&'static str, Box<dyn ServerBackend>>,
}

impl BackendRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in backend.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Gunicorn);
        registry.register(Uwsgi);
        registry.register(Waitress);
        registry.register(Werkzeug::new(true));
        registry.register(Werkzeug::new(false));
        registry
    }

    /// Registers a backend under its name, replacing any previous one.
    pub fn register(&mut self, backend: impl ServerBackend + 'static) {
        self.backends.insert(backend.name(), Box::new(backend));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ServerBackend> {
        self.backends.get(name).map(|backend| &**backend)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.keys().copied()
    }

    /// Resolves a comma-separated candidate list, keeping its order.
    #[must_use]
    pub fn resolve(&self, list: &str) -> Vec<Candidate<'_>> {
        parse_candidates(list)
            .into_iter()
            .map(|name| match self.get(&name) {
                Some(backend) => Candidate::Known(backend),
                None => Candidate::Unknown(name),
            })
            .collect()
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.backends.keys()).finish()
    }
}

/// Splits a comma-separated candidate list, dropping blanks.
#[must_use]
pub fn parse_candidates(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
