// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Importing environment variables into settings.
//!
//! # Selection
//!
//! ```text
//! Selection::Prefix("TESTAPP_")   TESTAPP_DEBUG=true  -> DEBUG = true
//! Selection::Names(map)           DATABASE_URL=...    -> SQLALCHEMY_DATABASE_URI = "..."
//! Selection::Names(identity)      SENTRY_DSN=...      -> SENTRY_DSN = "..."
//! ```
//!
//! # Coercion
//!
//! ```text
//! Json:   "42" -> 42, "true" -> true, '{"a":1}' -> {"a":1}, "hello world" -> "hello world"
//!         "12345678901234567890123" -> "12345678901234567890123" (too wide for i64/u64)
//! Plain:  always the raw string
//! ```
//!
//! A merge is a single pass over the snapshot: it only writes keys for
//! variables that are present and never removes anything.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::env::container::Env;
use crate::error::ConfigError;
use crate::settings::Settings;


/// How raw variable values become settings values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Parse as JSON, falling back to the raw string.
    #[default]
    Json,
    /// Use the raw string.
    Plain,
}

impl Coercion {
    /// Converts a raw environment value.
    #[must_use]
    pub fn apply(self, raw: &str) -> Value {
        match self {
            Self::Json => match serde_json::from_str(raw) {
                // An integer too wide for i64/u64 would decode lossily as a float.
                Ok(Value::Number(n)) if n.is_f64() && is_integer_literal(raw) => {
                    Value::String(raw.to_string())
                }
                Ok(value) => value,
                Err(_) => Value::String(raw.to_string()),
            },
            Self::Plain => Value::String(raw.to_string()),
        }
    }
}

fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.trim();
    let digits = digits.strip_prefix('-').unwrap_or(digits);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl std::fmt::Display for Coercion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

impl std::str::FromStr for Coercion {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "plain" | "string" | "str" => Ok(Self::Plain),
            _ => Err(ConfigError::InvalidValue {
                key: "coercion".to_string(),
                message: format!("expected 'json' or 'plain', got '{s}'"),
            }),
        }
    }
}

/// Ordered mapping from environment variable name to settings key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMap {
    entries: Vec<(String, String)>,
}

impl NameMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Maps every name to itself.
    pub fn identity<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for name in names {
            let name = name.into();
            map.insert(name.clone(), name);
        }
        map
    }

    /// Maps `source` to `destination`.
    ///
    /// Re-inserting a source name replaces its destination but keeps its
    /// position.
    pub fn insert(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        let source = source.into();
        let destination = destination.into();
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == source) {
            entry.1 = destination;
        } else {
            self.entries.push((source, destination));
        }
    }

    #[must_use]
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, d)| d.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, D: Into<String>> FromIterator<(S, D)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (source, destination) in iter {
            map.insert(source, destination);
        }
        map
    }
}

/// Which environment variables a merge imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every variable starting with the prefix, stripped on import.
    Prefix(String),
    /// Exactly the listed variables, renamed as mapped.
    Names(NameMap),
}

impl Selection {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Builds a selection from optional parts, one of which must be given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoSelection` when both are `None` and
    /// `ConfigError::AmbiguousSelection` when both are given.
    pub fn from_parts(
        prefix: Option<&str>,
        names: Option<NameMap>,
    ) -> Result<Self, ConfigError> {
        match (prefix, names) {
            (Some(prefix), None) => Ok(Self::prefix(prefix)),
            (None, Some(names)) => Ok(Self::Names(names)),
            (None, None) => Err(ConfigError::NoSelection),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousSelection),
        }
    }

    /// Resolves the selection against `env` into (variable, key) pairs.
    fn resolve<'a>(&'a self, env: &'a Env) -> Vec<(&'a str, &'a str)> {
        match self {
            Self::Prefix(prefix) => env
                .with_prefix(prefix)
                .map(|(name, _)| (name, &name[prefix.len()..]))
                .collect(),
            Self::Names(names) => names.iter().filter(|(name, _)| env.contains(name)).collect(),
        }
    }
}

/// Imports the selected environment variables into `settings`.
///
/// Returns the number of settings written.
pub fn from_envvars(
    settings: &mut Settings,
    env: &Env,
    selection: &Selection,
    coercion: Coercion,
) -> usize {
    let mut written = 0;

    for (name, key) in selection.resolve(env) {
        if key.is_empty() {
            tracing::debug!(variable = name, "skipping variable that equals the prefix");
            continue;
        }
        let Some(raw) = env.get(name) else {
            continue;
        };
        tracing::trace!(variable = name, key, %coercion, "import");
        settings.insert(key, coercion.apply(raw));
        written += 1;
    }

    written
}

/// Untyped entry point: exactly one of `prefix` and `names` must be given.
///
/// # Errors
///
/// Returns a `ConfigError` when the selection is missing or ambiguous.
pub fn merge(
    settings: &mut Settings,
    env: &Env,
    prefix: Option<&str>,
    names: Option<NameMap>,
    coercion: Coercion,
) -> Result<usize, ConfigError> {
    let selection = Selection::from_parts(prefix, names)?;
    Ok(from_envvars(settings, env, &selection, coercion))
}
