// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application settings mapping.
//!
//! ```text
//! Settings: BTreeMap<String, serde_json::Value>
//!   update_from_file(.toml | .json)   merge top-level table key by key
//!   format_options()                  "KEY = value", secrets -> [hidden]
//!   to_env(prefix)                    PREFIX_KEY=value for child processes
//! ```
//!
//! Keys are conventionally upper-case. Nothing here ever replaces the whole
//! mapping: every source writes into it one key at a time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

#[cfg(test)]
mod tests;

/// Key fragments that mark a setting as secret in [`Settings::format_options`].
const SECRET_MARKERS: &[&str] = &["PASSWORD", "SECRET", "API_KEY", "TOKEN", "DSN"];

/// Key/value configuration store of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, Value>,
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, overwriting an existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value of `key` if it is a JSON string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns the value of `key`, or `Value::Null` when unset.
    #[must_use]
    pub fn get_or_null(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Interprets `key` as a flag: JSON booleans, numbers and the usual
    /// string spellings (`1`, `true`, `yes`, `on`).
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
            Value::String(s) => Some(matches!(
                s.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )),
            Value::Null => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copies every key of `other` into this mapping.
    pub fn update(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Loads a settings file and merges its top-level keys.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML. Nested
    /// tables stay nested: `[MAIL]` becomes one `MAIL` key holding an object.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read, does not parse, or
    /// its top level is not a table.
    pub fn update_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(display.clone())
            } else {
                ConfigError::ReadError {
                    path: display.clone(),
                    source,
                }
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        }
        .map_err(|message| ConfigError::ParseError {
            path: display.clone(),
            message,
        })?;

        tracing::debug!(path = %path.display(), keys = parsed.len(), "loaded settings file");
        self.update(&parsed);
        Ok(())
    }

    /// Parses a TOML document into settings.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the content is not valid TOML.
    pub fn parse_toml(content: &str) -> Result<Self, String> {
        let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
        let values = table
            .into_iter()
            .map(|(k, v)| serde_json::to_value(v).map(|v| (k, v)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map_err(|e| e.to_string())?;
        Ok(Self { values })
    }

    /// Parses a JSON object into settings.
    ///
    /// # Errors
    ///
    /// Returns the parser message if the content is not a JSON object.
    pub fn parse_json(content: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(content).map_err(|e| e.to_string())? {
            Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
            }),
            other => Err(format!("expected a top-level object, got {}", type_name(&other))),
        }
    }

    /// Formats settings for display as aligned `KEY = value` lines.
    ///
    /// Values whose key looks like a credential are shown as `[hidden]`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let max_key_len = self.values.keys().map(String::len).max().unwrap_or(0);

        self.values
            .iter()
            .map(|(key, value)| {
                let shown = if is_secret(key) && !value.is_null() {
                    "[hidden]".to_string()
                } else {
                    value.to_string()
                };
                format!("{key:<max_key_len$} = {shown}")
            })
            .collect()
    }

    /// Renders the settings as environment variables under `prefix`.
    ///
    /// Strings are exported verbatim and everything else as JSON, so that a
    /// prefix merge with JSON coercion on the other side restores the values.
    /// Null values are left out.
    #[must_use]
    pub fn to_env(&self, prefix: &str) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (format!("{prefix}{key}"), rendered)
            })
            .collect()
    }
}

impl FromIterator<(String, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn is_secret(key: &str) -> bool {
    let upper = key.to_ascii_uppercase();
    SECRET_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Human-readable JSON type name for error messages.
pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
