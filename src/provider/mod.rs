// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hosting platform adapters.
//!
//! ```text
//!                 Provider
//!                    |
//!          +---------+---------+
//!          v                   v
//!       Docker              Heroku
//!   PG_PORT=tcp://...    DATABASE_URL, REDISTOGO_URL,
//!   REDIS_PORT=tcp://... MAILGUN_*, SENDGRID_*, ...
//!          |                   |
//!          +---------+---------+
//!                    v
//!       Settings (framework-standard keys)
//! ```
//!
//! Adapters read the injected [`Env`] and write well-known keys such as
//! `SQLALCHEMY_DATABASE_URI` into the settings. They never touch the process
//! environment.

pub mod docker;
pub mod heroku;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::core::env::container::Env;
use crate::error::{ConfigError, ProviderError};
use crate::settings::{Settings, type_name};

pub use docker::Docker;
pub use heroku::Heroku;

/// A platform convention translated into settings.
pub trait Provider {
    /// Short name used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Writes the platform's variables into `settings`.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if a service URL is malformed or uses an
    /// unexpected scheme.
    fn apply(&self, settings: &mut Settings, env: &Env) -> Result<(), ProviderError>;
}

/// Selectable provider adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Docker,
    Heroku,
}

impl ProviderKind {
    /// Returns the adapter for this kind.
    #[must_use]
    pub fn adapter(self) -> Box<dyn Provider> {
        match self {
            Self::Docker => Box::new(Docker),
            Self::Heroku => Box::new(Heroku),
        }
    }

    /// Shorthand for `self.adapter().apply(settings, env)`.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's `ProviderError`.
    pub fn apply(self, settings: &mut Settings, env: &Env) -> Result<(), ProviderError> {
        let adapter = self.adapter();
        tracing::debug!(provider = adapter.name(), "applying provider");
        adapter.apply(settings, env)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Docker => write!(f, "docker"),
            Self::Heroku => write!(f, "heroku"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "heroku" => Ok(Self::Heroku),
            _ => Err(ConfigError::InvalidValue {
                key: "provider".to_string(),
                message: format!("expected 'docker' or 'heroku', got '{s}'"),
            }),
        }
    }
}

// --- URL helpers shared by the adapters ---

/// Parses `raw` as a URL, attributing failures to `key`.
pub(crate) fn parse_url(key: &str, raw: &str) -> Result<Url, ProviderError> {
    Url::parse(raw).map_err(|e| ProviderError::InvalidUrl {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Reads a setting that must hold a URL string.
pub(crate) fn setting_url(settings: &Settings, key: &str) -> Result<Option<Url>, ProviderError> {
    match settings.get(key) {
        None => Ok(None),
        Some(Value::String(raw)) => parse_url(key, raw).map(Some),
        Some(other) => Err(ProviderError::InvalidValue {
            key: key.to_string(),
            found: type_name(other).to_string(),
        }),
    }
}

/// Host of `url`, or an error naming the missing component.
pub(crate) fn require_host<'a>(key: &str, url: &'a Url) -> Result<&'a str, ProviderError> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| missing(key, "host"))
}

/// Explicit port of `url`, or an error naming the missing component.
pub(crate) fn require_port(key: &str, url: &Url) -> Result<u16, ProviderError> {
    url.port().ok_or_else(|| missing(key, "port"))
}

fn missing(key: &str, component: &str) -> ProviderError {
    ProviderError::MissingComponent {
        key: key.to_string(),
        component: component.to_string(),
    }
}

/// Converts an optional URL component to a setting value.
pub(crate) fn component<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}
