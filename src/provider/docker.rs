// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Docker container links.
//!
//! ```text
//! PG_PORT=tcp://172.17.0.5:5432
//! PG_ENV_POSTGRES_USER=app  PG_ENV_POSTGRES_PASSWORD=pw  PG_ENV_POSTGRES_DB=appdb
//!   --> SQLALCHEMY_DATABASE_URI = "postgres://app:pw@172.17.0.5:5432/appdb"
//!
//! REDIS_PORT=tcp://172.17.0.6:6379  [REDIS_ENV_REDIS_PASSWORD=pw]
//!   --> REDIS_URL  = "redis://:pw@172.17.0.6:6379/0"
//!       REDIS_HOST = "172.17.0.6", REDIS_PORT = 6379, REDIS_DB = 0
//! ```

use url::Url;

use super::{Provider, parse_url, require_host, require_port};
use crate::core::env::container::Env;
use crate::error::ProviderError;
use crate::settings::Settings;

const LINK_SCHEME: &str = "tcp";

/// Adapter for variables injected by legacy Docker links.
#[derive(Debug, Clone, Copy, Default)]
pub struct Docker;

impl Provider for Docker {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn apply(&self, settings: &mut Settings, env: &Env) -> Result<(), ProviderError> {
        if let Some(raw) = env.get("PG_PORT") {
            let url = link_url("PG_PORT", "postgres", raw)?;
            let user = env.get("PG_ENV_POSTGRES_USER").unwrap_or("postgres");
            let password = env.get("PG_ENV_POSTGRES_PASSWORD").unwrap_or("");
            let database = env.get("PG_ENV_POSTGRES_DB").unwrap_or(user);
            let host = require_host("PG_PORT", &url)?;
            let port = require_port("PG_PORT", &url)?;

            let uri = format!("postgres://{user}:{password}@{host}:{port}/{database}");
            tracing::debug!(host, port, database, "linked postgres container");
            settings.insert("SQLALCHEMY_DATABASE_URI", uri);
        }

        if let Some(raw) = env.get("REDIS_PORT") {
            let url = link_url("REDIS_PORT", "redis", raw)?;
            let host = require_host("REDIS_PORT", &url)?;
            let port = require_port("REDIS_PORT", &url)?;
            let auth = env
                .get("REDIS_ENV_REDIS_PASSWORD")
                .map(|pw| format!(":{pw}@"))
                .unwrap_or_default();

            tracing::debug!(host, port, "linked redis container");
            settings.insert("REDIS_URL", format!("redis://{auth}{host}:{port}/0"));
            settings.insert("REDIS_HOST", host);
            settings.insert("REDIS_PORT", port);
            settings.insert("REDIS_DB", 0);
        }

        Ok(())
    }
}

/// Parses a link variable and checks its scheme.
fn link_url(variable: &str, service: &str, raw: &str) -> Result<Url, ProviderError> {
    let url = parse_url(variable, raw)?;
    if url.scheme() != LINK_SCHEME {
        return Err(ProviderError::UnsupportedScheme {
            variable: format!("{service} ({variable})"),
            expected: LINK_SCHEME.to_string(),
            scheme: url.scheme().to_string(),
        });
    }
    Ok(url)
}
