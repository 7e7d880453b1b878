// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dropping and recreating the application database.
//!
//! ```text
//! SQLALCHEMY_DATABASE_URI = postgres://user:pw@host:5432/name
//!        |
//!        v
//!   DbTarget { host, port, user, password, database }
//!        |
//!        v
//! db-before-reset
//! dropdb --if-exists -h host -p port [-U user] name    (PGPASSWORD=pw)
//! db-reset-dropped
//! createdb -h host -p port [-U user] name
//! db-reset-created
//! db-after-reset
//! ```

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::app::App;
use crate::core::env::container::Env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ConfigError, Result};
use crate::signals::{Signal, Signals};


/// Setting holding the database URI.
pub const DATABASE_URI: &str = "SQLALCHEMY_DATABASE_URI";

/// Setting toggling SQL statement logging.
pub const ECHO: &str = "SQLALCHEMY_ECHO";

const DEFAULT_PORT: u16 = 5432;

/// Connection parameters of a PostgreSQL database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbTarget {
    host: String,
    port: u16,
    user: Option<String>,
    password: Option<String>,
    database: String,
}

impl DbTarget {
    /// Parses a `postgres://` or `postgresql://` URI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for other schemes, unparsable URIs
    /// and URIs without a database name.
    pub fn from_uri(uri: &str) -> std::result::Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: DATABASE_URI.to_string(),
            message,
        };

        let url = Url::parse(uri).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(invalid(format!(
                "only postgres databases can be reset, got scheme '{}'",
                url.scheme()
            )));
        }

        let database = url.path().trim_start_matches('/');
        if database.is_empty() {
            return Err(invalid("no database name in uri".to_string()));
        }

        Ok(Self {
            host: url.host_str().unwrap_or("localhost").to_string(),
            port: url.port().unwrap_or(DEFAULT_PORT),
            user: Some(url.username()).filter(|u| !u.is_empty()).map(str::to_string),
            password: url.password().map(str::to_string),
            database: database.to_string(),
        })
    }

    /// Reads the target from the application's settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when no database URI is configured,
    /// or the errors of [`DbTarget::from_uri`].
    pub fn from_app(app: &App) -> std::result::Result<Self, ConfigError> {
        let uri = app
            .settings()
            .get_str(DATABASE_URI)
            .ok_or_else(|| ConfigError::MissingKey {
                key: DATABASE_URI.to_string(),
            })?;
        Self::from_uri(uri)
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    fn connection_args(&self) -> Vec<String> {
        let mut args = vec![
            "-h".to_string(),
            self.host.clone(),
            "-p".to_string(),
            self.port.to_string(),
        ];
        if let Some(user) = &self.user {
            args.push("-U".to_string());
            args.push(user.clone());
        }
        args
    }

    /// Environment of the client tools, carrying the password.
    fn client_env(&self, env: &Env) -> Env {
        let mut env = env.clone();
        if let Some(password) = &self.password {
            env.set("PGPASSWORD", password.clone());
        }
        env
    }

    /// `dropdb --if-exists` for this target.
    #[must_use]
    pub fn dropdb(&self, env: &Env) -> ProcessBuilder {
        ProcessBuilder::new("dropdb")
            .arg("--if-exists")
            .args(self.connection_args())
            .arg(&self.database)
            .env(self.client_env(env))
    }

    /// `createdb` for this target.
    #[must_use]
    pub fn createdb(&self, env: &Env) -> ProcessBuilder {
        ProcessBuilder::new("createdb")
            .args(self.connection_args())
            .arg(&self.database)
            .env(self.client_env(env))
    }
}

impl std::fmt::Display for DbTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "postgres://{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Drops and recreates the database of `app`, emitting the reset signals.
///
/// # Errors
///
/// Returns an error if the database URI is missing or invalid, or if either
/// client tool fails.
pub async fn reset(
    app: &App,
    env: &Env,
    signals: &Signals,
    token: &CancellationToken,
) -> Result<()> {
    let target = DbTarget::from_app(app)?;
    tracing::info!(database = %target, "resetting database");

    signals.send(Signal::DbBeforeReset, app);
    target.dropdb(env).run_with_cancellation(token.clone()).await?;
    signals.send(Signal::DbResetDropped, app);
    target.createdb(env).run_with_cancellation(token.clone()).await?;
    signals.send(Signal::DbResetCreated, app);
    signals.send(Signal::DbAfterReset, app);

    Ok(())
}
