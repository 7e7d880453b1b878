// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Heroku add-on variables.
//!
//! ```text
//! 1. pass-through   SENTRY_DSN, MAILGUN_*, SENDGRID_*, ...   (same name)
//! 2. rename         DATABASE_URL  -> SQLALCHEMY_DATABASE_URI
//!                   REDISTOGO_URL -> REDIS_URL, MONGOLAB_URI -> MONGO_URI, ...
//!                   HEROKU_POSTGRESQL_*URL -> SQLALCHEMY_DATABASE_URI
//!                   (only without DATABASE_URL)
//! 3. mail           MAILGUN_SMTP_* | SENDGRID_* -> SMTP_* -> MAIL_*
//! 4. urls           REDIS_URL -> REDIS_HOST/PORT/PASSWORD
//!                   MONGO_URI -> MONGODB_USER/PASSWORD/HOST/PORT/DB
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::{Provider, component, setting_url};
use crate::core::env::container::Env;
use crate::envvars::{Coercion, NameMap, Selection, from_envvars};
use crate::error::ProviderError;
use crate::settings::Settings;

/// Variables imported under their own name.
pub const PASS_THROUGH: &[&str] = &[
    "SENTRY_DSN",
    "EXCEPTIONAL_API_KEY",
    "GOOGLE_DOMAIN",
    "MAILGUN_API_KEY",
    "MAILGUN_SMTP_LOGIN",
    "MAILGUN_SMTP_PASSWORD",
    "MAILGUN_SMTP_PORT",
    "MAILGUN_SMTP_SERVER",
    "SENDGRID_USERNAME",
    "SENDGRID_PASSWORD",
];

/// Add-on variables and the settings keys they are imported as.
pub const RENAMES: &[(&str, &str)] = &[
    ("DATABASE_URL", "SQLALCHEMY_DATABASE_URI"),
    ("BROKER_URL", "RABBITMQ_URL"),
    ("REDISTOGO_URL", "REDIS_URL"),
    ("MONGOLAB_URI", "MONGO_URI"),
    ("MONGOHQ_URL", "MONGO_URI"),
    ("CLOUDANT_URL", "COUCHDB_URL"),
    ("MEMCACHIER_SERVERS", "CACHE_MEMCACHED_SERVERS"),
    ("MEMCACHIER_USERNAME", "CACHE_MEMCACHED_USERNAME"),
    ("MEMCACHIER_PASSWORD", "CACHE_MEMCACHED_PASSWORD"),
];

const SENDGRID_SMTP_SERVER: &str = "smtp.sendgrid.net";
const SENDGRID_SMTP_PORT: u16 = 25;

static HEROKU_POSTGRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^HEROKU_POSTGRESQL_[A-Z_]*URL").expect("valid regex"));

/// Adapter for Heroku add-on conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heroku;

impl Heroku {
    /// Builds the rename map for `env`, including unpromoted databases.
    #[must_use]
    pub fn name_map(env: &Env) -> NameMap {
        let mut names: NameMap = RENAMES.iter().copied().collect();

        if !env.contains("DATABASE_URL") {
            // Env keys iterate sorted, so the last match wins deterministically.
            for name in env.keys().filter(|name| HEROKU_POSTGRES_RE.is_match(name)) {
                tracing::warn!(
                    "Using {name} as the database URL. However, really should promote \
                     this or another URL to DATABASE_URL by running 'heroku pg:promote {name}'"
                );
                names.insert(name, "SQLALCHEMY_DATABASE_URI");
            }
        }

        names
    }
}

impl Provider for Heroku {
    fn name(&self) -> &'static str {
        "heroku"
    }

    fn apply(&self, settings: &mut Settings, env: &Env) -> Result<(), ProviderError> {
        let pass_through = Selection::Names(NameMap::identity(PASS_THROUGH.iter().copied()));
        let renames = Selection::Names(Self::name_map(env));

        from_envvars(settings, env, &pass_through, Coercion::Plain);
        from_envvars(settings, env, &renames, Coercion::Plain);

        apply_mail(settings);
        apply_redis(settings)?;
        apply_mongo(settings)?;
        Ok(())
    }
}

/// Derives `SMTP_*` and `MAIL_*` from Mailgun or SendGrid credentials.
fn apply_mail(settings: &mut Settings) {
    let copy = |settings: &mut Settings, to: &str, from: &str| {
        let value = settings.get_or_null(from);
        settings.insert(to, value);
    };

    if settings.contains_key("MAILGUN_SMTP_SERVER") {
        copy(settings, "SMTP_SERVER", "MAILGUN_SMTP_SERVER");
        copy(settings, "SMTP_PORT", "MAILGUN_SMTP_PORT");
        copy(settings, "SMTP_LOGIN", "MAILGUN_SMTP_LOGIN");
        copy(settings, "SMTP_PASSWORD", "MAILGUN_SMTP_PASSWORD");
    } else if settings.contains_key("SENDGRID_USERNAME") {
        settings.insert("SMTP_SERVER", SENDGRID_SMTP_SERVER);
        settings.insert("SMTP_PORT", SENDGRID_SMTP_PORT);
        copy(settings, "SMTP_LOGIN", "SENDGRID_USERNAME");
        copy(settings, "SMTP_PASSWORD", "SENDGRID_PASSWORD");
    } else {
        return;
    }
    settings.insert("SMTP_USE_TLS", true);

    // SendGrid without a password only gets the SMTP block.
    if !settings.contains_key("MAILGUN_SMTP_SERVER")
        && !settings.contains_key("SENDGRID_PASSWORD")
    {
        return;
    }
    copy(settings, "MAIL_SERVER", "SMTP_SERVER");
    copy(settings, "MAIL_PORT", "SMTP_PORT");
    copy(settings, "MAIL_USE_TLS", "SMTP_USE_TLS");
    copy(settings, "MAIL_USERNAME", "SMTP_LOGIN");
    copy(settings, "MAIL_PASSWORD", "SMTP_PASSWORD");
}

fn apply_redis(settings: &mut Settings) -> Result<(), ProviderError> {
    let Some(url) = setting_url(settings, "REDIS_URL")? else {
        return Ok(());
    };

    settings.insert("REDIS_HOST", component(url.host_str()));
    settings.insert("REDIS_PORT", component(url.port()));
    settings.insert("REDIS_PASSWORD", component(url.password()));
    Ok(())
}

fn apply_mongo(settings: &mut Settings) -> Result<(), ProviderError> {
    let Some(url) = setting_url(settings, "MONGO_URI")? else {
        return Ok(());
    };

    let user = Some(url.username()).filter(|u| !u.is_empty());
    let database = url.path().strip_prefix('/').filter(|db| !db.is_empty());

    settings.insert("MONGODB_USER", component(user));
    settings.insert("MONGODB_PASSWORD", component(url.password()));
    settings.insert("MONGODB_HOST", component(url.host_str()));
    settings.insert("MONGODB_PORT", component(url.port()));
    settings.insert("MONGODB_DB", component(database));
    Ok(())
}
