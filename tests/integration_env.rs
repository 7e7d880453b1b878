// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for environment snapshots and the env merger.
//!
//! Tests dotenv files feeding the prefix rule and name maps end to end.

use appconfig_rs::core::env::container::Env;
use appconfig_rs::core::env::dotenv::{load_env_file, parse_env};
use appconfig_rs::envvars::{Coercion, NameMap, Selection, from_envvars, merge};
use appconfig_rs::error::ConfigError;
use appconfig_rs::settings::Settings;
use serde_json::json;

// =============================================================================
// Dotenv files
// =============================================================================

#[test]
fn dotenv_file_feeds_prefix_rule() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        r#"# local overrides
SHOP_DEBUG=true
SHOP_PORT=8000
SHOP_NAME='My "quoted" shop'
SHOP_SECRET="s3\"cr\\et"
export SHOP_IGNORED=1
not a variable
"#,
    )
    .unwrap();

    let mut env: Env = [("SHOP_PORT", "5000"), ("HOME", "/root")].into_iter().collect();
    env.overlay(load_env_file(&path).unwrap());

    let mut settings = Settings::new();
    let written = from_envvars(
        &mut settings,
        &env,
        &Selection::prefix("SHOP_"),
        Coercion::Json,
    );

    assert_eq!(written, 4);
    assert_eq!(settings.get("DEBUG"), Some(&json!(true)));
    assert_eq!(settings.get("PORT"), Some(&json!(8000)));
    assert_eq!(settings.get_str("NAME"), Some(r#"My "quoted" shop"#));
    assert_eq!(settings.get_str("SECRET"), Some(r#"s3"cr\et"#));
    assert!(!settings.contains_key("IGNORED"));
}

#[test]
fn dotenv_last_duplicate_wins() {
    let values = parse_env("A=1\nA=2\n");
    assert_eq!(values.get("A").map(String::as_str), Some("2"));
}

#[test]
fn dotenv_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_env_file(&dir.path().join("absent.env")).is_err());
}

// =============================================================================
// Merger
// =============================================================================

#[test]
fn merge_prefix_imports_exactly_the_stripped_names() {
    let env: Env = [
        ("TESTAPP_CONFA", "a"),
        ("TESTAPP_CONFB", "[1, 2]"),
        ("TESTAPPX_CONFC", "c"),
        ("OTHER", "o"),
    ]
    .into_iter()
    .collect();
    let mut settings = Settings::new();

    merge(&mut settings, &env, Some("TESTAPP_"), None, Coercion::Json).unwrap();

    assert_eq!(settings.keys().collect::<Vec<_>>(), ["CONFA", "CONFB"]);
    assert_eq!(settings.get("CONFB"), Some(&json!([1, 2])));
}

#[test]
fn merge_is_idempotent() {
    let env: Env = [("APP_A", "{\"x\": 1}"), ("APP_B", "plain text")]
        .into_iter()
        .collect();
    let mut once = Settings::new();
    merge(&mut once, &env, Some("APP_"), None, Coercion::Json).unwrap();

    let mut twice = once.clone();
    merge(&mut twice, &env, Some("APP_"), None, Coercion::Json).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn merge_with_name_map_renames() {
    let env: Env = [("DATABASE_URL", "postgres://db/x"), ("PORT", "80")]
        .into_iter()
        .collect();
    let names: NameMap = [
        ("DATABASE_URL", "SQLALCHEMY_DATABASE_URI"),
        ("REDIS_URL", "REDIS_URL"),
    ]
    .into_iter()
    .collect();
    let mut settings = Settings::new();

    let written = merge(&mut settings, &env, None, Some(names), Coercion::Plain).unwrap();

    assert_eq!(written, 1);
    assert_eq!(
        settings.get_str("SQLALCHEMY_DATABASE_URI"),
        Some("postgres://db/x")
    );
    assert!(!settings.contains_key("REDIS_URL"));
}

#[test]
fn merge_requires_exactly_one_selection() {
    let mut settings = Settings::new();
    let env = Env::new();

    let err = merge(&mut settings, &env, None, None, Coercion::Json).unwrap_err();
    assert!(matches!(err, ConfigError::NoSelection));

    let err = merge(
        &mut settings,
        &env,
        Some("APP_"),
        Some(NameMap::identity(["A"])),
        Coercion::Json,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::AmbiguousSelection));
}
