// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write as _;

use serde_json::json;

use super::Settings;
use crate::error::ConfigError;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_insert_overwrites() {
    let mut settings = Settings::new();
    settings.insert("DEBUG", false);
    settings.insert("DEBUG", true);

    assert_eq!(settings.get("DEBUG"), Some(&json!(true)));
    assert_eq!(settings.len(), 1);
}

#[test]
fn test_get_bool_spellings() {
    let mut settings = Settings::new();
    settings.insert("A", "yes");
    settings.insert("B", "0");
    settings.insert("C", 1);
    settings.insert("D", json!(null));
    settings.insert("E", json!([1]));

    assert_eq!(settings.get_bool("A"), Some(true));
    assert_eq!(settings.get_bool("B"), Some(false));
    assert_eq!(settings.get_bool("C"), Some(true));
    assert_eq!(settings.get_bool("D"), Some(false));
    assert_eq!(settings.get_bool("E"), None);
    assert_eq!(settings.get_bool("MISSING"), None);
}

#[test]
fn test_update_from_toml_file() {
    let file = write_temp(
        ".toml",
        r#"
SECRET_KEY = "abc"
PORT = 8080
DEBUG = true

[MAIL]
SERVER = "smtp.example.com"
"#,
    );

    let mut settings = Settings::new();
    settings.insert("KEEP", "me");
    settings.update_from_file(file.path()).unwrap();

    assert_eq!(settings.get_str("SECRET_KEY"), Some("abc"));
    assert_eq!(settings.get("PORT"), Some(&json!(8080)));
    assert_eq!(settings.get("DEBUG"), Some(&json!(true)));
    assert_eq!(
        settings.get("MAIL"),
        Some(&json!({"SERVER": "smtp.example.com"}))
    );
    assert_eq!(settings.get_str("KEEP"), Some("me"));
}

#[test]
fn test_update_from_json_file() {
    let file = write_temp(".json", r#"{"A": [1, 2], "B": null}"#);

    let mut settings = Settings::new();
    settings.update_from_file(file.path()).unwrap();

    assert_eq!(settings.get("A"), Some(&json!([1, 2])));
    assert_eq!(settings.get("B"), Some(&json!(null)));
}

#[test]
fn test_update_from_json_file_requires_object() {
    let file = write_temp(".json", "[1, 2]");

    let err = Settings::new().update_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { ref message, .. } if message.contains("an array")));
}

#[test]
fn test_update_from_missing_file() {
    let err = Settings::new()
        .update_from_file(std::path::Path::new("/nonexistent/settings.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_update_from_invalid_toml() {
    let file = write_temp(".toml", "this is = = not toml");

    let err = Settings::new().update_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_format_options_hides_secrets() {
    let mut settings = Settings::new();
    settings.insert("SECRET_KEY", "devkey");
    settings.insert("SMTP_PASSWORD", "pw");
    settings.insert("PORT", 25);
    settings.insert("SERVER_NAME", "localhost:5000");

    insta::assert_snapshot!(settings.format_options().join("\n"), @r#"
    PORT          = 25
    SECRET_KEY    = [hidden]
    SERVER_NAME   = "localhost:5000"
    SMTP_PASSWORD = [hidden]
    "#);
}

#[test]
fn test_to_env_renders_strings_verbatim() {
    let mut settings = Settings::new();
    settings.insert("NAME", "demo");
    settings.insert("PORT", 5000);
    settings.insert("FLAGS", json!({"a": 1}));
    settings.insert("UNSET", json!(null));

    let env = settings.to_env("TESTAPP_");
    assert_eq!(env["TESTAPP_NAME"], "demo");
    assert_eq!(env["TESTAPP_PORT"], "5000");
    assert_eq!(env["TESTAPP_FLAGS"], r#"{"a":1}"#);
    assert!(!env.contains_key("TESTAPP_UNSET"));
}
