// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use serde_json::json;

use super::db::logging_signals;
use super::dev::{DebugStatus, DevServer, INSECURE_SECRET_KEY, SECRET_KEY, wire_debug};
use super::options::options_lines;
use super::{
    EXIT_FAILURE, EXIT_PERMISSION_DENIED, MISSING_APP_MESSAGE, Session, app_name, exit_code,
    load_env, load_launcher_config,
};
use crate::app::App;
use crate::capability::{Availability, CapabilityTable, INSTALLED_EXTENSIONS};
use crate::cli::global::GlobalOptions;
use crate::core::env::container::Env;
use crate::error::{AppError, ConfigError, ServeError};
use crate::server::ServeTarget;
use crate::signals::Signal;

fn global(app: Option<&str>) -> GlobalOptions {
    GlobalOptions {
        app: app.map(str::to_string),
        ..GlobalOptions::default()
    }
}

fn app_with_extensions(extensions: &[&str]) -> App {
    let mut app = App::new("shop");
    app.settings_mut()
        .insert(INSTALLED_EXTENSIONS, json!(extensions));
    app
}

#[test]
fn test_app_name_missing() {
    let err = app_name(&global(None)).unwrap_err();
    assert_eq!(err.to_string(), MISSING_APP_MESSAGE);
}

#[test]
fn test_load_env_explicit_missing_file() {
    let err = load_env(Some(Path::new("/nonexistent/.env")), Env::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::NotFound(_))
    ));
}

#[test]
fn test_load_env_overlays_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prod.env");
    std::fs::write(&path, "SHOP_DEBUG=false\nSHOP_NAME='demo'\n").unwrap();
    let base: Env = [("SHOP_DEBUG", "true"), ("PATH", "/bin")].into_iter().collect();

    let (env, file) = load_env(Some(path.as_path()), base).unwrap();

    assert_eq!(file, Some(path));
    assert_eq!(env.get("SHOP_DEBUG"), Some("false"), "file wins");
    assert_eq!(env.get("SHOP_NAME"), Some("demo"));
    assert_eq!(env.get("PATH"), Some("/bin"));
}

#[test]
fn test_load_launcher_config_precedence() {
    let env: Env = [("APPCONFIG_SERVE__PORT", "8080"), ("APPCONFIG_SERVE__PROCESSES", "2")]
        .into_iter()
        .collect();
    let mut options = global(Some("shop"));
    options.options = vec!["serve.port=9000".to_string(), "serve.processes=3".to_string()];

    let config = load_launcher_config(&options, &env, &["serve.port=7000".to_string()]).unwrap();

    assert_eq!(config.serve.port, 7000, "command flags win");
    assert_eq!(config.serve.processes, 3, "--set beats the environment");
}

#[test]
fn test_session_create_app() {
    let env: Env = [("SHOP_GREETING", "\"hi\""), ("OTHER_GREETING", "no")]
        .into_iter()
        .collect();
    let options = global(Some("shop:create_app"));

    let session = Session::load(&options, env, &[]).unwrap();
    let app = session.create_app(&options).unwrap();

    assert_eq!(app.name(), "shop");
    assert_eq!(app.settings().get_str("GREETING"), Some("hi"));
    assert_eq!(app.settings().len(), 1);
}

#[test]
fn test_session_create_app_missing_configfile() {
    let mut options = global(Some("shop"));
    options.configfile = Some(PathBuf::from("/nonexistent/prod.toml"));

    let session = Session::load(&options, Env::new(), &[]).unwrap();
    assert!(session.create_app(&options).is_err());
}

#[test]
fn test_wire_debug_without_extensions() {
    let mut app = app_with_extensions(&[]);

    let status = wire_debug(&mut app, &CapabilityTable::with_builtins(), true, true, "localhost:5000");

    assert_eq!(status, DebugStatus::default());
    insta::assert_snapshot!(status.status_line(), @" * Flask-DebugToolbar: off, Flask-Debug: off");
    assert_eq!(app.settings().len(), 1, "only the extension list");
}

#[test]
fn test_wire_debug_with_extensions() {
    let mut app = app_with_extensions(&["debug", "debugtoolbar==0.10"]);

    let status = wire_debug(&mut app, &CapabilityTable::with_builtins(), true, true, "localhost:5000");

    insta::assert_snapshot!(
        status.status_line(),
        @r#" * Flask-DebugToolbar: on, Flask-Debug: on, SECRET_KEY not set, using insecure "devkey""#
    );
    let settings = app.settings();
    assert_eq!(settings.get_str("SERVER_NAME"), Some("localhost:5000"));
    assert_eq!(settings.get_bool("FLASK_DEBUG_DISABLE_STRICT"), Some(true));
    assert_eq!(settings.get_str(SECRET_KEY), Some(INSECURE_SECRET_KEY));
    assert!(app.debug());
    assert_eq!(
        status.toolbar,
        Availability::Available {
            version: "0.10".to_string()
        }
    );
}

#[test]
fn test_wire_debug_keeps_secret_key() {
    let mut app = app_with_extensions(&["debugtoolbar"]);
    app.settings_mut().insert(SECRET_KEY, "s3cret");

    let status = wire_debug(&mut app, &CapabilityTable::with_builtins(), true, true, "localhost:5000");

    assert!(status.toolbar.is_available());
    assert_eq!(status.debug, Availability::Missing);
    assert!(status.messages.is_empty());
    assert_eq!(app.settings().get_str(SECRET_KEY), Some("s3cret"));
}

#[test]
fn test_wire_debug_toolbar_without_debug() {
    let mut app = app_with_extensions(&["debugtoolbar"]);

    let status = wire_debug(&mut app, &CapabilityTable::with_builtins(), false, true, "localhost:5000");

    assert!(status.toolbar.is_available());
    assert!(!app.debug());
    assert!(!app.settings().contains_key(SECRET_KEY));
}

#[test]
fn test_wire_debug_disabled() {
    let mut app = app_with_extensions(&["debug", "debugtoolbar"]);

    let status = wire_debug(&mut app, &CapabilityTable::with_builtins(), true, false, "localhost:5000");

    assert_eq!(status, DebugStatus::default());
    assert!(!app.settings().contains_key("SERVER_NAME"));
}

#[test]
fn test_dev_server_command() {
    let target = ServeTarget {
        app: "shop:create_app",
        host: "localhost",
        port: 5000,
        processes: 1,
        reverse_proxied: false,
    };

    let plain = DevServer {
        target,
        debug: false,
        ssl: false,
        extra_files: Vec::new(),
    };
    let full = DevServer {
        target,
        debug: true,
        ssl: true,
        extra_files: vec![PathBuf::from("prod.toml"), PathBuf::from(".env")],
    };

    insta::assert_snapshot!(
        [plain.command(Env::new()).command_line(), full.command(Env::new()).command_line()].join("\n"),
        @r"
    flask --app shop:create_app run --host localhost --port 5000 --with-threads
    flask --app shop:create_app --debug run --host localhost --port 5000 --with-threads --reload --cert adhoc --extra-files prod.toml:.env
    "
    );
}

#[test]
fn test_logging_signals_cover_all() {
    let signals = logging_signals();
    for signal in Signal::ALL {
        assert_eq!(signals.receiver_count(signal), 1);
    }
}

#[test]
fn test_options_lines() {
    let app = App::new("shop");
    assert_eq!(options_lines(&app), ["No settings loaded for shop"]);

    let mut app = App::new("shop");
    app.settings_mut().insert("PORT", 8000);
    assert_eq!(options_lines(&app).len(), 1);
}

fn privileged_port() -> ServeError {
    ServeError::PrivilegedPort {
        host: "0.0.0.0".to_string(),
        port: 80,
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
}

#[test]
fn test_exit_code_privileged_port() {
    assert_eq!(exit_code(&anyhow::Error::from(privileged_port())), EXIT_PERMISSION_DENIED);
    assert_eq!(EXIT_PERMISSION_DENIED, 13);

    let wrapped = anyhow::Error::from(AppError::Serve(Box::new(privileged_port())));
    assert_eq!(exit_code(&wrapped), 13);

    let with_context = anyhow::Error::from(privileged_port()).context("starting gunicorn");
    assert_eq!(exit_code(&with_context), 13);
}

#[test]
fn test_exit_code_other_failures() {
    assert_eq!(exit_code(&anyhow::Error::from(ServeError::Exhausted)), EXIT_FAILURE);
    assert_eq!(EXIT_FAILURE, 1);

    let config = anyhow::Error::from(AppError::from(ConfigError::NoSelection));
    assert_eq!(exit_code(&config), 1);
    assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
}

#[test]
fn test_session_ignores_application_launcher_prefix() {
    let base: Env = [("APPCONFIG_DEBUG", "1")].into_iter().collect();
    let dir = tempfile::tempdir().unwrap();
    let env_file = dir.path().join("empty.env");
    std::fs::write(&env_file, "").unwrap();
    let global = GlobalOptions {
        app: Some("appconfig".to_string()),
        env_file: Some(env_file),
        ..GlobalOptions::default()
    };

    let session = Session::load(&global, base, &[]).unwrap();

    assert_eq!(session.config.serve.port, 80);
    assert_eq!(session.env.get("APPCONFIG_DEBUG"), Some("1"));
}
