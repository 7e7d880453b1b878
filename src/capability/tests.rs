// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use serde_json::json;

use super::{Availability, CapabilityTable, installed_extension, installed_extensions};
use crate::app::App;

fn app_with(extensions: serde_json::Value) -> App {
    let mut app = App::new("testapp");
    app.settings_mut().insert("INSTALLED_EXTENSIONS", extensions);
    app
}

#[test]
fn test_installed_extensions_array_and_string() {
    let array = app_with(json!(["debug", " debugtoolbar ", 3, ""]));
    assert_eq!(installed_extensions(array.settings()), ["debug", "debugtoolbar"]);

    let string = app_with(json!("debug, debugtoolbar==0.10,"));
    assert_eq!(
        installed_extensions(string.settings()),
        ["debug", "debugtoolbar==0.10"]
    );

    assert!(installed_extensions(App::new("bare").settings()).is_empty());
}

#[test]
fn test_installed_extension_version() {
    let app = app_with(json!("debug, debugtoolbar==0.10"));

    assert_eq!(
        installed_extension(app.settings(), "debugtoolbar"),
        Availability::Available {
            version: "0.10".to_string()
        }
    );
    assert_eq!(
        installed_extension(app.settings(), "debug"),
        Availability::Available {
            version: "unknown".to_string()
        }
    );
    assert_eq!(
        installed_extension(app.settings(), "toolbar"),
        Availability::Missing
    );
}

#[test]
fn test_builtins() {
    let table = CapabilityTable::with_builtins();
    let app = app_with(json!(["debugtoolbar"]));

    assert_eq!(table.names().collect::<Vec<_>>(), ["debug", "debugtoolbar"]);
    assert_eq!(table.resolve("debug", &app).on_off(), "off");
    assert_eq!(table.resolve("debugtoolbar", &app).on_off(), "on");
    assert_eq!(table.resolve("unregistered", &app), Availability::Missing);
}

#[test]
fn test_custom_probe() {
    let mut table = CapabilityTable::new();
    table.register("always", |_| Availability::Available {
        version: "1.0".to_string(),
    });

    assert!(table.resolve("always", &App::new("x")).is_available());
}
