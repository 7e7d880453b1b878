// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `.env` file parsing (foreman/honcho dialect).
//!
//! ```text
//! KEY=value            -> value
//! KEY='single quoted'  -> single quoted        (verbatim)
//! KEY="a \"b\" \\ c"   -> a "b" \ c            (backslash escapes dropped)
//! # comment / junk     -> ignored
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

use crate::error::Result;

static LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A([A-Za-z_0-9]+)=(.*)\z").expect("valid regex"));
static SINGLE_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A'(.*)'\z").expect("valid regex"));
static DOUBLE_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\A"(.*)"\z"#).expect("valid regex"));
static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\(.)").expect("valid regex"));

/// Parses `.env` content into a name/value map.
///
/// Lines that are not `NAME=value` are skipped. When a name repeats, the
/// last line wins.
#[must_use]
pub fn parse_env(content: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for line in content.lines() {
        let Some(caps) = LINE_RE.captures(line) else {
            continue;
        };
        let key = &caps[1];
        let mut value = caps[2].to_string();

        if let Some(inner) = SINGLE_QUOTED_RE.captures(&value) {
            value = inner[1].to_string();
        }
        if let Some(inner) = DOUBLE_QUOTED_RE.captures(&value) {
            value = ESCAPE_RE.replace_all(&inner[1], "$1").into_owned();
        }

        values.insert(key.to_string(), value);
    }

    values
}

/// Reads and parses a `.env` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_env_file(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read env file {}", path.display()))?;
    let values = parse_env(&content);
    tracing::debug!(path = %path.display(), count = values.len(), "loaded env file");
    Ok(values)
}
