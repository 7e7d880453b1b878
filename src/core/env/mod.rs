// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment snapshots.
//!
//! ```text
//! current_env()  ----+
//!                    +--> Env (read-only to the merger)
//! .env file  --------+        overlay(), later wins
//! ```
//!
//! The process environment is read once and never written back; everything
//! downstream works on the injected snapshot.

pub mod container;
pub mod dotenv;


/// Captures the current process environment.
///
/// Variables whose name or value is not valid unicode are skipped.
#[must_use]
pub fn current_env() -> container::Env {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
