// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          dev / serve / db / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |  config (LauncherConfig)  |
//!              |  app (AppConfig, factory) |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!            provider     envvars   settings
//!          docker/heroku  prefix /  TOML/JSON
//!                         name map
//!
//!   +-----------------------------------------------+
//!   |  server   backend registry, probe, run         |
//!   |  reload   restart policy   db   dropdb/createdb|
//!   |  capability, signals                           |
//!   +-----------------------------------------------+
//!   |  core   process, env snapshot, dotenv          |
//!   +-----------------------------------------------+
//!   |  foundation   error, logging                   |
//!   +-----------------------------------------------+
//! ```

pub mod app;
pub mod capability;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod db;
pub mod envvars;
pub mod error;
pub mod logging;
pub mod provider;
pub mod reload;
pub mod server;
pub mod settings;
pub mod signals;
