// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!               AppError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+------+
//!   |        |        |        |        |      |
//!   v        v        v        v        v      v
//! Config  Provider  Serve   Process    Io    Other
//!  Box      Box      Box      Box      Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    NoSelection, AmbiguousSelection, ParseError, InvalidValue
//!   Provider  UnsupportedScheme, InvalidUrl, MissingComponent
//!   Serve     PrivilegedPort, Exhausted, UnknownBackend
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//!
//! All variants boxed => AppError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AppError`].
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Hosting platform convention could not be translated.
    #[error("provider error: {0}")]
    Provider(#[from] Box<ProviderError>),

    /// Server backend dispatch failed.
    #[error("serve error: {0}")]
    Serve(#[from] Box<ServeError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a generic [`AppError::Other`] from a message.
pub fn other(message: impl Into<String>) -> AppError {
    AppError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AppError {
                fn from(err: $error) -> Self {
                    AppError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProviderError => Provider,
    ServeError => Serve,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a prefix rule nor a name map was given to the env merger.
    #[error("must either give a prefix or a name map to import environment variables")]
    NoSelection,

    /// Both a prefix rule and a name map were given to the env merger.
    #[error("a prefix and a name map are mutually exclusive")]
    AmbiguousSelection,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required settings key.
    #[error("missing required setting '{key}'")]
    MissingKey { key: String },

    /// Invalid settings value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),

    /// The facade was initialized twice on the same application.
    #[error("appconfig is already attached to application '{0}'")]
    AlreadyAttached(String),
}

// --- Provider Errors ---

/// Errors raised while translating hosting platform conventions.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A linked service variable used an unexpected URL scheme.
    #[error("only {expected} scheme supported for {variable}, got '{scheme}'")]
    UnsupportedScheme {
        variable: String,
        expected: String,
        scheme: String,
    },

    /// A service URL could not be parsed.
    #[error("invalid url in '{key}': {message}")]
    InvalidUrl { key: String, message: String },

    /// A service URL lacks a component the adapter needs.
    #[error("url in '{key}' has no {component}")]
    MissingComponent { key: String, component: String },

    /// A setting the adapter post-processes has the wrong type.
    #[error("setting '{key}' must be a string, got {found}")]
    InvalidValue { key: String, found: String },
}

// --- Serve Errors ---

/// Server backend dispatch errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Binding a port below 1024 was refused by the OS.
    #[error("could not open socket on {host}:{port}: {source}. Do you have root permissions?")]
    PrivilegedPort {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// No backend in the candidate list was available.
    #[error("exhausted list of possible backends")]
    Exhausted,

    /// A backend name is not registered.
    #[error("unknown backend '{0}'")]
    UnknownBackend(String),

    /// The worker count could not be derived from the machine.
    #[error("could not determine CPU count and no --processes supplied")]
    CpuCount,
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}
