// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External HTTP server backends.
//!
//! ```text
//! "gunicorn,uwsgi,waitress,werkzeug-threaded,werkzeug"
//!        |
//!        v
//! BackendRegistry::resolve --> [Known(backend) | Unknown(name)]
//!        |
//!        v
//! select(): first Known whose executable is on PATH
//!        |                        (none left -> ServeError::Exhausted)
//!        v
//! check_port(): bind probe below 1024 (EACCES -> ServeError::PrivilegedPort)
//!        |
//!        v
//! command(): ProcessBuilder with snapshot + exported settings as env
//! ```

pub mod backends;
pub mod registry;


use std::net::TcpListener;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::core::env::container::Env;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::ServeError;
use crate::settings::Settings;

pub use backends::{Gunicorn, Uwsgi, Waitress, Werkzeug};
pub use registry::{BackendRegistry, Candidate, parse_candidates};

/// Candidate list used when none is configured.
pub const DEFAULT_BACKENDS: &str = "gunicorn,uwsgi,waitress,werkzeug-threaded,werkzeug";

/// Ports below this need elevated privileges on most systems.
pub const PRIVILEGED_PORT_LIMIT: u16 = 1024;

/// Upper bound for a `--version` probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").expect("valid regex"));

/// Version and details of an installed backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    pub version: String,
    pub extra_info: String,
}

/// Where and how to serve an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeTarget<'a> {
    /// Application reference understood by the server (`module[:callable]`).
    pub app: &'a str,
    pub host: &'a str,
    pub port: u16,
    pub processes: usize,
    pub reverse_proxied: bool,
}

impl ServeTarget<'_> {
    /// `host:port`, bracketing IPv6 hosts.
    #[must_use]
    pub fn addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// An external program able to serve a WSGI application.
pub trait ServerBackend: Send + Sync {
    /// Name used in candidate lists.
    fn name(&self) -> &'static str;

    /// Program looked up on PATH.
    fn executable(&self) -> &'static str;

    /// Arguments that make the program serve `target`.
    fn command_args(&self, target: &ServeTarget<'_>) -> Vec<String>;

    /// Number of processes actually used for a request of `requested`.
    fn processes(&self, requested: usize) -> usize {
        requested
    }

    /// Arguments that make the program print its version.
    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    /// Picks the line carrying this backend's version from `--version` output.
    fn version_line<'o>(&self, output: &'o str) -> Option<&'o str> {
        first_line(output)
    }
}

/// Checks whether `backend` is installed and asks it for its version.
///
/// Returns `None` when the executable is not on PATH. A program that does
/// not report a version is still available, with version `unknown`.
pub async fn probe(backend: &dyn ServerBackend) -> Option<BackendInfo> {
    let path = ProcessBuilder::find(backend.executable())?;

    let output = ProcessBuilder::new(&path)
        .args(backend.version_args())
        .name(backend.executable())
        .capture_output()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .timeout(PROBE_TIMEOUT)
        .run()
        .await;

    let version_line = match output {
        Ok(output) => {
            let text = format!("{}\n{}", output.stdout(), output.stderr());
            backend.version_line(&text).map(str::to_string)
        }
        Err(e) => {
            tracing::debug!(backend = backend.name(), error = %e, "version probe failed");
            None
        }
    };

    let version = version_line
        .as_deref()
        .and_then(extract_version)
        .unwrap_or("unknown")
        .to_string();

    Some(BackendInfo {
        version,
        extra_info: path.display().to_string(),
    })
}

/// First non-empty line of `output`, trimmed.
#[must_use]
pub fn first_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|line| !line.is_empty())
}

/// First dotted version number in `line`.
#[must_use]
pub fn extract_version(line: &str) -> Option<&str> {
    VERSION_RE.find(line).map(|m| m.as_str())
}

/// Formats the `--list` report: one line per candidate, in list order.
pub async fn list_backends(registry: &BackendRegistry, list: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for candidate in registry.resolve(list) {
        let line = match candidate {
            Candidate::Unknown(name) => format!("{name:<20} invalid"),
            Candidate::Known(backend) => match probe(backend).await {
                Some(info) => format!(
                    "{:<20} {:<10} {}",
                    backend.name(),
                    info.version,
                    info.extra_info
                ),
                None => format!("{:<20} missing", backend.name()),
            },
        };
        lines.push(line);
    }
    lines
}

/// Picks the first installed backend of `list`.
///
/// Unknown names are skipped with a warning, missing ones silently.
///
/// # Errors
///
/// Returns `ServeError::Exhausted` when no candidate is available.
pub async fn select<'r>(
    registry: &'r BackendRegistry,
    list: &str,
) -> Result<(&'r dyn ServerBackend, BackendInfo), ServeError> {
    for candidate in registry.resolve(list) {
        match candidate {
            Candidate::Unknown(name) => {
                tracing::warn!(backend = %name, "skipping unknown backend");
            }
            Candidate::Known(backend) => {
                if let Some(info) = probe(backend).await {
                    tracing::debug!(backend = backend.name(), version = %info.version, "selected backend");
                    return Ok((backend, info));
                }
                tracing::debug!(backend = backend.name(), "backend not installed");
            }
        }
    }
    Err(ServeError::Exhausted)
}

/// Resolves a requested process count, `0` meaning one per CPU.
///
/// # Errors
///
/// Returns `ServeError::CpuCount` when the CPU count cannot be determined.
pub fn resolve_processes(requested: usize) -> Result<usize, ServeError> {
    if requested > 0 {
        return Ok(requested);
    }
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .map_err(|_| ServeError::CpuCount)
}

/// Probes whether `host:port` can be bound when the port is privileged.
///
/// Only a permission failure is reported; any other bind error is left for
/// the server itself to report.
///
/// # Errors
///
/// Returns `ServeError::PrivilegedPort` when binding is not permitted.
pub fn check_port(host: &str, port: u16) -> Result<(), ServeError> {
    if port >= PRIVILEGED_PORT_LIMIT {
        return Ok(());
    }
    match TcpListener::bind((host, port)) {
        Ok(_) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ServeError::PrivilegedPort {
                host: host.to_string(),
                port,
                source,
            })
        }
        Err(e) => {
            tracing::debug!(host, port, error = %e, "bind probe failed");
            Ok(())
        }
    }
}

/// The run summary printed before the server starts.
#[must_use]
pub fn run_summary(app: &str, processes: usize, backend: &str, addr: &str) -> Vec<String> {
    [
        ("app", app.to_string()),
        ("# processes", processes.to_string()),
        ("backend", backend.to_string()),
        ("addr", addr.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| format!("{key:<15}: {value}"))
    .collect()
}

/// The server's environment: the snapshot plus the settings exported under
/// `prefix`.
#[must_use]
pub fn child_env(env: &Env, settings: &Settings, prefix: &str) -> Env {
    let mut child = env.clone();
    child.overlay(settings.to_env(prefix));
    child
}

/// Builds the process that runs `backend` for `target`.
#[must_use]
pub fn command(backend: &dyn ServerBackend, target: &ServeTarget<'_>, env: Env) -> ProcessBuilder {
    ProcessBuilder::new(backend.executable())
        .name(backend.name())
        .args(backend.command_args(target))
        .env(env)
        .inherit_stdio()
}
