// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Restarting the development server after a crash.
//!
//! ```text
//! supervise(restart)
//!   loop:
//!     status = restart().await
//!     0                    -> return 0
//!     restarts exhausted   -> return status
//!     otherwise            -> "App exited with exit code N. Will attempt
//!                              restart in S seconds.", sleep, delay *= backoff
//! ```
//!
//! A crash that the reloader inside the server cannot recover from (for
//! example a syntax error at import time) ends the server process; the
//! policy starts it again after a pause instead of exiting the launcher.

use std::future::Future;
use std::time::Duration;

use bon::Builder;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

#[cfg(test)]
mod tests;

/// Retry schedule for a crashed development server.
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct RestartPolicy {
    #[builder(setters(name = with_delay), default = Duration::from_secs(2))]
    delay: Duration,
    #[builder(setters(name = with_max_restarts), default = 10)]
    max_restarts: u32,
    #[builder(setters(name = with_backoff), default = 1.5)]
    backoff: f64,
    #[builder(setters(name = with_max_delay), default = Duration::from_secs(30))]
    max_delay: Duration,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RestartPolicy {
    /// Policy with an initial delay of `secs` seconds, `None` for `0` or
    /// anything that is not a positive finite number.
    #[must_use]
    pub fn from_secs(secs: f64, max_restarts: u32) -> Option<Self> {
        let delay = Duration::try_from_secs_f64(secs).ok().filter(|d| !d.is_zero())?;
        Some(
            Self::builder()
                .with_delay(delay)
                .with_max_restarts(max_restarts)
                .build(),
        )
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub const fn max_restarts(&self) -> u32 {
        self.max_restarts
    }

    /// Pause before restart number `attempt` (0-based), capped at the
    /// maximum delay.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let factor = self.backoff.max(1.0).powi(exponent);
        let secs = (self.delay.as_secs_f64() * factor).min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(secs).unwrap_or(self.max_delay)
    }

    /// Runs `restart` until it reports exit status 0, restarts are used up or
    /// `token` is cancelled. Returns the last exit status.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `restart`.
    pub async fn supervise<F, Fut>(&self, token: &CancellationToken, mut restart: F) -> Result<i32>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<i32>>,
    {
        let mut attempt = 0;
        loop {
            let status = restart().await?;
            if status == 0 || token.is_cancelled() {
                return Ok(status);
            }
            if attempt >= self.max_restarts {
                tracing::warn!(restarts = attempt, status, "giving up on restarting the app");
                return Ok(status);
            }

            let pause = self.delay_for(attempt);
            eprintln!(
                "App exited with exit code {status}. Will attempt restart in {} seconds.",
                pause.as_secs_f64()
            );
            tokio::select! {
                () = tokio::time::sleep(pause) => {}
                () = token.cancelled() => return Ok(status),
            }
            attempt += 1;
        }
    }
}
