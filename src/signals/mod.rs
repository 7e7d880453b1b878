// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named lifecycle hooks.
//!
//! ```text
//! db reset:
//!   db-before-reset -> dropdb -> db-reset-dropped
//!                   -> createdb -> db-reset-created -> db-after-reset
//! ```
//!
//! Subscribers run synchronously, in connection order, on the thread that
//! emits.

use std::collections::BTreeMap;

use crate::app::App;


/// Signals emitted by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    DbBeforeReset,
    DbResetDropped,
    DbResetCreated,
    DbAfterReset,
}

impl Signal {
    pub const ALL: [Self; 4] = [
        Self::DbBeforeReset,
        Self::DbResetDropped,
        Self::DbResetCreated,
        Self::DbAfterReset,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DbBeforeReset => "db-before-reset",
            Self::DbResetDropped => "db-reset-dropped",
            Self::DbResetCreated => "db-reset-created",
            Self::DbAfterReset => "db-after-reset",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A subscriber callback.
pub type Receiver = Box<dyn Fn(&App) + Send + Sync>;

/// Hub connecting signals to their subscribers.
#[derive(Default)]
pub struct Signals {
    receivers: BTreeMap<Signal, Vec<Receiver>>,
}

impl Signals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `receiver` to `signal`.
    pub fn connect<F>(&mut self, signal: Signal, receiver: F)
    where
        F: Fn(&App) + Send + Sync + 'static,
    {
        self.receivers
            .entry(signal)
            .or_default()
            .push(Box::new(receiver));
    }

    /// Calls every subscriber of `signal` and returns how many ran.
    pub fn send(&self, signal: Signal, app: &App) -> usize {
        let receivers = self.receivers.get(&signal).map_or(&[][..], Vec::as_slice);
        tracing::debug!(%signal, receivers = receivers.len(), "signal");
        for receiver in receivers {
            receiver(app);
        }
        receivers.len()
    }

    #[must_use]
    pub fn receiver_count(&self, signal: Signal) -> usize {
        self.receivers.get(&signal).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for signal in Signal::ALL {
            map.entry(&signal.name(), &self.receiver_count(signal));
        }
        map.finish()
    }
}
