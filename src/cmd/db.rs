// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `db` command.

use crate::cli::db::{DbArgs, DbOperation};
use crate::cli::global::GlobalOptions;
use crate::core::env::container::Env;
use crate::db::{self, DbTarget, ECHO};
use crate::error::Result;
use crate::signals::{Signal, Signals};

use super::{Session, cancel_on_ctrl_c};

/// Signal hub used by the command: every signal is logged.
#[must_use]
pub fn logging_signals() -> Signals {
    let mut signals = Signals::new();
    for signal in Signal::ALL {
        signals.connect(signal, move |app| {
            tracing::info!(app = app.name(), %signal, "database signal");
        });
    }
    signals
}

/// Main handler for the db command.
///
/// # Errors
///
/// Returns an error if the application cannot be created or the reset fails.
pub async fn run_db_command(args: &DbArgs, global: &GlobalOptions, base: Env) -> Result<()> {
    let session = Session::load(global, base, &[])?;
    let mut app = session.create_app(global)?;
    app.settings_mut().insert(ECHO, args.echo_setting());

    match args.operation {
        DbOperation::Reset => {
            let target = DbTarget::from_app(&app)?;
            let token = cancel_on_ctrl_c();
            db::reset(&app, &session.env, &logging_signals(), &token).await?;
            println!("Database {} reset.", target.database());
        }
    }
    Ok(())
}
