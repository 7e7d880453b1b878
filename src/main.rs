// appconfig-rs: Application Configuration Loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Dev (default) | Serve | Db | Options
//!
//! exit 0 ok | 1 failure | 13 privileged port
//! ```

use std::process::ExitCode;

use appconfig_rs::cli::global::GlobalOptions;
use appconfig_rs::cli::{self, Command};
use appconfig_rs::cli::dev::DevArgs;
use appconfig_rs::cmd::{MISSING_APP_MESSAGE, exit_code};
use appconfig_rs::cmd::db::run_db_command;
use appconfig_rs::cmd::dev::run_dev_command;
use appconfig_rs::cmd::options::run_options_command;
use appconfig_rs::cmd::serve::run_serve_command;
use appconfig_rs::core::env::current_env;
use appconfig_rs::logging::init_logging;
use appconfig_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let lists_backends = matches!(&cli.command, Some(Command::Serve(args)) if args.list);
    if cli.global.app_name().is_none() && !lists_backends {
        println!("{MISSING_APP_MESSAGE}");
        return ExitCode::FAILURE;
    }

    let env = current_env();
    let result = match &cli.command {
        Some(Command::Dev(args)) => run_dev_command(args, &cli.global, env).await,
        None => run_dev_command(&DevArgs::default(), &cli.global, env).await,
        Some(Command::Serve(args)) => run_serve_command(args, &cli.global, env).await,
        Some(Command::Db(args)) => run_db_command(args, &cli.global, env).await,
        Some(Command::Options) => run_options_command(&cli.global, env),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
