//! Terminal entry point for the car ownership registry.
//!
//! # Responsibility
//! - Open the registry database once and keep it for the whole session.
//! - Drive the interactive form over stdin/stdout.

mod config;
mod registry_table;
mod session;

use car_registry_core::db::open_db;
use car_registry_core::{core_version, init_logging, CarService, SqliteCarRepository};
use config::CliConfig;
use log::info;
use session::Session;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        // Logging failures are non-fatal.
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "failed to open registry `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteCarRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("registry unavailable: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = CarService::new(repo);

    println!("Car Ownership Registry v{}", core_version());
    info!("event=cli_start module=cli status=ok");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = Session::new(&service, stdin.lock(), stdout.lock()).run();

    match result {
        Ok(()) => {
            info!("event=cli_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("terminal I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
