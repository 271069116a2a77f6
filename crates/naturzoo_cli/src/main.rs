//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `naturzoo_core` wiring end to end: open a store, build the `Zoo`,
//!   print the exposed counts and the activity log.
//!
//! Usage: `naturzoo_cli [DB_PATH]`. Without a path an in-memory store is used.
//! Set `NATURZOO_LOG_DIR` to an absolute directory to enable file logging.

use naturzoo_core::db::{open_db, open_db_in_memory};
use naturzoo_core::{core_version, default_log_level, init_logging, SqliteStorage, Zoo};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("naturzoo_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("NATURZOO_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage)?;

    println!("naturzoo_core version={}", core_version());
    let counts = [
        ("animals", zoo.get_animal_count()?),
        ("buildings", zoo.get_building_count()?),
        ("enclosures", zoo.get_enclosure_count()?),
        ("foodplans", zoo.get_foodplan_count()?),
        ("food", zoo.get_food_count()?),
        ("guardians", zoo.get_guardian_count()?),
        ("suppliers", zoo.get_supplier_count()?),
        ("territories", zoo.get_territory_count()?),
    ];
    for (label, count) in counts {
        println!("{label}={count}");
    }
    println!("addresses_selectable={}", zoo.get_address_dropdown()?.len());

    for line in zoo.get_log()? {
        println!("log {line}");
    }
    Ok(())
}
