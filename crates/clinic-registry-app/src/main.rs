//! Clinic patient registry front-end.
//!
//! Opens the database, runs the interactive screen loop, and closes the
//! connection exactly once on shutdown. Failure to open the database is
//! the only fatal condition.

mod console;
mod screen;

use std::io;

use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use clinic_registry_core::Database;

use crate::console::Console;

/// Database file kept in the process working directory.
const DB_FILENAME: &str = "patients.db";

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let db = match Database::open(DB_FILENAME) {
        Ok(db) => db,
        Err(e) => {
            error!("could not open the patient database: {e}");
            anyhow::bail!("could not open the patient database: {e}");
        }
    };
    info!(path = DB_FILENAME, "patient database ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    screen::run(&db, &mut console)?;

    info!("shutting down, closing the database");
    drop(db);
    Ok(())
}
