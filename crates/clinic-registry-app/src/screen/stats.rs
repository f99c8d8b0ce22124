//! Registry statistics screen.

use std::io::{self, BufRead, Write};

use clinic_registry_core::{Database, PatientRegistry};

use crate::console::Console;

/// Compute and display total count and mean age on demand.
pub fn show<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    let registry = PatientRegistry::new(db);
    match registry.stats() {
        Ok(stats) => {
            console.line("")?;
            console.line("---- Statistics ----")?;
            console.line(&format!("Registered patients: {}", stats.total))?;
            match stats.mean_age {
                Some(mean) => console.line(&format!("Mean patient age: {mean:.2} years"))?,
                None => console.line("No patients registered to compute a mean age.")?,
            }
            console.pause()
        }
        Err(e) => console.notify_error(&e.to_string()),
    }
}
