//! Patient registration screen.

use std::io::{self, BufRead, Write};

use clinic_registry_core::{Database, PatientRegistry, RegisterForm};

use crate::console::Console;

/// Collect the four form fields and delegate to the registry. Name,
/// national ID and age are required; the registry reports anything wrong
/// as a notification message.
pub fn show<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    console.line("")?;
    console.line("---- Register patient ----")?;

    let form = RegisterForm {
        name: console.prompt("Name")?,
        national_id: console.prompt("National ID (11 digits, separators allowed)")?,
        age: console.prompt("Age")?,
        phone: console.prompt("Phone (optional)")?,
    };

    let registry = PatientRegistry::new(db);
    match registry.register(&form) {
        Ok(patient) => console.notify(&format!(
            "Patient {} registered with national ID {}.",
            patient.name,
            patient.national_id_display()
        )),
        Err(e) => console.notify_error(&e.to_string()),
    }
}
