//! Patient list & search screen.
//!
//! Renders the current result table, then dispatches the screen actions:
//! search, clear filter, details, edit, remove, export, back. Edit and
//! remove are reached through an identifier prompt, matching the modal
//! flows of the form.

use std::io::{self, BufRead, Write};

use clinic_registry_core::{
    Database, EditForm, ExportOutcome, PatientListing, PatientRegistry, ReportExporter,
};

use crate::console::Console;

/// Placeholder row shown instead of an empty table.
const EMPTY_ROW: &str = "No patients found.";

/// List & search screen. The active filter survives between visits.
pub struct ListScreen {
    filter: String,
}

impl ListScreen {
    pub fn new() -> Self {
        Self {
            filter: String::new(),
        }
    }

    pub fn show<R: BufRead, W: Write>(
        &mut self,
        db: &Database,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        loop {
            let registry = PatientRegistry::new(db);
            let rows = match registry.list(&self.filter) {
                Ok(rows) => rows,
                Err(e) => {
                    console.notify_error(&e.to_string())?;
                    return Ok(());
                }
            };

            self.render_table(&rows, console)?;

            console.line(
                "  [s] Search   [c] Clear filter   [d] Details   [e] Edit   [r] Remove   [x] Export   [b] Back",
            )?;
            match console.prompt("Action")?.as_str() {
                "s" => self.filter = console.prompt("Search (name or national ID)")?,
                "c" => self.filter.clear(),
                "d" => details(&rows, db, console)?,
                "e" => edit(db, console)?,
                "r" => remove(db, console)?,
                "x" => export(db, console)?,
                "b" => return Ok(()),
                _ => console.notify_error("Unknown action.")?,
            }
        }
    }

    fn render_table<R: BufRead, W: Write>(
        &self,
        rows: &[PatientListing],
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        console.line("")?;
        console.line("---- Patients ----")?;
        if !self.filter.trim().is_empty() {
            console.line(&format!("Results for: '{}'", self.filter.trim()))?;
        }

        console.line(&format!(
            "     {:<35} {:<15} {:<5} {:<15}",
            "Name", "National ID", "Age", "Phone"
        ))?;
        if rows.is_empty() {
            console.line(&format!("     {EMPTY_ROW}"))?;
        } else {
            for (i, row) in rows.iter().enumerate() {
                console.line(&format!(
                    "{:>3}. {:<35} {:<15} {:<5} {:<15}",
                    i + 1,
                    row.name,
                    row.national_id,
                    row.age,
                    row.phone
                ))?;
            }
        }
        console.line("")
    }
}

/// Modal with the full record for a row selected by number.
fn details<R: BufRead, W: Write>(
    rows: &[PatientListing],
    db: &Database,
    console: &mut Console<R, W>,
) -> io::Result<()> {
    if rows.is_empty() {
        return console.notify_error("Select a patient row to see details.");
    }

    let answer = console.prompt("Row number")?;
    let selected = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| rows.get(i));
    let Some(row) = selected else {
        return console.notify_error("Invalid selection. Choose a listed row number.");
    };

    let registry = PatientRegistry::new(db);
    match registry.get(&row.national_id) {
        Ok(patient) => {
            console.line("")?;
            console.line(&format!("Name:        {}", patient.name))?;
            console.line(&format!("National ID: {}", patient.national_id_display()))?;
            console.line(&format!("Age:         {} years", patient.age))?;
            console.line(&format!("Phone:       {}", patient.phone_display()))?;
            console.line(&format!("Created:     {}", patient.created_at))?;
            console.line(&format!("Updated:     {}", patient.updated_at))?;
            console.pause()
        }
        Err(e) => console.notify_error(&e.to_string()),
    }
}

/// Edit modal reached via an identifier prompt: loads the current record,
/// presents each field pre-filled (an empty answer keeps the value), then
/// delegates to the registry.
fn edit<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    let raw_id = console.prompt("National ID of the patient to edit")?;
    if raw_id.is_empty() {
        return Ok(());
    }

    let registry = PatientRegistry::new(db);
    let current = match registry.get(&raw_id) {
        Ok(patient) => patient,
        Err(e) => return console.notify_error(&e.to_string()),
    };

    console.line(&format!(
        "Editing {} ({})",
        current.name,
        current.national_id_display()
    ))?;
    let form = EditForm {
        name: console.prompt_with_default("Name", &current.name)?,
        age: console.prompt_with_default("Age", &current.age.to_string())?,
        phone: console.prompt_with_default("Phone", current.phone.as_deref().unwrap_or(""))?,
    };

    match registry.update(&raw_id, &form) {
        Ok(()) => console.notify("Patient data updated."),
        Err(e) => console.notify_error(&e.to_string()),
    }
}

/// Remove flow reached via an identifier prompt.
fn remove<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    let raw_id = console.prompt("National ID of the patient to remove")?;
    if raw_id.is_empty() {
        return Ok(());
    }

    let registry = PatientRegistry::new(db);
    match registry.remove(&raw_id) {
        Ok(()) => console.notify(&format!("Patient with national ID {raw_id} removed.")),
        Err(e) => console.notify_error(&e.to_string()),
    }
}

/// Export the full registry, ignoring the active filter.
fn export<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    let exporter = ReportExporter::new(db);
    match exporter.export_all() {
        Ok(ExportOutcome::Written { path, total }) => console.notify(&format!(
            "Report with {total} patients saved to {}.",
            path.display()
        )),
        Ok(ExportOutcome::Empty) => {
            console.notify("There are no registered patients to export.")
        }
        Err(e) => console.notify_error(&e.to_string()),
    }
}
