//! Screens of the registry form.
//!
//! Event dispatch is a synchronous menu loop: each screen collects input
//! through blocking console dialogs and delegates to the core registry.

mod list;
mod register;
mod stats;

use std::io::{self, BufRead, ErrorKind, Write};

use clinic_registry_core::Database;

use crate::console::Console;

/// Top-level event loop over the three screens. Returns when the user
/// exits or the input stream closes.
pub fn run<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> io::Result<()> {
    let mut list_screen = list::ListScreen::new();

    loop {
        console.line("")?;
        console.line("==== Clinic Patient Registry ====")?;
        console.line("  [1] Register patient")?;
        console.line("  [2] Patients (list & search)")?;
        console.line("  [3] Statistics")?;
        console.line("  [0] Exit")?;

        let choice = match console.prompt("Option") {
            Ok(choice) => choice,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };

        match choice.as_str() {
            "1" => register::show(db, console)?,
            "2" => list_screen.show(db, console)?,
            "3" => stats::show(db, console)?,
            "0" | "q" => break,
            _ => console.notify_error("Unknown option.")?,
        }
    }

    Ok(())
}
