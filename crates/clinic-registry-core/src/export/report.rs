//! Fixed-width plain-text patient report.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::db::{Database, DbError};
use crate::models::{Patient, PatientListing};

/// Report file written to the process working directory, overwritten on
/// each export.
pub const REPORT_FILENAME: &str = "patient_report.txt";

const BANNER_WIDTH: usize = 80;

/// Export errors. Non-fatal: the operation is aborted and reported.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("storage error: {0}")]
    Storage(#[from] DbError),

    #[error("could not write the report file: {0}")]
    Io(#[from] io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Outcome of a report export.
#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    /// Report written: path of the file and number of records it lists.
    Written { path: PathBuf, total: usize },
    /// Registry empty; no file was written.
    Empty,
}

/// Patient report exporter.
pub struct ReportExporter<'a> {
    db: &'a Database,
}

impl<'a> ReportExporter<'a> {
    /// Create a new report exporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Export the full registry to the working directory. Always re-reads
    /// the whole table, ignoring any active search filter.
    pub fn export_all(&self) -> ExportResult<ExportOutcome> {
        let cwd = std::env::current_dir()?;
        self.export_to(&cwd)
    }

    /// Export the full registry to `REPORT_FILENAME` inside `dir`.
    pub fn export_to(&self, dir: &Path) -> ExportResult<ExportOutcome> {
        let patients = self.db.list_patients()?;
        if patients.is_empty() {
            return Ok(ExportOutcome::Empty);
        }

        let generated_at = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
        let report = render_report(&patients, &generated_at);

        let path = dir.join(REPORT_FILENAME);
        fs::write(&path, &report)?;
        info!(path = %path.display(), total = patients.len(), "patient report written");

        Ok(ExportOutcome::Written {
            path,
            total: patients.len(),
        })
    }
}

/// Render the report text. Pure: same records and timestamp, same output.
pub fn render_report(patients: &[Patient], generated_at: &str) -> String {
    let banner = "=".repeat(BANNER_WIDTH);

    let mut lines = Vec::new();
    lines.push(banner.clone());
    lines.push("COMPLETE PATIENT REPORT - CLINIC REGISTRY".to_string());
    lines.push(format!("Generated: {generated_at}"));
    lines.push(banner.clone());
    lines.push(format!(
        "{:<35} {:<15} {:<5} {:<15}",
        "Name", "National ID", "Age", "Phone"
    ));
    lines.push("-".repeat(BANNER_WIDTH));

    for patient in patients {
        let row = PatientListing::from(patient);
        lines.push(format!(
            "{:<35} {:<15} {:<5} {:<15}",
            row.name, row.national_id, row.age, row.phone
        ));
    }

    lines.push(String::new());
    lines.push(banner.clone());
    lines.push(format!("Total patients: {}", patients.len()));
    lines.push(banner);

    lines.join("\n")
}
