//! Patient registry operations.
//!
//! Business layer over the database: required-field checks, identifier
//! canonicalization, age parsing, and typed failure outcomes the front-end
//! can branch on.

use thiserror::Error;
use tracing::debug;

use crate::db::{Database, DbError};
use crate::models::{NewPatient, Patient, PatientListing};
use crate::national_id::{format_national_id, strip_non_digits, InvalidNationalId, NationalId};

/// Registry errors. Every variant renders a message fit for a user-facing
/// notification.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidNationalId(#[from] InvalidNationalId),

    #[error("age must be a non-negative whole number")]
    InvalidAge,

    #[error("a patient with national ID {0} is already registered")]
    DuplicateNationalId(String),

    #[error("no patient found with national ID {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] DbError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Raw form input for the register operation. Age arrives as text, exactly
/// as typed.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub national_id: String,
    pub age: String,
    pub phone: String,
}

/// Raw form input for the edit operation. The national ID is the lookup key
/// and is not editable.
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub name: String,
    pub age: String,
    pub phone: String,
}

/// Registry-wide aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryStats {
    pub total: i64,
    /// Arithmetic mean of ages; `None` when the registry is empty.
    pub mean_age: Option<f64>,
}

/// Patient registry over an open database.
pub struct PatientRegistry<'a> {
    db: &'a Database,
}

impl<'a> PatientRegistry<'a> {
    /// Create a registry over an open database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new patient from raw form input.
    pub fn register(&self, form: &RegisterForm) -> RegistryResult<Patient> {
        let name = required(&form.name, "name")?;
        let raw_id = required(&form.national_id, "national ID")?;
        let age_text = required(&form.age, "age")?;

        let national_id = NationalId::parse(raw_id)?;
        let age = parse_age(age_text)?;

        let new = NewPatient {
            name: name.to_string(),
            national_id: national_id.as_str().to_string(),
            age,
            phone: optional(&form.phone),
        };

        match self.db.insert_patient(&new) {
            Ok(patient) => {
                debug!(id = patient.id, "patient registered");
                Ok(patient)
            }
            Err(DbError::Duplicate(_)) => {
                Err(RegistryError::DuplicateNationalId(national_id.formatted()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List records as presentation rows, ordered by name ascending. An
    /// empty or blank `term` returns the whole registry; anything else is a
    /// case-insensitive substring filter on name or national ID.
    pub fn list(&self, term: &str) -> RegistryResult<Vec<PatientListing>> {
        let term = term.trim();
        let patients = if term.is_empty() {
            self.db.list_patients()?
        } else {
            self.db.search_patients(term)?
        };
        Ok(patients.iter().map(PatientListing::from).collect())
    }

    /// Full record lookup by a possibly-formatted identifier.
    pub fn get(&self, raw_id: &str) -> RegistryResult<Patient> {
        let canonical = strip_non_digits(raw_id);
        self.db
            .get_patient(&canonical)?
            .ok_or_else(|| RegistryError::NotFound(format_national_id(&canonical)))
    }

    /// Replace name, age and phone of an existing patient. The identifier
    /// itself is not mutable through this path.
    pub fn update(&self, raw_id: &str, form: &EditForm) -> RegistryResult<()> {
        let name = required(&form.name, "name")?;
        let age = parse_age(required(&form.age, "age")?)?;
        let phone = optional(&form.phone);

        let canonical = strip_non_digits(raw_id);
        if self
            .db
            .update_patient(&canonical, name, age, phone.as_deref())?
        {
            debug!(national_id = %canonical, "patient updated");
            Ok(())
        } else {
            Err(RegistryError::NotFound(format_national_id(&canonical)))
        }
    }

    /// Remove a patient by a possibly-formatted identifier. Deletion is
    /// physical and immediate.
    pub fn remove(&self, raw_id: &str) -> RegistryResult<()> {
        let canonical = strip_non_digits(raw_id);
        if self.db.delete_patient(&canonical)? {
            debug!(national_id = %canonical, "patient removed");
            Ok(())
        } else {
            Err(RegistryError::NotFound(format_national_id(&canonical)))
        }
    }

    /// Total count and mean age. The mean is only computed when at least
    /// one record exists.
    pub fn stats(&self) -> RegistryResult<RegistryStats> {
        let total = self.db.count_patients()?;
        let mean_age = if total > 0 { self.db.mean_age()? } else { None };
        Ok(RegistryStats { total, mean_age })
    }
}

fn required<'s>(value: &'s str, field: &'static str) -> RegistryResult<&'s str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RegistryError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_age(text: &str) -> RegistryResult<i64> {
    match text.trim().parse::<i64>() {
        Ok(age) if age >= 0 => Ok(age),
        _ => Err(RegistryError::InvalidAge),
    }
}
