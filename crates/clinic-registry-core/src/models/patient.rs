//! Patient record models.

use serde::{Deserialize, Serialize};

use crate::national_id::format_national_id;

/// Marker displayed in place of an absent phone number.
pub const PHONE_UNAVAILABLE: &str = "N/A";

/// A patient record as stored in the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Database-assigned identifier, immutable.
    pub id: i64,
    /// Patient name
    pub name: String,
    /// National ID in canonical digits-only form, unique across the registry
    pub national_id: String,
    /// Age in years
    pub age: i64,
    /// Phone number; `None` when not provided
    pub phone: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// National ID in display form.
    pub fn national_id_display(&self) -> String {
        format_national_id(&self.national_id)
    }

    /// Phone number for display, substituting the "not available" marker.
    pub fn phone_display(&self) -> &str {
        self.phone
            .as_deref()
            .filter(|phone| !phone.is_empty())
            .unwrap_or(PHONE_UNAVAILABLE)
    }
}

/// Insert payload for a new patient; id and timestamps are assigned by the
/// database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    /// National ID in canonical digits-only form
    pub national_id: String,
    pub age: i64,
    pub phone: Option<String>,
}

/// A presentation row for the list screen and the report: formatted
/// national ID, phone marker substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientListing {
    pub name: String,
    /// National ID in display form
    pub national_id: String,
    pub age: i64,
    pub phone: String,
}

impl From<&Patient> for PatientListing {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            national_id: patient.national_id_display(),
            age: patient.age,
            phone: patient.phone_display().to_string(),
        }
    }
}
