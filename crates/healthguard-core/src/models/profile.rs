//! Patient profile models.

use serde::{Deserialize, Serialize};

/// The patient who owns the vault. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Patient ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Blood group (e.g., "B+")
    pub blood_group: String,
    /// Known allergies
    pub allergies: Vec<String>,
    /// Chronic conditions
    pub chronic_conditions: Vec<String>,
}

impl PatientProfile {
    /// Create a profile with no allergies or conditions.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        blood_group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            blood_group: blood_group.into(),
            allergies: Vec::new(),
            chronic_conditions: Vec::new(),
        }
    }

    /// Check if the patient has any recorded allergy.
    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty()
    }
}
