//! Medical record models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Category of a medical record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecordType {
    #[serde(rename = "Blood Test")]
    BloodTest,
    #[serde(rename = "X-Ray")]
    XRay,
    Prescription,
    Consultation,
    #[serde(rename = "MRI")]
    Mri,
    Vaccination,
}

impl RecordType {
    /// All record categories, in display order.
    pub const ALL: [RecordType; 6] = [
        RecordType::BloodTest,
        RecordType::XRay,
        RecordType::Prescription,
        RecordType::Consultation,
        RecordType::Mri,
        RecordType::Vaccination,
    ];

    /// Display label, as shown in the vault.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::BloodTest => "Blood Test",
            RecordType::XRay => "X-Ray",
            RecordType::Prescription => "Prescription",
            RecordType::Consultation => "Consultation",
            RecordType::Mri => "MRI",
            RecordType::Vaccination => "Vaccination",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::UnknownRecordType(s.to_string()))
    }
}

/// A single entry in the patient's document vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    /// Record ID, supplied by the uploader
    pub id: String,
    /// Date of the encounter or report (free-form)
    pub date: String,
    /// Record category
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Issuing facility
    pub facility: String,
    /// Responsible doctor or technician
    pub doctor: String,
    /// Short free-text summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Extracted highlights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<Vec<String>>,
    /// Reference to the attached file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Duplicate marker. Nothing in this crate sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_duplicate: Option<bool>,
}

impl MedicalRecord {
    /// Create a record with a fresh UUID and no optional fields.
    pub fn new(
        date: impl Into<String>,
        record_type: RecordType,
        facility: impl Into<String>,
        doctor: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date: date.into(),
            record_type,
            facility: facility.into(),
            doctor: doctor.into(),
            summary: None,
            insights: None,
            file_url: None,
            is_duplicate: None,
        }
    }

    /// Insights, or an empty slice when none were extracted.
    pub fn insights(&self) -> &[String] {
        self.insights.as_deref().unwrap_or(&[])
    }

    /// Check if a file is attached.
    pub fn has_attachment(&self) -> bool {
        self.file_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = MedicalRecord::new("2024-03-01", RecordType::XRay, "City Imaging", "Dr. Rao");
        assert_eq!(record.id.len(), 36); // UUID format
        assert_eq!(record.record_type, RecordType::XRay);
        assert!(record.summary.is_none());
        assert!(record.insights().is_empty());
        assert!(!record.has_attachment());
    }

    #[test]
    fn test_record_type_labels() {
        for t in RecordType::ALL {
            assert_eq!(t.as_str().parse::<RecordType>().unwrap(), t);
        }
        assert!(matches!(
            "CT Scan".parse::<RecordType>(),
            Err(ModelError::UnknownRecordType(_))
        ));
    }

    #[test]
    fn test_serde_uses_display_labels() {
        let mut record =
            MedicalRecord::new("2023-11-15", RecordType::BloodTest, "Metropolis Labs", "Lab Assistant");
        record.insights = Some(vec!["Vitamin D Deficiency".into()]);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""type":"Blood Test""#));
        assert!(json.contains(r#""insights":["Vitamin D Deficiency"]"#));
        assert!(!json.contains("fileUrl"));

        let back: MedicalRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
