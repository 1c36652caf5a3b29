//! Consent grant models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// How a practitioner may access the patient's data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessMode {
    /// Break-glass access
    Emergency,
    /// Normal scoped access
    Standard,
    /// Access without a patient-visible trail
    Incognito,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Emergency => "EMERGENCY",
            AccessMode::Standard => "STANDARD",
            AccessMode::Incognito => "INCOGNITO",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMERGENCY" => Ok(AccessMode::Emergency),
            "STANDARD" => Ok(AccessMode::Standard),
            "INCOGNITO" => Ok(AccessMode::Incognito),
            other => Err(ModelError::UnknownAccessMode(other.to_string())),
        }
    }
}

/// Grant status.
///
/// Only `Active` is ever produced: revocation deletes the grant and no
/// expiry sweep exists, so `Revoked` and `Expired` appear only in data
/// handed in by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum GrantStatus {
    #[default]
    Active,
    Revoked,
    Expired,
}

impl GrantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantStatus::Active => "Active",
            GrantStatus::Revoked => "Revoked",
            GrantStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for GrantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(GrantStatus::Active),
            "Revoked" => Ok(GrantStatus::Revoked),
            "Expired" => Ok(GrantStatus::Expired),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

/// A consent grant authorizing a practitioner to access the record vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsentGrant {
    /// Store-assigned grant ID
    pub id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub facility: String,
    /// Expiry date (free-form, display only)
    pub expiry_date: String,
    pub mode: AccessMode,
    pub status: GrantStatus,
}

impl ConsentGrant {
    /// Check if this grant is active.
    pub fn is_active(&self) -> bool {
        self.status == GrantStatus::Active
    }
}

/// Everything needed to create a grant. The store assigns id and status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewConsentGrant {
    pub doctor_name: String,
    pub specialization: String,
    pub facility: String,
    pub expiry_date: String,
    pub mode: AccessMode,
}

impl NewConsentGrant {
    pub fn new(
        doctor_name: impl Into<String>,
        specialization: impl Into<String>,
        facility: impl Into<String>,
        expiry_date: impl Into<String>,
        mode: AccessMode,
    ) -> Self {
        Self {
            doctor_name: doctor_name.into(),
            specialization: specialization.into(),
            facility: facility.into(),
            expiry_date: expiry_date.into(),
            mode,
        }
    }

    /// Attach an id and mark the grant active.
    pub(crate) fn into_grant(self, id: String) -> ConsentGrant {
        ConsentGrant {
            id,
            doctor_name: self.doctor_name,
            specialization: self.specialization,
            facility: self.facility,
            expiry_date: self.expiry_date,
            mode: self.mode,
            status: GrantStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_grant_is_active() {
        let grant = NewConsentGrant::new(
            "A. Verma",
            "Cardiologist",
            "Fortis",
            "2025-01-01",
            AccessMode::Standard,
        )
        .into_grant("g-1".into());

        assert_eq!(grant.id, "g-1");
        assert_eq!(grant.doctor_name, "A. Verma");
        assert!(grant.is_active());
    }

    #[test]
    fn test_access_mode_wire_format() {
        let json = serde_json::to_string(&AccessMode::Incognito).unwrap();
        assert_eq!(json, r#""INCOGNITO""#);
        assert_eq!("EMERGENCY".parse::<AccessMode>().unwrap(), AccessMode::Emergency);
        assert!("emergency".parse::<AccessMode>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Expired".parse::<GrantStatus>().unwrap(), GrantStatus::Expired);
        assert!(matches!(
            "Pending".parse::<GrantStatus>(),
            Err(ModelError::UnknownStatus(_))
        ));
    }
}
