//! Read-only snapshots handed to the UI host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Session;
use crate::models::{AuditEntry, ConsentGrant, MedicalRecord, PatientProfile, RecordType};

/// One line of the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    /// Relative label ("Just now", "2h ago")
    pub timestamp: String,
    pub actor: String,
    pub action: String,
    pub purpose: String,
}

impl ActivityItem {
    fn from_entry(entry: &AuditEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp_label(now),
            actor: entry.actor.clone(),
            action: entry.action.clone(),
            purpose: entry.purpose.clone(),
        }
    }
}

/// Dashboard view: profile, records and the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub profile: PatientProfile,
    pub records: Vec<MedicalRecord>,
    pub activity: Vec<ActivityItem>,
    pub active_grant_count: usize,
}

/// Number of vault records in one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordTypeCount {
    pub record_type: RecordType,
    pub count: usize,
}

/// Vault view: all records plus per-category counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSnapshot {
    pub records: Vec<MedicalRecord>,
    /// Non-empty categories only, in `RecordType::ALL` order
    pub counts: Vec<RecordTypeCount>,
}

/// Consent screen view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentSnapshot {
    pub grants: Vec<ConsentGrant>,
}

impl Session {
    /// Snapshot for the dashboard, with activity labels relative to `now`.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot {
            profile: self.profile.clone(),
            records: self.records.to_vec(),
            activity: self
                .audit
                .iter()
                .map(|e| ActivityItem::from_entry(e, now))
                .collect(),
            active_grant_count: self.consents.iter().filter(|g| g.is_active()).count(),
        }
    }

    /// Snapshot for the vault.
    pub fn vault(&self) -> VaultSnapshot {
        let counts = RecordType::ALL
            .into_iter()
            .map(|record_type| RecordTypeCount {
                record_type,
                count: self.records.by_type(record_type).len(),
            })
            .filter(|c| c.count > 0)
            .collect();

        VaultSnapshot {
            records: self.records.to_vec(),
            counts,
        }
    }

    /// Snapshot for the consent screen.
    pub fn consent_view(&self) -> ConsentSnapshot {
        ConsentSnapshot {
            grants: self.consents.to_vec(),
        }
    }
}
