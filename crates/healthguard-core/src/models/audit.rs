//! Audit log entry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of event an audit entry records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AuditEventKind {
    /// A record was added to the vault
    RecordAdded,
    /// A consent grant was created
    ConsentGranted,
    /// A consent grant was revoked
    ConsentRevoked,
    /// The host reported a practitioner access
    AccessReported,
}

impl AuditEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventKind::RecordAdded => "record_added",
            AuditEventKind::ConsentGranted => "consent_granted",
            AuditEventKind::ConsentRevoked => "consent_revoked",
            AuditEventKind::AccessReported => "access_reported",
        }
    }
}

/// A single entry in the access audit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Unique entry ID
    pub id: String,
    /// When the entry was recorded
    pub recorded_at: DateTime<Utc>,
    /// Claimed actor (not authenticated)
    pub actor: String,
    /// Human-readable action description
    pub action: String,
    /// Stated purpose of the action
    pub purpose: String,
    /// Event category
    pub kind: AuditEventKind,
    /// Hash of the previous (older) entry, empty for the first entry
    pub prev_hash: String,
    /// SHA-256 over `prev_hash` and the entry content, hex-encoded
    pub hash: String,
}

impl AuditEntry {
    /// Relative label for display ("Just now", "5m ago", "2h ago", "1d ago").
    pub fn timestamp_label(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.recorded_at);
        let minutes = elapsed.num_minutes();
        if minutes < 1 {
            "Just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if elapsed.num_hours() < 24 {
            format!("{}h ago", elapsed.num_hours())
        } else {
            format!("{}d ago", elapsed.num_days())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry_at(recorded_at: DateTime<Utc>) -> AuditEntry {
        AuditEntry {
            id: "l1".into(),
            recorded_at,
            actor: "Dr. Vikram Seth".into(),
            action: "Accessed Blood Records".into(),
            purpose: "Consultation".into(),
            kind: AuditEventKind::AccessReported,
            prev_hash: String::new(),
            hash: String::new(),
        }
    }

    #[test]
    fn test_timestamp_labels() {
        let now = Utc::now();
        assert_eq!(entry_at(now).timestamp_label(now), "Just now");
        assert_eq!(entry_at(now - Duration::seconds(59)).timestamp_label(now), "Just now");
        assert_eq!(entry_at(now - Duration::minutes(5)).timestamp_label(now), "5m ago");
        assert_eq!(entry_at(now - Duration::hours(2)).timestamp_label(now), "2h ago");
        assert_eq!(entry_at(now - Duration::hours(30)).timestamp_label(now), "1d ago");
    }

    #[test]
    fn test_clock_skew_reads_just_now() {
        let now = Utc::now();
        let entry = entry_at(now + Duration::minutes(3));
        assert_eq!(entry.timestamp_label(now), "Just now");
    }
}
