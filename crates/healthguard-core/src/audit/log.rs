//! The audit log store.

use std::collections::VecDeque;

use super::{entry_hash, verify_chain, AuditResult};
use crate::models::{AuditEntry, AuditEventKind};

/// Append-only audit log, newest first.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from entries ordered newest first (e.g., a previous export).
    ///
    /// The chain is not checked here; call [`AuditLog::verify`].
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Prepend a new entry stamped with the current time and chained to the head.
    pub fn record(
        &mut self,
        kind: AuditEventKind,
        actor: impl Into<String>,
        action: impl Into<String>,
        purpose: impl Into<String>,
    ) -> &AuditEntry {
        let mut entry = AuditEntry {
            id: uuid::Uuid::new_v4().to_string(),
            recorded_at: chrono::Utc::now(),
            actor: actor.into(),
            action: action.into(),
            purpose: purpose.into(),
            kind,
            prev_hash: self.head_hash().unwrap_or_default().to_string(),
            hash: String::new(),
        };
        entry.hash = entry_hash(&entry);

        tracing::debug!(entry_id = %entry.id, kind = entry.kind.as_str(), "Audit entry recorded");

        self.entries.push_front(entry);
        &self.entries[0]
    }

    /// Hash of the newest entry.
    pub fn head_hash(&self) -> Option<&str> {
        self.entries.front().map(|e| e.hash.as_str())
    }

    /// Verify the whole hash chain.
    pub fn verify(&self) -> AuditResult<()> {
        let result = verify_chain(self.entries.iter().rev());
        if let Err(e) = &result {
            tracing::warn!("Audit chain verification failed: {e}");
        }
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AuditEntry> {
        self.entries.front()
    }

    /// Owned copy of all entries, newest first.
    pub fn to_vec(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditError;

    fn log_with(n: usize) -> AuditLog {
        let mut log = AuditLog::new();
        for i in 0..n {
            log.record(
                AuditEventKind::AccessReported,
                "Dr. Vikram Seth",
                format!("Accessed record {}", i),
                "Consultation",
            );
        }
        log
    }

    #[test]
    fn test_record_prepends() {
        let log = log_with(3);
        let actions: Vec<_> = log.iter().map(|e| e.action.as_str()).collect();
        assert_eq!(
            actions,
            vec!["Accessed record 2", "Accessed record 1", "Accessed record 0"]
        );
    }

    #[test]
    fn test_first_entry_has_empty_prev_hash() {
        let log = log_with(1);
        let entry = log.latest().unwrap();
        assert!(entry.prev_hash.is_empty());
        assert_eq!(log.head_hash(), Some(entry.hash.as_str()));
    }

    #[test]
    fn test_entries_link_to_predecessor() {
        let log = log_with(2);
        let entries = log.to_vec();
        assert_eq!(entries[0].prev_hash, entries[1].hash);
    }

    #[test]
    fn test_head_hash_changes() {
        let mut log = log_with(1);
        let before = log.head_hash().unwrap().to_string();
        log.record(AuditEventKind::RecordAdded, "Rahul Sharma", "Added New Record", "Self Management");
        assert_ne!(log.head_hash().unwrap(), before);
    }

    #[test]
    fn test_verify_after_tamper() {
        let mut log = log_with(3);
        assert!(log.verify().is_ok());

        log.entries[1].purpose = "Research".into();
        assert!(matches!(log.verify(), Err(AuditError::HashMismatch { .. })));
    }

    #[test]
    fn test_verify_after_removal() {
        let mut log = log_with(3);
        log.entries.remove(1);
        assert_eq!(log.verify(), Err(AuditError::BrokenChain { index: 1 }));
    }

    #[test]
    fn test_from_entries_roundtrip_verifies() {
        let log = log_with(4);
        let rebuilt = AuditLog::from_entries(log.to_vec());
        assert!(rebuilt.verify().is_ok());
        assert_eq!(rebuilt.head_hash(), log.head_hash());
    }
}
