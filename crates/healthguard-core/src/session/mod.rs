//! The session controller.
//!
//! A [`Session`] owns the record vault, the consent store and the audit
//! log for one patient. It is the only writer: every mutating operation
//! updates exactly one store and then prepends exactly one audit entry.

mod snapshot;

pub use snapshot::*;

use crate::audit::AuditLog;
use crate::config::SessionConfig;
use crate::models::{AuditEventKind, ConsentGrant, MedicalRecord, NewConsentGrant, PatientProfile};
use crate::store::{ConsentStore, RecordStore};

/// One patient's in-memory vault session.
#[derive(Debug, Clone)]
pub struct Session {
    profile: PatientProfile,
    config: SessionConfig,
    records: RecordStore,
    consents: ConsentStore,
    audit: AuditLog,
}

impl Session {
    /// Create an empty session for a patient.
    pub fn new(profile: PatientProfile, config: SessionConfig) -> Self {
        Self {
            profile,
            config,
            records: RecordStore::new(),
            consents: ConsentStore::new(),
            audit: AuditLog::new(),
        }
    }

    /// Start with host-provided records (newest first). Not audited.
    pub fn with_records(mut self, records: Vec<MedicalRecord>) -> Self {
        self.records = RecordStore::from_records(records);
        self
    }

    /// Start with host-provided grants (newest first). Not audited.
    pub fn with_grants(mut self, grants: Vec<ConsentGrant>) -> Self {
        self.consents = ConsentStore::from_grants(grants);
        self
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Add a record to the vault.
    pub fn add_record(&mut self, record: MedicalRecord) {
        tracing::debug!(record_id = %record.id, record_type = %record.record_type, "Adding record");
        self.records.add(record);

        let purpose = self.config.purposes.record_added.clone();
        self.append_audit(AuditEventKind::RecordAdded, "Added New Record".to_string(), purpose);
    }

    /// Grant a practitioner access. Returns the stored grant with its new id.
    pub fn grant_consent(&mut self, new_grant: NewConsentGrant) -> ConsentGrant {
        let grant = self.consents.grant(new_grant).clone();
        tracing::info!(grant_id = %grant.id, mode = %grant.mode, "Consent granted");

        let action = format!("Granted Access to Dr. {}", grant.doctor_name);
        let purpose = self.config.purposes.consent_granted.clone();
        self.append_audit(AuditEventKind::ConsentGranted, action, purpose);
        grant
    }

    /// Revoke a grant by id.
    ///
    /// Returns the removed grant, or `None` if no live grant had that id.
    /// The revocation is audited either way.
    pub fn revoke_consent(&mut self, id: &str) -> Option<ConsentGrant> {
        let removed = self.consents.revoke(id);
        match &removed {
            Some(_) => tracing::info!(grant_id = %id, "Consent revoked"),
            None => tracing::debug!(grant_id = %id, "Revoke requested for unknown grant"),
        }

        let purpose = self.config.purposes.consent_revoked.clone();
        self.append_audit(AuditEventKind::ConsentRevoked, "Revoked Consent Grant".to_string(), purpose);
        removed
    }

    /// Record an access reported by the host (e.g., a practitioner viewing records).
    pub fn report_access(
        &mut self,
        actor: impl Into<String>,
        action: impl Into<String>,
        purpose: impl Into<String>,
    ) {
        self.audit
            .record(AuditEventKind::AccessReported, actor, action, purpose);
    }

    fn append_audit(&mut self, kind: AuditEventKind, action: String, purpose: String) {
        let actor = self.actor().to_string();
        self.audit.record(kind, actor, action, purpose);
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Name recorded as the actor of patient-initiated operations.
    pub fn actor(&self) -> &str {
        self.config.actor.as_deref().unwrap_or(&self.profile.name)
    }

    pub fn profile(&self) -> &PatientProfile {
        &self.profile
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn consents(&self) -> &ConsentStore {
        &self.consents
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }
}
