//! HealthGuard Core Library
//!
//! Patient-held health records with auditable, patient-controlled consent.
//!
//! # Architecture
//!
//! ```text
//!        Host UI (Dashboard / Vault / Consent screens)
//!                            │
//!            add record · grant consent · revoke consent
//!                            │
//!               ┌────────────▼────────────┐
//!               │         Session         │
//!               │   (the only writer)     │
//!               └──┬─────────┬─────────┬──┘
//!                  │         │         │
//!                  ▼         ▼         ▼
//!             RecordStore ConsentStore AuditLog
//!              (prepend)   (prepend /  (prepend,
//!                           filter)    hash chain)
//!                                        │
//!                                        ▼
//!                                  Audit Export
//! ```
//!
//! # Core Principle
//!
//! **Every mutation is audited.** Each session operation updates exactly one
//! store and prepends exactly one audit entry; nothing else writes state.
//!
//! # Modules
//!
//! - [`models`]: Domain types (MedicalRecord, ConsentGrant, AuditEntry, PatientProfile)
//! - [`store`]: In-memory record and consent stores
//! - [`audit`]: Append-only audit log with SHA-256 hash chain
//! - [`session`]: The controller and its read-only snapshots
//! - [`export`]: Audit trail export (JSON / CSV)
//! - [`config`]: Session configuration and logging setup

pub mod audit;
pub mod config;
pub mod export;
pub mod models;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use audit::{AuditError, AuditLog};
pub use config::SessionConfig;
pub use export::{AuditExport, AuditExporter};
pub use models::{
    AccessMode, AuditEntry, AuditEventKind, ConsentGrant, GrantStatus, MedicalRecord,
    NewConsentGrant, PatientProfile, RecordType,
};
pub use session::{ConsentSnapshot, DashboardSnapshot, Session, VaultSnapshot};
pub use store::{ConsentStore, RecordStore};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HealthGuardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Integrity error: {0}")]
    IntegrityError(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl From<models::ModelError> for HealthGuardError {
    fn from(e: models::ModelError) -> Self {
        HealthGuardError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for HealthGuardError {
    fn from(e: config::ConfigError) -> Self {
        HealthGuardError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for HealthGuardError {
    fn from(e: serde_json::Error) -> Self {
        HealthGuardError::SerializationError(e.to_string())
    }
}

impl From<AuditError> for HealthGuardError {
    fn from(e: AuditError) -> Self {
        HealthGuardError::IntegrityError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HealthGuardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HealthGuardError::LockPoisoned(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a session for a patient. `config_json` may be empty.
#[uniffi::export]
pub fn open_session(
    profile: FfiPatientProfile,
    config_json: String,
) -> Result<Arc<HealthGuardCore>, HealthGuardError> {
    open_session_with_state(profile, config_json, Vec::new(), Vec::new())
}

/// Open a session seeded with existing records and grants, newest first.
///
/// Seeded state is not audited. Fails if any record type, mode or status
/// string is unknown.
#[uniffi::export]
pub fn open_session_with_state(
    profile: FfiPatientProfile,
    config_json: String,
    records: Vec<FfiMedicalRecord>,
    grants: Vec<FfiConsentGrant>,
) -> Result<Arc<HealthGuardCore>, HealthGuardError> {
    let config = SessionConfig::from_json(&config_json)?;
    let records = records
        .into_iter()
        .map(MedicalRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let grants = grants
        .into_iter()
        .map(ConsentGrant::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let session = Session::new(profile.into(), config)
        .with_records(records)
        .with_grants(grants);
    tracing::info!(
        patient_id = %session.profile().id,
        records = session.records().len(),
        grants = session.consents().len(),
        "Session opened"
    );
    Ok(Arc::new(HealthGuardCore {
        session: Arc::new(Mutex::new(session)),
    }))
}

/// Install the default log subscriber (honors `RUST_LOG`).
#[uniffi::export]
pub fn enable_logging() {
    config::init_logging();
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HealthGuardCore {
    session: Arc<Mutex<Session>>,
}

#[uniffi::export]
impl HealthGuardCore {
    // =========================================================================
    // Vault Operations
    // =========================================================================

    /// Add a record to the vault.
    pub fn add_record(&self, record: FfiMedicalRecord) -> Result<(), HealthGuardError> {
        let record = MedicalRecord::try_from(record)?;
        let mut session = self.session.lock()?;
        session.add_record(record);
        Ok(())
    }

    /// List all records, newest first.
    pub fn list_records(&self) -> Result<Vec<FfiMedicalRecord>, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.records().iter().cloned().map(Into::into).collect())
    }

    /// List records of one category (e.g., "X-Ray"), newest first.
    pub fn list_records_by_type(
        &self,
        record_type: String,
    ) -> Result<Vec<FfiMedicalRecord>, HealthGuardError> {
        let record_type: RecordType = record_type.parse()?;
        let session = self.session.lock()?;
        Ok(session
            .records()
            .by_type(record_type)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect())
    }

    // =========================================================================
    // Consent Operations
    // =========================================================================

    /// Grant a practitioner access.
    pub fn grant_consent(
        &self,
        grant: FfiNewConsentGrant,
    ) -> Result<FfiConsentGrant, HealthGuardError> {
        let grant = NewConsentGrant::try_from(grant)?;
        let mut session = self.session.lock()?;
        Ok(session.grant_consent(grant).into())
    }

    /// Revoke a grant. Returns the removed grant, if any.
    pub fn revoke_consent(&self, id: String) -> Result<Option<FfiConsentGrant>, HealthGuardError> {
        let mut session = self.session.lock()?;
        Ok(session.revoke_consent(&id).map(Into::into))
    }

    /// List live grants, newest first.
    pub fn list_grants(&self) -> Result<Vec<FfiConsentGrant>, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.consents().iter().cloned().map(Into::into).collect())
    }

    // =========================================================================
    // Audit Operations
    // =========================================================================

    /// Record a practitioner access reported by the host.
    pub fn report_access(
        &self,
        actor: String,
        action: String,
        purpose: String,
    ) -> Result<(), HealthGuardError> {
        let mut session = self.session.lock()?;
        session.report_access(actor, action, purpose);
        Ok(())
    }

    /// Verify the audit hash chain.
    pub fn verify_audit_log(&self) -> Result<(), HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.audit_log().verify()?)
    }

    /// Hash of the newest audit entry.
    pub fn audit_head_hash(&self) -> Result<Option<String>, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.audit_log().head_hash().map(str::to_string))
    }

    // =========================================================================
    // Snapshot Operations
    // =========================================================================

    /// The session's patient profile.
    pub fn get_profile(&self) -> Result<FfiPatientProfile, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.profile().clone().into())
    }

    /// Dashboard snapshot with activity labels relative to now.
    pub fn get_dashboard(&self) -> Result<FfiDashboard, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.dashboard(chrono::Utc::now()).into())
    }

    /// Vault snapshot: records plus per-category counts.
    pub fn get_vault(&self) -> Result<FfiVault, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.vault().into())
    }

    /// Consent screen snapshot.
    pub fn get_consent_view(&self) -> Result<FfiConsentView, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(session.consent_view().into())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the audit log as JSON.
    pub fn export_audit_json(&self) -> Result<String, HealthGuardError> {
        let session = self.session.lock()?;
        let export = AuditExporter::new(&session).export_all();
        Ok(export.to_json()?)
    }

    /// Export the audit log as CSV.
    pub fn export_audit_csv(&self) -> Result<String, HealthGuardError> {
        let session = self.session.lock()?;
        Ok(AuditExporter::new(&session).export_all().to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientProfile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub blood_group: String,
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,
}

impl From<FfiPatientProfile> for PatientProfile {
    fn from(p: FfiPatientProfile) -> Self {
        PatientProfile {
            id: p.id,
            name: p.name,
            age: p.age,
            blood_group: p.blood_group,
            allergies: p.allergies,
            chronic_conditions: p.chronic_conditions,
        }
    }
}

impl From<PatientProfile> for FfiPatientProfile {
    fn from(p: PatientProfile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
            blood_group: p.blood_group,
            allergies: p.allergies,
            chronic_conditions: p.chronic_conditions,
        }
    }
}

/// FFI-safe medical record. `record_type` uses display labels ("Blood Test", "X-Ray", ...).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub id: String,
    pub date: String,
    pub record_type: String,
    pub facility: String,
    pub doctor: String,
    pub summary: Option<String>,
    pub insights: Option<Vec<String>>,
    pub file_url: Option<String>,
    pub is_duplicate: Option<bool>,
}

impl TryFrom<FfiMedicalRecord> for MedicalRecord {
    type Error = models::ModelError;

    fn try_from(r: FfiMedicalRecord) -> Result<Self, Self::Error> {
        Ok(MedicalRecord {
            id: r.id,
            date: r.date,
            record_type: r.record_type.parse()?,
            facility: r.facility,
            doctor: r.doctor,
            summary: r.summary,
            insights: r.insights,
            file_url: r.file_url,
            is_duplicate: r.is_duplicate,
        })
    }
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(r: MedicalRecord) -> Self {
        Self {
            id: r.id,
            date: r.date,
            record_type: r.record_type.to_string(),
            facility: r.facility,
            doctor: r.doctor,
            summary: r.summary,
            insights: r.insights,
            file_url: r.file_url,
            is_duplicate: r.is_duplicate,
        }
    }
}

/// FFI-safe grant request. `mode` is "EMERGENCY", "STANDARD" or "INCOGNITO".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewConsentGrant {
    pub doctor_name: String,
    pub specialization: String,
    pub facility: String,
    pub expiry_date: String,
    pub mode: String,
}

impl TryFrom<FfiNewConsentGrant> for NewConsentGrant {
    type Error = models::ModelError;

    fn try_from(g: FfiNewConsentGrant) -> Result<Self, Self::Error> {
        Ok(NewConsentGrant {
            doctor_name: g.doctor_name,
            specialization: g.specialization,
            facility: g.facility,
            expiry_date: g.expiry_date,
            mode: g.mode.parse()?,
        })
    }
}

/// FFI-safe consent grant.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsentGrant {
    pub id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub facility: String,
    pub expiry_date: String,
    pub mode: String,
    pub status: String,
}

impl From<ConsentGrant> for FfiConsentGrant {
    fn from(g: ConsentGrant) -> Self {
        Self {
            id: g.id,
            doctor_name: g.doctor_name,
            specialization: g.specialization,
            facility: g.facility,
            expiry_date: g.expiry_date,
            mode: g.mode.to_string(),
            status: g.status.to_string(),
        }
    }
}

impl TryFrom<FfiConsentGrant> for ConsentGrant {
    type Error = models::ModelError;

    fn try_from(g: FfiConsentGrant) -> Result<Self, Self::Error> {
        Ok(ConsentGrant {
            id: g.id,
            doctor_name: g.doctor_name,
            specialization: g.specialization,
            facility: g.facility,
            expiry_date: g.expiry_date,
            mode: g.mode.parse()?,
            status: g.status.parse()?,
        })
    }
}

/// FFI-safe activity feed item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiActivityItem {
    pub id: String,
    pub timestamp: String,
    pub actor: String,
    pub action: String,
    pub purpose: String,
}

impl From<session::ActivityItem> for FfiActivityItem {
    fn from(a: session::ActivityItem) -> Self {
        Self {
            id: a.id,
            timestamp: a.timestamp,
            actor: a.actor,
            action: a.action,
            purpose: a.purpose,
        }
    }
}

/// FFI-safe dashboard snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboard {
    pub profile: FfiPatientProfile,
    pub records: Vec<FfiMedicalRecord>,
    pub activity: Vec<FfiActivityItem>,
    pub active_grant_count: u32,
}

impl From<DashboardSnapshot> for FfiDashboard {
    fn from(d: DashboardSnapshot) -> Self {
        Self {
            profile: d.profile.into(),
            records: d.records.into_iter().map(Into::into).collect(),
            activity: d.activity.into_iter().map(Into::into).collect(),
            active_grant_count: d.active_grant_count as u32,
        }
    }
}

/// FFI-safe per-category record count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecordTypeCount {
    pub record_type: String,
    pub count: u32,
}

impl From<session::RecordTypeCount> for FfiRecordTypeCount {
    fn from(c: session::RecordTypeCount) -> Self {
        Self {
            record_type: c.record_type.to_string(),
            count: c.count as u32,
        }
    }
}

/// FFI-safe vault snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVault {
    pub records: Vec<FfiMedicalRecord>,
    pub counts: Vec<FfiRecordTypeCount>,
}

impl From<VaultSnapshot> for FfiVault {
    fn from(v: VaultSnapshot) -> Self {
        Self {
            records: v.records.into_iter().map(Into::into).collect(),
            counts: v.counts.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe consent screen snapshot.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConsentView {
    pub grants: Vec<FfiConsentGrant>,
}

impl From<ConsentSnapshot> for FfiConsentView {
    fn from(c: ConsentSnapshot) -> Self {
        Self {
            grants: c.grants.into_iter().map(Into::into).collect(),
        }
    }
}
