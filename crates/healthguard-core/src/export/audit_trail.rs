//! Audit trail export with chain integrity metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::{verify_chain_from, AuditResult, HASH_ALGORITHM};
use crate::models::AuditEntry;
use crate::session::Session;

/// Audit export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditExportMetadata {
    /// Export format version
    pub format_version: String,
    /// Export timestamp
    pub exported_at: String,
    /// Hash algorithm used
    pub hash_algorithm: String,
    /// Patient the log belongs to
    pub patient_id: String,
    /// Hash of the newest exported entry
    pub head_hash: Option<String>,
    /// `prev_hash` of the oldest exported entry (empty for a full export)
    pub anchor_hash: String,
    /// Number of exported entries
    pub entry_count: usize,
    /// Exporting system identifier
    pub system_id: Option<String>,
}

/// Exported audit entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditExport {
    pub metadata: AuditExportMetadata,
    pub entries: Vec<AuditEntry>,
}

impl AuditExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a previously exported JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("id,recorded_at,kind,actor,action,purpose,prev_hash,hash\n");

        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                escape_csv(&entry.id),
                entry.recorded_at.to_rfc3339(),
                entry.kind.as_str(),
                escape_csv(&entry.actor),
                escape_csv(&entry.action),
                escape_csv(&entry.purpose),
                entry.prev_hash,
                entry.hash,
            ));
        }

        csv
    }

    /// Verify the exported chain segment against its anchor.
    pub fn verify(&self) -> AuditResult<()> {
        verify_chain_from(&self.metadata.anchor_hash, self.entries.iter().rev())
    }
}

/// Audit trail exporter.
pub struct AuditExporter<'a> {
    session: &'a Session,
    system_id: Option<String>,
}

impl<'a> AuditExporter<'a> {
    /// Create a new exporter. The system id defaults to the session config.
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            system_id: session.config().system_id.clone(),
        }
    }

    /// Set the system identifier for exports.
    pub fn with_system_id(mut self, system_id: String) -> Self {
        self.system_id = Some(system_id);
        self
    }

    /// Export the full audit log.
    pub fn export_all(&self) -> AuditExport {
        self.build(self.session.audit_log().to_vec())
    }

    /// Export entries recorded at or after `since`.
    pub fn export_since(&self, since: DateTime<Utc>) -> AuditExport {
        let entries = self
            .session
            .audit_log()
            .iter()
            .take_while(|e| e.recorded_at >= since)
            .cloned()
            .collect();
        self.build(entries)
    }

    fn build(&self, entries: Vec<AuditEntry>) -> AuditExport {
        AuditExport {
            metadata: AuditExportMetadata {
                format_version: "1.0".to_string(),
                exported_at: Utc::now().to_rfc3339(),
                hash_algorithm: HASH_ALGORITHM.to_string(),
                patient_id: self.session.profile().id.clone(),
                head_hash: entries.first().map(|e| e.hash.clone()),
                anchor_hash: entries
                    .last()
                    .map(|e| e.prev_hash.clone())
                    .unwrap_or_default(),
                entry_count: entries.len(),
                system_id: self.system_id.clone(),
            },
            entries,
        }
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
