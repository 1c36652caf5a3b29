//! Hash chain over audit entries.

use chrono::SecondsFormat;
use sha2::{Digest, Sha256};

use super::{AuditError, AuditResult};
use crate::models::AuditEntry;

/// Hash algorithm label used in exports.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Compute the chain hash of an entry from `prev_hash` and its content fields.
///
/// Every field is length-prefixed so that no two distinct entries share an encoding.
pub fn entry_hash(entry: &AuditEntry) -> String {
    let recorded_at = entry
        .recorded_at
        .to_rfc3339_opts(SecondsFormat::Nanos, true);

    let mut hasher = Sha256::new();
    for field in [
        entry.prev_hash.as_str(),
        entry.id.as_str(),
        recorded_at.as_str(),
        entry.actor.as_str(),
        entry.action.as_str(),
        entry.purpose.as_str(),
        entry.kind.as_str(),
    ] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Verify a full chain given oldest first.
///
/// Fails on the first entry whose `prev_hash` does not point at its
/// predecessor, or whose stored hash does not match its content.
pub fn verify_chain<'a, I>(oldest_first: I) -> AuditResult<()>
where
    I: IntoIterator<Item = &'a AuditEntry>,
{
    verify_chain_from("", oldest_first)
}

/// Verify a chain segment whose oldest entry must point at `anchor`.
pub fn verify_chain_from<'a, I>(anchor: &str, oldest_first: I) -> AuditResult<()>
where
    I: IntoIterator<Item = &'a AuditEntry>,
{
    let mut expected_prev = anchor.to_string();
    for (index, entry) in oldest_first.into_iter().enumerate() {
        if entry.prev_hash != expected_prev {
            return Err(AuditError::BrokenChain { index });
        }
        if entry_hash(entry) != entry.hash {
            return Err(AuditError::HashMismatch {
                id: entry.id.clone(),
            });
        }
        expected_prev = entry.hash.clone();
    }
    Ok(())
}
