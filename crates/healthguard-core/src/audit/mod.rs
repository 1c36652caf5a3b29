//! Append-only audit log with a SHA-256 hash chain for tamper evidence.

mod chain;
mod log;

pub use chain::*;
pub use log::*;

use thiserror::Error;

/// Audit chain verification errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    #[error("Chain broken at entry {index} (counted from oldest)")]
    BrokenChain { index: usize },

    #[error("Hash mismatch for entry {id}")]
    HashMismatch { id: String },
}

pub type AuditResult<T> = Result<T, AuditError>;
