//! Domain models for the health-record vault.

mod audit;
mod consent;
mod profile;
mod record;

pub use audit::*;
pub use consent::*;
pub use profile::*;
pub use record::*;

use thiserror::Error;

/// Errors from parsing model values supplied as strings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Unknown access mode: {0}")]
    UnknownAccessMode(String),

    #[error("Unknown grant status: {0}")]
    UnknownStatus(String),
}
