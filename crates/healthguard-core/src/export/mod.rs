//! Audit trail export.

mod audit_trail;

pub use audit_trail::*;
