//! In-memory stores for the record vault and consent grants.
//!
//! Both stores keep their entries newest first. Neither store can fail:
//! every operation is defined for every input.

mod consents;
mod records;

pub use consents::*;
pub use records::*;
