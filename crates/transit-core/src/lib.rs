//! Transit Core - domain model and rules for transit operator records
//!
//! This crate provides the I/O-free half of the system:
//! - Identifier newtypes (national ID, postal code, email, tax ID) and `Money`
//! - Registration payloads for citizens and managers
//! - Report row types produced by the report queries
//! - Shape validation rules re-applied at the store boundary
//! - The session state machine and its capability gating
//! - The error facility (`TransitError`, `ExError`) and logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, TransitError};
pub use model::{Email, Listing, Money, NationalId, PostalCode, TaxId};
pub use session::{Capability, SessionEvent, SessionState};
