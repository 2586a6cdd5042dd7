//! Domain Store
//!
//! Write-side operations over the transit schema:
//! - Atomic citizen/manager registration (`DomainStore`)
//! - Email/credential authentication
//! - Append-only trip recording
//! - Reference-data inserts used by the seed importer (`ReferenceRepo`)

mod credentials;
mod domain_store;
mod reference;
pub(crate) mod row;

pub use credentials::{credential_matches, hash_credential, verify_credential};
pub use domain_store::DomainStore;
pub use reference::ReferenceRepo;
