//! Checksum validation for migrations
//!
//! SHA-256 of the migration SQL, recorded when applied and compared on every
//! later run so an edited migration is detected instead of silently skipped.

use sha2::{Digest, Sha256};

/// Compute SHA-256 checksum of a string as lowercase hex
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
