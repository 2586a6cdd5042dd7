//! Seed digest
//!
//! SHA-256 of the seed text exactly as read, so the same file always yields
//! the same digest.

use sha2::{Digest, Sha256};

/// Compute the hex SHA-256 digest of a seed document
pub fn compute_seed_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_stable_and_content_sensitive() {
        let a = compute_seed_digest("schema_version: 0\n");
        assert_eq!(a, compute_seed_digest("schema_version: 0\n"));
        assert_ne!(a, compute_seed_digest("schema_version: 0\nbuses: []\n"));
        assert_eq!(a.len(), 64);
    }
}
