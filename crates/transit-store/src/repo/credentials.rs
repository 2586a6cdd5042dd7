//! Credential hashing
//!
//! Credentials are stored as argon2id PHC strings (`$argon2id$v=19$...`),
//! which carry their own salt and parameters.

#![allow(clippy::result_large_err)]

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::OnceLock;
use transit_core::errors::{ExError, ExErrorKind};
use transit_core_types::Sensitive;
use uuid::Uuid;

use crate::errors::Result;

/// Hash `credential` under a fresh random salt
pub fn hash_credential(credential: &Sensitive<String>) -> Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(hashing_error)?;
    Argon2::default()
        .hash_password(credential.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(hashing_error)
}

/// True when `credential` matches the stored PHC string
///
/// A stored value that does not parse never matches.
pub fn verify_credential(stored: &str, credential: &Sensitive<String>) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(credential.expose().as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Check `credential` against a looked-up hash, doing the same argon2 work
/// whether or not the lookup found an account
///
/// A missing account is verified against a throwaway hash and never matches,
/// so response time does not reveal which half of the pair was wrong.
pub fn credential_matches(stored: Option<&str>, credential: &Sensitive<String>) -> bool {
    matches_with(stored, credential, verify_credential)
}

fn matches_with<F>(stored: Option<&str>, credential: &Sensitive<String>, verify: F) -> bool
where
    F: Fn(&str, &Sensitive<String>) -> bool,
{
    let verified = verify(stored.unwrap_or_else(|| placeholder_hash()), credential);
    stored.is_some() && verified
}

/// Hash of a random credential nobody knows, built once per process
fn placeholder_hash() -> &'static str {
    static PLACEHOLDER: OnceLock<String> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        hash_credential(&Sensitive::new(Uuid::new_v4().to_string())).unwrap_or_default()
    })
}

fn hashing_error(err: argon2::password_hash::Error) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("hash_credential")
        .with_message(err.to_string())
}
