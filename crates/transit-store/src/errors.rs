//! Error handling for transit-store
//!
//! Wraps `transit_core::ExError` with store-specific helpers and classifies
//! SQLite constraint failures so callers can translate them into domain errors.

use rusqlite::ffi;
use transit_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Which kind of declared constraint rejected a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintFailure {
    /// PRIMARY KEY or UNIQUE; `detail` names the columns, e.g. `citizens.email`
    Unique { detail: String },
    ForeignKey,
    Check { detail: String },
    NotNull { detail: String },
    Other { detail: String },
}

impl ConstraintFailure {
    /// True when a UNIQUE/PK failure mentions `column` (e.g. `"email"`)
    pub fn is_unique_on(&self, column: &str) -> bool {
        matches!(self, ConstraintFailure::Unique { detail } if detail.contains(column))
    }
}

/// Classify a rusqlite error as a constraint failure, if it is one
pub fn constraint_failure(err: &rusqlite::Error) -> Option<ConstraintFailure> {
    match err {
        rusqlite::Error::SqliteFailure(e, msg)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            let detail = msg.clone().unwrap_or_default();
            Some(match e.extended_code {
                ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    ConstraintFailure::Unique { detail }
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintFailure::ForeignKey,
                ffi::SQLITE_CONSTRAINT_CHECK => ConstraintFailure::Check { detail },
                ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintFailure::NotNull { detail },
                _ => ConstraintFailure::Other { detail },
            })
        }
        _ => None,
    }
}

/// Create a database error from rusqlite::Error
///
/// Anything that reaches this point is an infrastructure failure.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::StoreUnavailable)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::StoreUnavailable)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::ValidationFailure)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
