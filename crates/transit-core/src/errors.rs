use thiserror::Error;

use crate::model::Role;

/// Result type alias using TransitError
pub type Result<T> = std::result::Result<T, TransitError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that crosses a crate boundary is classified into one of these
/// kinds. Each kind maps to a stable error code usable by callers, tests and
/// log consumers without matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input shape
    ValidationFailure,

    // Write-side constraint outcomes
    DuplicateIdentity,
    DuplicateRecord,
    UnknownEmployer,
    UnknownReference,

    // Lookup
    NotFound,

    // Session / role gating
    Forbidden,
    IllegalTransition,

    // Infrastructure
    StoreUnavailable,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ValidationFailure => "ERR_VALIDATION_FAILURE",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::DuplicateRecord => "ERR_DUPLICATE_RECORD",
            ExErrorKind::UnknownEmployer => "ERR_UNKNOWN_EMPLOYER",
            ExErrorKind::UnknownReference => "ERR_UNKNOWN_REFERENCE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::IllegalTransition => "ERR_ILLEGAL_TRANSITION",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether this kind is an infrastructure failure rather than an expected
    /// domain outcome (duplicate, not found, forbidden, ...).
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            ExErrorKind::StoreUnavailable | ExErrorKind::Io | ExErrorKind::Internal
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification kind plus operation/entity context for
/// debugging. This is the error type returned by the store and engine crates.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (national ID, line code, tax ID...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for transit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitError {
    // ===== Validation Errors =====
    /// National ID is not exactly 11 ASCII digits
    #[error("Invalid national ID '{value}': expected 11 digits")]
    InvalidNationalId { value: String },

    /// Postal code is not exactly 8 ASCII digits
    #[error("Invalid postal code '{value}': expected 8 digits")]
    InvalidPostalCode { value: String },

    /// Email does not have exactly one '@' between two non-empty parts
    #[error("Invalid email '{value}'")]
    InvalidEmail { value: String },

    /// Public company tax ID is not exactly 14 ASCII digits
    #[error("Invalid tax ID '{value}': expected 14 digits")]
    InvalidTaxId { value: String },

    /// Monetary amount could not be parsed or is out of range
    #[error("Invalid amount '{value}': {reason}")]
    InvalidMoney { value: String, reason: String },

    /// A required text field was empty
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: String },

    /// A declared shape constraint rejected the row
    #[error("Rejected by constraint: {detail}")]
    ConstraintRejected { detail: String },

    /// A report limit of zero was requested
    #[error("Limit must be at least 1, got {limit}")]
    InvalidLimit { limit: u32 },

    /// Trip end timestamp precedes its start timestamp
    #[error("Trip for rider {national_id} ends before it starts ({started_at})")]
    TripEndsBeforeStart {
        national_id: String,
        started_at: String,
    },

    // ===== Constraint Errors =====
    /// National ID already registered (as citizen or manager)
    #[error("National ID already registered: {national_id}")]
    DuplicateNationalId { national_id: String },

    /// Email already used by another account of the same role
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    /// A trip with the same (rider, start timestamp) already exists
    #[error("Trip already recorded for rider {national_id} at {started_at}")]
    DuplicateTrip {
        national_id: String,
        started_at: String,
    },

    /// Manager employer tax ID has no matching public company
    #[error("Unknown employer: no public company with tax ID {tax_id}")]
    UnknownEmployer { tax_id: String },

    /// A record references a line, stop, bus, company or rider that does not exist
    #[error("Unknown {entity} reference: {key}")]
    UnknownReference { entity: String, key: String },

    // ===== Authentication / Session Errors =====
    /// Email/credential pair did not match; deliberately does not say which part failed
    #[error("No {role} matches the given email and credential")]
    AuthenticationFailed { role: Role },

    /// Session state machine received an event it cannot accept in its current state
    #[error("Illegal session transition: {event} while in {state}")]
    IllegalTransition { state: String, event: String },

    /// The session lacks the capability the operation requires
    #[error("Operation requires capability {capability}")]
    Forbidden { capability: String },

    // ===== Infrastructure Errors =====
    /// Seed text could not be deserialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from TransitError to ExError
impl From<TransitError> for ExError {
    fn from(err: TransitError) -> Self {
        let message = err.to_string();
        match err {
            TransitError::InvalidNationalId { value }
            | TransitError::InvalidPostalCode { value }
            | TransitError::InvalidEmail { value }
            | TransitError::InvalidTaxId { value }
            | TransitError::InvalidMoney { value, .. } => {
                ExError::new(ExErrorKind::ValidationFailure)
                    .with_entity_id(value)
                    .with_message(message)
            }

            TransitError::EmptyField { .. }
            | TransitError::ConstraintRejected { .. }
            | TransitError::InvalidLimit { .. } => {
                ExError::new(ExErrorKind::ValidationFailure).with_message(message)
            }

            TransitError::TripEndsBeforeStart { national_id, .. } => {
                ExError::new(ExErrorKind::ValidationFailure)
                    .with_entity_id(national_id)
                    .with_message(message)
            }

            TransitError::DuplicateNationalId { national_id } => {
                ExError::new(ExErrorKind::DuplicateIdentity)
                    .with_entity_id(national_id)
                    .with_message(message)
            }

            TransitError::DuplicateEmail { email } => ExError::new(ExErrorKind::DuplicateIdentity)
                .with_entity_id(email)
                .with_message(message),

            TransitError::DuplicateTrip { national_id, .. } => {
                ExError::new(ExErrorKind::DuplicateRecord)
                    .with_entity_id(national_id)
                    .with_message(message)
            }

            TransitError::UnknownEmployer { tax_id } => ExError::new(ExErrorKind::UnknownEmployer)
                .with_entity_id(tax_id)
                .with_message(message),

            TransitError::UnknownReference { key, .. } => {
                ExError::new(ExErrorKind::UnknownReference)
                    .with_entity_id(key)
                    .with_message(message)
            }

            TransitError::AuthenticationFailed { .. } => {
                ExError::new(ExErrorKind::NotFound).with_message(message)
            }

            TransitError::IllegalTransition { .. } => {
                ExError::new(ExErrorKind::IllegalTransition).with_message(message)
            }

            TransitError::Forbidden { .. } => {
                ExError::new(ExErrorKind::Forbidden).with_message(message)
            }

            TransitError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            TransitError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::ValidationFailure, "ERR_VALIDATION_FAILURE"),
            (ExErrorKind::DuplicateIdentity, "ERR_DUPLICATE_IDENTITY"),
            (ExErrorKind::UnknownEmployer, "ERR_UNKNOWN_EMPLOYER"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::StoreUnavailable, "ERR_STORE_UNAVAILABLE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_duplicate_email_maps_to_duplicate_identity() {
        let ex: ExError = TransitError::DuplicateEmail {
            email: "ana@example.com".to_string(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::DuplicateIdentity);
        assert_eq!(ex.entity_id(), Some("ana@example.com"));
    }

    #[test]
    fn test_authentication_failure_is_not_found_without_detail() {
        let ex: ExError = TransitError::AuthenticationFailed {
            role: Role::Citizen,
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert!(ex.entity_id().is_none());
    }

    #[test]
    fn test_infrastructure_kinds() {
        assert!(ExErrorKind::StoreUnavailable.is_infrastructure());
        assert!(!ExErrorKind::DuplicateIdentity.is_infrastructure());
        assert!(!ExErrorKind::NotFound.is_infrastructure());
    }

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::new(ExErrorKind::UnknownEmployer)
            .with_op("register_manager")
            .with_entity_id("12345678000199")
            .with_message("no such company");
        assert_eq!(
            err.to_string(),
            "[ERR_UNKNOWN_EMPLOYER] in operation 'register_manager': no such company (entity_id: 12345678000199)"
        );
    }
}
