//! Natural business identifiers
//!
//! Every entity in the schema is keyed by an identifier the operator already
//! uses (national ID, tax ID, postal code, email). These newtypes can only be
//! built through `parse`, so holding one means the shape has been checked.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, TransitError};
use crate::rules::validation::{
    is_email_shape, is_fixed_digits, NATIONAL_ID_LEN, POSTAL_CODE_LEN, TAX_ID_LEN,
};

macro_rules! digit_identifier {
    ($(#[$meta:meta])* $name:ident, $len:expr, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and validate; surrounding whitespace is ignored
            pub fn parse(value: &str) -> Result<Self> {
                let trimmed = value.trim();
                if is_fixed_digits(trimmed, $len) {
                    Ok(Self(trimmed.to_string()))
                } else {
                    Err(TransitError::$variant {
                        value: value.to_string(),
                    })
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TransitError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

digit_identifier!(
    /// National ID of a user: exactly 11 ASCII digits
    NationalId,
    NATIONAL_ID_LEN,
    InvalidNationalId
);

digit_identifier!(
    /// Postal code: exactly 8 ASCII digits
    PostalCode,
    POSTAL_CODE_LEN,
    InvalidPostalCode
);

digit_identifier!(
    /// Public company tax ID: exactly 14 ASCII digits
    TaxId,
    TAX_ID_LEN,
    InvalidTaxId
);

/// Login email of a citizen or manager
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Parse and validate; surrounding whitespace is ignored, case is kept
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if is_email_shape(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(TransitError::InvalidEmail {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TransitError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> String {
        value.0
    }
}

/// Role tag stored on every user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Manager,
}

impl Role {
    /// Single-character tag persisted in `users.role`
    pub fn tag(&self) -> &'static str {
        match self {
            Role::Citizen => "C",
            Role::Manager => "M",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "C" => Some(Role::Citizen),
            "M" => Some(Role::Manager),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Citizen => f.write_str("citizen"),
            Role::Manager => f.write_str("manager"),
        }
    }
}
