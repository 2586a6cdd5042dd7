use serde::{Deserialize, Serialize};
use transit_core_types::Sensitive;

use super::identity::{Email, NationalId, PostalCode, TaxId};

/// Postal address shared by citizens and managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub district: String,
    pub house_number: Option<u32>,
    pub postal_code: PostalCode,
}

/// Citizen registration as received from the caller
///
/// Fields are raw text; `rules::validation::validate_citizen_registration`
/// turns this into a [`ValidatedCitizen`].
#[derive(Debug, Clone, Deserialize)]
pub struct CitizenRegistration {
    pub national_id: String,
    pub street: String,
    pub district: String,
    #[serde(default)]
    pub house_number: Option<u32>,
    pub postal_code: String,
    pub email: String,
    pub credential: Sensitive<String>,
}

/// Manager registration as received from the caller
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerRegistration {
    pub national_id: String,
    pub street: String,
    pub district: String,
    #[serde(default)]
    pub house_number: Option<u32>,
    pub postal_code: String,
    pub job_title: String,
    pub email: String,
    pub credential: Sensitive<String>,
    pub employer_tax_id: String,
}

/// Citizen registration whose identifiers passed shape validation
#[derive(Debug, Clone)]
pub struct ValidatedCitizen {
    pub national_id: NationalId,
    pub address: Address,
    pub email: Email,
    pub credential: Sensitive<String>,
}

/// Manager registration whose identifiers passed shape validation
#[derive(Debug, Clone)]
pub struct ValidatedManager {
    pub national_id: NationalId,
    pub address: Address,
    pub job_title: String,
    pub email: Email,
    pub credential: Sensitive<String>,
    pub employer_tax_id: TaxId,
}
