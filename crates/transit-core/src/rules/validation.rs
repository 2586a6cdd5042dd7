//! Identifier shape rules
//!
//! The presentation layer is expected to run these checks before calling the
//! store, and the store runs them again at its boundary. They only look at
//! shape; existence and uniqueness are the store's constraints.

use crate::errors::{Result, TransitError};
use crate::model::{
    Address, CitizenRegistration, Email, ManagerRegistration, NationalId, PostalCode, TaxId,
    ValidatedCitizen, ValidatedManager,
};

/// Length of a national ID (CPF-like), in digits
pub const NATIONAL_ID_LEN: usize = 11;
/// Length of a postal code (CEP-like), in digits
pub const POSTAL_CODE_LEN: usize = 8;
/// Length of a public company tax ID (CNPJ-like), in digits
pub const TAX_ID_LEN: usize = 14;

/// True when `value` is exactly `len` ASCII digits
pub fn is_fixed_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// True when `value` has exactly one '@' with non-empty text on both sides
pub fn is_email_shape(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TransitError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validate a citizen registration payload and produce typed fields
pub fn validate_citizen_registration(reg: &CitizenRegistration) -> Result<ValidatedCitizen> {
    let national_id = NationalId::parse(&reg.national_id)?;
    let postal_code = PostalCode::parse(&reg.postal_code)?;
    let email = Email::parse(&reg.email)?;
    require_text("credential", reg.credential.expose())?;

    Ok(ValidatedCitizen {
        national_id,
        address: Address {
            street: reg.street.trim().to_string(),
            district: reg.district.trim().to_string(),
            house_number: reg.house_number,
            postal_code,
        },
        email,
        credential: reg.credential.clone(),
    })
}

/// Validate a manager registration payload and produce typed fields
pub fn validate_manager_registration(reg: &ManagerRegistration) -> Result<ValidatedManager> {
    let national_id = NationalId::parse(&reg.national_id)?;
    let postal_code = PostalCode::parse(&reg.postal_code)?;
    let email = Email::parse(&reg.email)?;
    let employer_tax_id = TaxId::parse(&reg.employer_tax_id)?;
    require_text("job_title", &reg.job_title)?;
    require_text("credential", reg.credential.expose())?;

    Ok(ValidatedManager {
        national_id,
        address: Address {
            street: reg.street.trim().to_string(),
            district: reg.district.trim().to_string(),
            house_number: reg.house_number,
            postal_code,
        },
        job_title: reg.job_title.trim().to_string(),
        email,
        credential: reg.credential.clone(),
        employer_tax_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_core_types::Sensitive;

    fn citizen() -> CitizenRegistration {
        CitizenRegistration {
            national_id: "12345678901".to_string(),
            street: "Rua das Flores".to_string(),
            district: "Centro".to_string(),
            house_number: Some(42),
            postal_code: "13560000".to_string(),
            email: "ana@example.com".to_string(),
            credential: Sensitive::new("s3cret".to_string()),
        }
    }

    #[test]
    fn test_fixed_digits() {
        assert!(is_fixed_digits("12345678901", NATIONAL_ID_LEN));
        assert!(!is_fixed_digits("1234567890", NATIONAL_ID_LEN));
        assert!(!is_fixed_digits("1234567890a", NATIONAL_ID_LEN));
        assert!(!is_fixed_digits("123.456.789-01", NATIONAL_ID_LEN));
        // non-ASCII digits are rejected even when the char count matches
        assert!(!is_fixed_digits("１２３４５６７８", POSTAL_CODE_LEN));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_shape("a@b"));
        assert!(is_email_shape("ana.silva@example.com"));
        assert!(!is_email_shape("ana"));
        assert!(!is_email_shape("@example.com"));
        assert!(!is_email_shape("ana@"));
        assert!(!is_email_shape("ana@@example.com"));
        assert!(!is_email_shape("a@b@c"));
    }

    #[test]
    fn test_valid_citizen_registration() {
        let validated = validate_citizen_registration(&citizen()).unwrap();
        assert_eq!(validated.national_id.as_str(), "12345678901");
        assert_eq!(validated.address.postal_code.as_str(), "13560000");
        assert_eq!(validated.email.as_str(), "ana@example.com");
    }

    #[test]
    fn test_citizen_registration_rejects_bad_postal_code() {
        let mut reg = citizen();
        reg.postal_code = "1356-000".to_string();
        assert_eq!(
            validate_citizen_registration(&reg).unwrap_err(),
            TransitError::InvalidPostalCode {
                value: "1356-000".to_string()
            }
        );
    }

    #[test]
    fn test_citizen_registration_rejects_empty_credential() {
        let mut reg = citizen();
        reg.credential = Sensitive::new("   ".to_string());
        assert!(matches!(
            validate_citizen_registration(&reg),
            Err(TransitError::EmptyField { field }) if field == "credential"
        ));
    }

    #[test]
    fn test_manager_registration_requires_tax_id_shape() {
        let c = citizen();
        let reg = ManagerRegistration {
            national_id: c.national_id,
            street: c.street,
            district: c.district,
            house_number: None,
            postal_code: c.postal_code,
            job_title: "Fleet supervisor".to_string(),
            email: "gestor@example.com".to_string(),
            credential: c.credential,
            employer_tax_id: "123".to_string(),
        };
        assert!(matches!(
            validate_manager_registration(&reg),
            Err(TransitError::InvalidTaxId { .. })
        ));
    }
}
