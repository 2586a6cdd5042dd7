//! Shape validation rules applied before anything reaches the store

pub mod validation;

pub use validation::{
    is_email_shape, is_fixed_digits, validate_citizen_registration,
    validate_manager_registration,
};
