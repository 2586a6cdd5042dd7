//! Canonical logging macros
//!
//! Every store and engine operation logs one `start` event and exactly one
//! `end` or `end_error` event.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use transit_core::log_op_start;
/// log_op_start!("register_citizen");
/// log_op_start!("trips_for_rider", national_id = "12345678901");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transit_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transit_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use transit_core::log_op_end;
/// log_op_end!("active_lines", duration_ms = 3);
/// log_op_end!("active_lines", duration_ms = 3, row_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transit_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transit_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`.
///
/// # Example
///
/// ```
/// # use transit_core::{log_op_error, errors::TransitError};
/// let err = TransitError::UnknownEmployer { tax_id: "12345678000199".to_string() };
/// log_op_error!("register_manager", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        if ex_err.kind().is_infrastructure() {
            tracing::error!(
                component = module_path!(),
                op = $op,
                event = transit_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
            );
        } else {
            tracing::warn!(
                component = module_path!(),
                op = $op,
                event = transit_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?ex_err.kind(),
                err_code = ex_err.code(),
            );
        }
    }};
}
