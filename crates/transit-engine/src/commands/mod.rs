//! Command orchestration layer.
//!
//! `engine_command` holds the writes and session transitions,
//! `engine_query` the read-only reports.

pub mod engine_command;
pub mod engine_query;

use transit_core::{log_op_end, log_op_error, log_op_start};
use transit_store::Result;

/// Run `f` between a `start` and an `end`/`end_error` event for `op`
pub(crate) fn logged<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = f();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = elapsed),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}
