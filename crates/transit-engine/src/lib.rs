//! Transit Engine - Orchestration layer
//!
//! Coordinates the session state machine with the store: every entry point
//! checks what the current session may do, runs one store unit of work, and
//! logs the operation's start and end.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
