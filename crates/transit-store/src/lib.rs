//! Transit Store - SQLite persistence for transit operator records
//!
//! Provides:
//! - Connection configuration and opening (`db`)
//! - SQLite schema with a checksummed migrations framework
//! - Domain Store: atomic citizen/manager registration, authentication,
//!   append-only trip recording (`repo`)
//! - Report Engine: read-only aggregation queries (`report`)
//! - YAML master-data seed import (`seed`)
//!
//! Raw `rusqlite` errors never leave this crate; every failure is an `ExError`.

pub mod db;
pub mod errors;
pub mod migrations;
pub mod report;
pub mod repo;
pub mod seed;

// Re-export key types
pub use db::StoreConfig;
pub use report::ReportEngine;
pub use repo::{DomainStore, ReferenceRepo};
pub use errors::Result;
