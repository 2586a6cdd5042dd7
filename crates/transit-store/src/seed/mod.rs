//! Master-data seed import
//!
//! Provides:
//! - Seed format v0 schema (companies, lines, stops, buses, people, trips)
//! - YAML parser with validation against the seed and the database
//! - Seed digest
//! - Importer running the whole seed as one unit of work

pub mod digest;
pub mod format;
pub mod importer;
pub mod parser;

pub use digest::compute_seed_digest;
pub use format::NetworkSeed;
pub use importer::{import_seed, import_seed_str, ImportSummary};
pub use parser::{parse_seed_file, parse_seed_str, parse_seed_str_with_db};
