//! Report Engine
//!
//! Read-only aggregation queries over trips, lines, stops and buses. Every
//! query is a single statement; "nothing matched" is `Listing::Empty` (or a
//! zero total), never an error.

mod audit;
mod network;
mod operations;
mod rider;

/// Report queries over an explicit connection
pub struct ReportEngine;
