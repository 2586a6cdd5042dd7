//! Seed parser with validation
//!
//! Parses YAML and validates schema version, key uniqueness within the seed,
//! and that every reference resolves either inside the seed or in the database.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, seed_validation, Result};
use crate::seed::format::NetworkSeed;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use transit_core::errors::{ExError, TransitError};
use transit_core::model::StopRef;
use transit_core::rules::{validate_citizen_registration, validate_manager_registration};

/// Read a seed file, returning its text
pub fn read_seed_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| io_error("seed_read", e))
}

/// Parse a seed file from a path without database context
pub fn parse_seed_file(path: &Path) -> Result<NetworkSeed> {
    parse_seed_str(&read_seed_file(path)?)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<NetworkSeed> {
    parse_seed_str_with_db(content, None)
}

/// Parse a seed, resolving references missing from the seed against `conn`
pub fn parse_seed_str_with_db(content: &str, conn: Option<&Connection>) -> Result<NetworkSeed> {
    let seed: NetworkSeed = serde_yaml::from_str(content)
        .map_err(|e| {
            ExError::from(TransitError::Serialization {
                message: format!("YAML parse error: {}", e),
            })
            .with_op("seed_parse")
        })?;

    validate_seed(&seed, conn)?;

    Ok(seed)
}

fn exists_in_db(conn: Option<&Connection>, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<bool> {
    match conn {
        Some(conn) => conn
            .query_row(sql, params, |_| Ok(()))
            .optional()
            .map(|found| found.is_some())
            .map_err(from_rusqlite),
        None => Ok(false),
    }
}

/// Validate a parsed seed
fn validate_seed(seed: &NetworkSeed, conn: Option<&Connection>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut companies = HashSet::new();
    for company in &seed.companies {
        if !companies.insert(company.tax_id.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate public company {}",
                company.tax_id
            )));
        }
    }

    let mut lines = HashSet::new();
    for line in &seed.lines {
        if !lines.insert(line.code.as_str()) {
            return Err(seed_validation(&format!("Duplicate line {}", line.code)));
        }
        if line.fare.is_zero() {
            return Err(seed_validation(&format!(
                "Line {} must have a positive fare",
                line.code
            )));
        }
        let operator = line.operator_tax_id.as_str();
        if !companies.contains(operator)
            && !exists_in_db(
                conn,
                "SELECT 1 FROM public_companies WHERE tax_id = ?1",
                rusqlite::params![operator],
            )?
        {
            return Err(seed_validation(&format!(
                "Line {} references non-existent public company {}",
                line.code, operator
            )));
        }
    }

    let mut stops = HashSet::new();
    for stop in &seed.stops {
        if !stops.insert(stop.key()) {
            return Err(seed_validation(&format!(
                "Duplicate sequence {} in line {}",
                stop.sequence, stop.line_code
            )));
        }
        if !lines.contains(stop.line_code.as_str())
            && !exists_in_db(
                conn,
                "SELECT 1 FROM lines WHERE code = ?1",
                rusqlite::params![stop.line_code],
            )?
        {
            return Err(seed_validation(&format!(
                "Stop {} references non-existent line {}",
                stop.key(),
                stop.line_code
            )));
        }
    }

    let mut buses = HashSet::new();
    for bus in &seed.buses {
        if !buses.insert(bus.plate.as_str()) {
            return Err(seed_validation(&format!("Duplicate bus {}", bus.plate)));
        }
    }

    let mut riders = HashSet::new();
    for registration in &seed.citizens {
        let citizen = validate_citizen_registration(registration)
            .map_err(|e| ExError::from(e).with_op("seed_parse"))?;
        riders.insert(citizen.national_id.to_string());
    }

    for registration in &seed.managers {
        let manager = validate_manager_registration(registration)
            .map_err(|e| ExError::from(e).with_op("seed_parse"))?;
        let employer = manager.employer_tax_id.as_str();
        if !companies.contains(employer)
            && !exists_in_db(
                conn,
                "SELECT 1 FROM public_companies WHERE tax_id = ?1",
                rusqlite::params![employer],
            )?
        {
            return Err(seed_validation(&format!(
                "Manager {} references non-existent employer {}",
                manager.national_id, employer
            )));
        }
    }

    for trip in &seed.trips {
        trip.validate()
            .map_err(|e| ExError::from(e).with_op("seed_parse"))?;

        let rider = trip.rider.as_str();
        if !riders.contains(rider)
            && !exists_in_db(
                conn,
                "SELECT 1 FROM citizens WHERE national_id = ?1",
                rusqlite::params![rider],
            )?
        {
            return Err(seed_validation(&format!(
                "Trip at {} references non-existent rider {}",
                trip.started_at, rider
            )));
        }

        if !buses.contains(trip.bus_plate.as_str())
            && !exists_in_db(
                conn,
                "SELECT 1 FROM buses WHERE plate = ?1",
                rusqlite::params![trip.bus_plate],
            )?
        {
            return Err(seed_validation(&format!(
                "Trip of {} references non-existent bus {}",
                rider, trip.bus_plate
            )));
        }

        for leg in [&trip.boarding, &trip.alighting] {
            if !stop_resolves(&stops, leg, conn)? {
                return Err(seed_validation(&format!(
                    "Trip of {} references non-existent stop {}",
                    rider, leg
                )));
            }
        }
    }

    Ok(())
}

fn stop_resolves(seeded: &HashSet<StopRef>, stop: &StopRef, conn: Option<&Connection>) -> Result<bool> {
    if seeded.contains(stop) {
        return Ok(true);
    }
    exists_in_db(
        conn,
        "SELECT 1 FROM stops WHERE line_code = ?1 AND sequence = ?2",
        rusqlite::params![stop.line, stop.stop],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_core::errors::ExErrorKind;

    const MINIMAL: &str = r#"
schema_version: 0
companies:
  - { tax_id: "12345678000199", name: "SPTrans" }
lines:
  - { code: "L1", fare: "4.50", operator_tax_id: "12345678000199" }
stops:
  - { line_code: "L1", sequence: 1, district: "Centro", is_origin: true }
  - { line_code: "L1", sequence: 2, district: "Lapa", is_destination: true }
"#;

    #[test]
    fn test_parse_minimal_seed() {
        let seed = parse_seed_str(MINIMAL).unwrap();
        assert_eq!(seed.lines.len(), 1);
        assert_eq!(seed.stops.len(), 2);
        assert!(seed.trips.is_empty());
    }

    #[test]
    fn test_unsupported_schema_version() {
        let err = parse_seed_str("schema_version: 1\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ValidationFailure);
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_duplicate_stop_sequence() {
        let seed = format!(
            "{}  - {{ line_code: \"L1\", sequence: 2, district: \"Sé\" }}\n",
            MINIMAL
        );
        let err = parse_seed_str(&seed).unwrap_err();
        assert!(err.message().contains("Duplicate sequence 2"));
    }

    #[test]
    fn test_line_with_unknown_operator() {
        let seed = r#"
schema_version: 0
lines:
  - { code: "L9", fare: "4.50", operator_tax_id: "99999999000199" }
"#;
        let err = parse_seed_str(seed).unwrap_err();
        assert!(err.message().contains("non-existent public company"));
    }

    #[test]
    fn test_unquoted_national_id_is_rejected() {
        let seed = r#"
schema_version: 0
citizens:
  - national_id: 12345678901
    street: "Rua A"
    district: "Centro"
    postal_code: "01310100"
    email: "ana@example.com"
    credential: "x"
"#;
        let err = parse_seed_str(seed).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}
