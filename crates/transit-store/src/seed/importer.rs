//! Seed importer orchestration
//!
//! Imports a seed by running the Domain Store's insert helpers inside a
//! single transaction; any failure rolls back the whole seed.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::repo::{hash_credential, DomainStore, ReferenceRepo};
use crate::seed::format::NetworkSeed;
use crate::seed::parser::{parse_seed_str_with_db, read_seed_file};
use crate::seed::compute_seed_digest;
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use transit_core::errors::ExError;
use transit_core::rules::{validate_citizen_registration, validate_manager_registration};

/// What one import wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// SHA-256 of the seed text
    pub digest: String,
    pub companies: usize,
    pub lines: usize,
    pub stops: usize,
    pub buses: usize,
    pub citizens: usize,
    pub managers: usize,
    pub trips: usize,
}

/// Import a seed file into the database
///
/// 1. Parses and validates the seed YAML (checking the database for references)
/// 2. Computes the seed digest
/// 3. Warns about lines without exactly one origin and one destination
/// 4. Hashes credentials, then inserts everything within one transaction
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<ImportSummary> {
    let content = read_seed_file(path)?;
    import_seed_str(&content, conn)
}

/// Import a seed given as text
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<ImportSummary> {
    let seed = parse_seed_str_with_db(content, Some(&*conn))?;
    let digest = compute_seed_digest(content);

    warn_irregular_termini(&seed);

    // Hash every credential before the write lock is taken
    let citizens = seed
        .citizens
        .iter()
        .map(|registration| -> Result<_> {
            let citizen = validate_citizen_registration(registration)
                .map_err(|e| ExError::from(e).with_op("seed_import"))?;
            let credential_hash = hash_credential(&citizen.credential)?;
            Ok((citizen, credential_hash))
        })
        .collect::<Result<Vec<_>>>()?;
    let managers = seed
        .managers
        .iter()
        .map(|registration| -> Result<_> {
            let manager = validate_manager_registration(registration)
                .map_err(|e| ExError::from(e).with_op("seed_import"))?;
            let credential_hash = hash_credential(&manager.credential)?;
            Ok((manager, credential_hash))
        })
        .collect::<Result<Vec<_>>>()?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    for company in &seed.companies {
        ReferenceRepo::insert_company(&tx, company)?;
    }
    for line in &seed.lines {
        ReferenceRepo::insert_line(&tx, line)?;
    }
    for stop in &seed.stops {
        ReferenceRepo::insert_stop(&tx, stop)?;
    }
    for bus in &seed.buses {
        ReferenceRepo::insert_bus(&tx, bus)?;
    }
    for (citizen, credential_hash) in &citizens {
        DomainStore::insert_citizen_tx(&tx, citizen, credential_hash)?;
    }
    for (manager, credential_hash) in &managers {
        DomainStore::insert_manager_tx(&tx, manager, credential_hash)?;
    }
    for trip in &seed.trips {
        DomainStore::insert_trip_tx(&tx, trip)?;
    }

    tx.commit().map_err(from_rusqlite)?;

    let summary = ImportSummary {
        digest,
        companies: seed.companies.len(),
        lines: seed.lines.len(),
        stops: seed.stops.len(),
        buses: seed.buses.len(),
        citizens: seed.citizens.len(),
        managers: seed.managers.len(),
        trips: seed.trips.len(),
    };

    tracing::info!(
        digest = %summary.digest,
        lines = summary.lines,
        stops = summary.stops,
        trips = summary.trips,
        "seed imported"
    );

    Ok(summary)
}

/// Lines should have exactly one origin and one destination; the import is permissive
fn warn_irregular_termini(seed: &NetworkSeed) {
    for line in &seed.lines {
        let stops = seed.stops.iter().filter(|s| s.line_code == line.code);
        let (origins, destinations) = stops.fold((0usize, 0usize), |(o, d), s| {
            (o + usize::from(s.is_origin), d + usize::from(s.is_destination))
        });
        if origins != 1 || destinations != 1 {
            tracing::warn!(
                line_code = %line.code,
                origins,
                destinations,
                "line does not have exactly one origin and one destination"
            );
        }
    }
}
