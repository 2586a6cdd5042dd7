//! Registration, authentication and trip recording
//!
//! Every write runs in its own IMMEDIATE transaction. Uniqueness and
//! referential integrity are left to the schema's constraints; constraint
//! failures are translated into domain errors after the fact, never checked
//! up front.

#![allow(clippy::result_large_err)]

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use transit_core::errors::{ExError, TransitError};
use transit_core::model::{
    Address, CitizenRegistration, Email, ManagerRegistration, NationalId, Role, TripRecord,
    ValidatedCitizen, ValidatedManager,
};
use transit_core::rules::{validate_citizen_registration, validate_manager_registration};
use transit_core_types::Sensitive;

use super::credentials::{credential_matches, hash_credential};
use super::row::format_timestamp;
use crate::errors::{constraint_failure, from_rusqlite, ConstraintFailure, Result};

/// Domain Store operations over an explicit connection
pub struct DomainStore;

impl DomainStore {
    /// Register a citizen (user row + citizen row) as one unit of work
    ///
    /// Returns the registered national ID.
    ///
    /// # Errors
    ///
    /// `ValidationFailure` for malformed input, `DuplicateIdentity` when the
    /// national ID or email is taken, `StoreUnavailable` otherwise.
    pub fn register_citizen(
        conn: &mut Connection,
        registration: &CitizenRegistration,
    ) -> Result<NationalId> {
        let citizen = validate_citizen_registration(registration)
            .map_err(|e| ExError::from(e).with_op("register_citizen"))?;
        let credential_hash = hash_credential(&citizen.credential)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Self::insert_citizen_tx(&tx, &citizen, &credential_hash)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(national_id = %citizen.national_id, "citizen registered");
        Ok(citizen.national_id)
    }

    /// Register a manager (user row + manager row) as one unit of work
    ///
    /// # Errors
    ///
    /// As [`DomainStore::register_citizen`], plus `UnknownEmployer` when the
    /// employer tax ID has no public company.
    pub fn register_manager(
        conn: &mut Connection,
        registration: &ManagerRegistration,
    ) -> Result<NationalId> {
        let manager = validate_manager_registration(registration)
            .map_err(|e| ExError::from(e).with_op("register_manager"))?;
        let credential_hash = hash_credential(&manager.credential)?;

        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Self::insert_manager_tx(&tx, &manager, &credential_hash)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(national_id = %manager.national_id, "manager registered");
        Ok(manager.national_id)
    }

    /// Insert a validated citizen inside a caller-owned transaction
    ///
    /// Shared with the seed importer so both paths hit the same constraints.
    /// `credential_hash` comes from [`hash_credential`], computed before the
    /// transaction takes the write lock.
    pub fn insert_citizen_tx(
        conn: &Connection,
        citizen: &ValidatedCitizen,
        credential_hash: &str,
    ) -> Result<()> {
        Self::insert_user(conn, &citizen.national_id, Role::Citizen, "register_citizen")?;

        let Address {
            street,
            district,
            house_number,
            postal_code,
        } = &citizen.address;

        conn.execute(
            "INSERT INTO citizens (national_id, role, street, district, house_number, postal_code,
                                   status, email, credential_hash)
             VALUES (?1, 'C', ?2, ?3, ?4, ?5, 'A', ?6, ?7)",
            rusqlite::params![
                citizen.national_id.as_str(),
                street,
                district,
                house_number,
                postal_code.as_str(),
                citizen.email.as_str(),
                credential_hash,
            ],
        )
        .map_err(|e| {
            person_insert_error(e, &citizen.national_id, &citizen.email, None)
                .with_op("register_citizen")
        })?;

        Ok(())
    }

    /// Insert a validated manager inside a caller-owned transaction
    pub fn insert_manager_tx(
        conn: &Connection,
        manager: &ValidatedManager,
        credential_hash: &str,
    ) -> Result<()> {
        Self::insert_user(conn, &manager.national_id, Role::Manager, "register_manager")?;

        let Address {
            street,
            district,
            house_number,
            postal_code,
        } = &manager.address;

        conn.execute(
            "INSERT INTO managers (national_id, role, street, district, house_number, postal_code,
                                   job_title, email, credential_hash, employer_tax_id)
             VALUES (?1, 'M', ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                manager.national_id.as_str(),
                street,
                district,
                house_number,
                postal_code.as_str(),
                manager.job_title,
                manager.email.as_str(),
                credential_hash,
                manager.employer_tax_id.as_str(),
            ],
        )
        .map_err(|e| {
            person_insert_error(
                e,
                &manager.national_id,
                &manager.email,
                Some(manager.employer_tax_id.as_str()),
            )
            .with_op("register_manager")
        })?;

        Ok(())
    }

    fn insert_user(conn: &Connection, national_id: &NationalId, role: Role, op: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO users (national_id, role) VALUES (?1, ?2)",
            rusqlite::params![national_id.as_str(), role.tag()],
        )
        .map_err(|e| match constraint_failure(&e) {
            Some(ConstraintFailure::Unique { .. }) => ExError::from(
                TransitError::DuplicateNationalId {
                    national_id: national_id.to_string(),
                },
            )
            .with_op(op),
            Some(ConstraintFailure::Check { detail }) => {
                ExError::from(TransitError::InvalidNationalId {
                    value: national_id.to_string(),
                })
                .with_op(op)
                .with_message(detail)
            }
            _ => from_rusqlite(e).with_op(op),
        })?;
        Ok(())
    }

    /// Look up the citizen owning `email` and check `credential`
    ///
    /// # Errors
    ///
    /// `NotFound` when either the email or the credential does not match;
    /// the two cases are indistinguishable to the caller.
    pub fn authenticate_citizen(
        conn: &Connection,
        email: &str,
        credential: &Sensitive<String>,
    ) -> Result<NationalId> {
        let found: Option<(String, String)> = conn
            .query_row(
                "SELECT national_id, credential_hash FROM citizens WHERE email = ?1",
                [email.trim()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let stored = found.as_ref().map(|(_, stored)| stored.as_str());
        let verified = credential_matches(stored, credential);
        match found.filter(|_| verified) {
            Some((national_id, _)) => {
                NationalId::parse(&national_id).map_err(|e| {
                    ExError::from(TransitError::Internal {
                        message: e.to_string(),
                    })
                    .with_op("authenticate_citizen")
                })
            }
            _ => Err(ExError::from(TransitError::AuthenticationFailed {
                role: Role::Citizen,
            })
            .with_op("authenticate_citizen")),
        }
    }

    /// Existence-only check of a manager's email/credential pair
    ///
    /// Returns the matched email so the caller can open a manager session.
    ///
    /// # Errors
    ///
    /// `NotFound` on any mismatch.
    pub fn authenticate_manager(
        conn: &Connection,
        email: &str,
        credential: &Sensitive<String>,
    ) -> Result<Email> {
        let found: Option<(String, String)> = conn
            .query_row(
                "SELECT email, credential_hash FROM managers WHERE email = ?1",
                [email.trim()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(from_rusqlite)?;

        let stored = found.as_ref().map(|(_, stored)| stored.as_str());
        let verified = credential_matches(stored, credential);
        match found.filter(|_| verified) {
            Some((email, _)) => {
                Email::parse(&email).map_err(|e| {
                    ExError::from(TransitError::Internal {
                        message: e.to_string(),
                    })
                    .with_op("authenticate_manager")
                })
            }
            _ => Err(ExError::from(TransitError::AuthenticationFailed {
                role: Role::Manager,
            })
            .with_op("authenticate_manager")),
        }
    }

    /// Append a completed trip
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when the trip ends before it starts,
    /// `DuplicateRecord` when (rider, start) is already recorded and
    /// `UnknownReference` when the rider, bus or either stop does not exist.
    pub fn record_trip(conn: &mut Connection, trip: &TripRecord) -> Result<()> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Self::insert_trip_tx(&tx, trip)?;
        tx.commit().map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert a trip inside a caller-owned transaction
    pub fn insert_trip_tx(conn: &Connection, trip: &TripRecord) -> Result<()> {
        trip.validate()
            .map_err(|e| ExError::from(e).with_op("record_trip"))?;

        let started_at = format_timestamp(&trip.started_at);
        conn.execute(
            "INSERT INTO trips (rider_id, started_at, ended_at, total_cost_cents,
                                boarding_line, boarding_stop, alighting_line, alighting_stop,
                                bus_plate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                trip.rider.as_str(),
                started_at,
                format_timestamp(&trip.ended_at),
                trip.total_cost.cents(),
                trip.boarding.line,
                trip.boarding.stop,
                trip.alighting.line,
                trip.alighting.stop,
                trip.bus_plate,
            ],
        )
        .map_err(|e| {
            let err = match constraint_failure(&e) {
                Some(ConstraintFailure::Unique { .. }) => {
                    ExError::from(TransitError::DuplicateTrip {
                        national_id: trip.rider.to_string(),
                        started_at: started_at.clone(),
                    })
                }
                Some(ConstraintFailure::ForeignKey) => match missing_trip_reference(conn, trip) {
                    Ok((entity, key)) => ExError::from(TransitError::UnknownReference {
                        entity: entity.to_string(),
                        key,
                    }),
                    Err(lookup) => lookup,
                },
                Some(ConstraintFailure::Check { detail }) => {
                    ExError::from(TransitError::ConstraintRejected { detail })
                }
                _ => from_rusqlite(e),
            };
            err.with_op("record_trip")
        })?;

        Ok(())
    }
}

/// Translate a failed citizen/manager insert into a domain error
fn person_insert_error(
    err: rusqlite::Error,
    national_id: &NationalId,
    email: &Email,
    employer_tax_id: Option<&str>,
) -> ExError {
    match constraint_failure(&err) {
        Some(failure) if failure.is_unique_on("email") => {
            TransitError::DuplicateEmail {
                email: email.to_string(),
            }
            .into()
        }
        Some(ConstraintFailure::Unique { .. }) => TransitError::DuplicateNationalId {
            national_id: national_id.to_string(),
        }
        .into(),
        Some(ConstraintFailure::ForeignKey) => match employer_tax_id {
            Some(tax_id) => TransitError::UnknownEmployer {
                tax_id: tax_id.to_string(),
            }
            .into(),
            None => TransitError::UnknownReference {
                entity: "user".to_string(),
                key: national_id.to_string(),
            }
            .into(),
        },
        Some(ConstraintFailure::Check { detail }) | Some(ConstraintFailure::NotNull { detail }) => {
            TransitError::ConstraintRejected { detail }.into()
        }
        _ => from_rusqlite(err),
    }
}

/// After a foreign-key failure, find which trip reference does not resolve
fn missing_trip_reference(
    conn: &Connection,
    trip: &TripRecord,
) -> Result<(&'static str, String)> {
    let exists = |sql: &str, params: &[&dyn rusqlite::ToSql]| -> Result<bool> {
        conn.query_row(sql, params, |_| Ok(()))
            .optional()
            .map(|row| row.is_some())
            .map_err(from_rusqlite)
    };

    if !exists(
        "SELECT 1 FROM citizens WHERE national_id = ?1",
        rusqlite::params![trip.rider.as_str()],
    )? {
        return Ok(("rider", trip.rider.to_string()));
    }
    if !exists(
        "SELECT 1 FROM buses WHERE plate = ?1",
        rusqlite::params![trip.bus_plate],
    )? {
        return Ok(("bus", trip.bus_plate.clone()));
    }
    for leg in [&trip.boarding, &trip.alighting] {
        if !exists(
            "SELECT 1 FROM stops WHERE line_code = ?1 AND sequence = ?2",
            rusqlite::params![leg.line, leg.stop],
        )? {
            return Ok(("stop", leg.to_string()));
        }
    }
    Ok(("trip", trip.rider.to_string()))
}
