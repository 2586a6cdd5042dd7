//! Reference data inserts: public companies, lines, stops, buses
//!
//! Only the seed importer writes these tables; everything else reads them.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use transit_core::errors::{ExError, ExErrorKind, TransitError};
use transit_core::model::{Bus, Line, PublicCompany, Stop};

use crate::errors::{constraint_failure, from_rusqlite, ConstraintFailure, Result};

/// Inserts for master data
pub struct ReferenceRepo;

impl ReferenceRepo {
    pub fn insert_company(conn: &Connection, company: &PublicCompany) -> Result<()> {
        conn.execute(
            "INSERT INTO public_companies (tax_id, name) VALUES (?1, ?2)",
            rusqlite::params![company.tax_id.as_str(), company.name],
        )
        .map_err(|e| classify(e, "public company", company.tax_id.as_str(), None))?;
        Ok(())
    }

    pub fn insert_line(conn: &Connection, line: &Line) -> Result<()> {
        conn.execute(
            "INSERT INTO lines (code, fare_cents, transit_minutes, active, operator_tax_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                line.code,
                line.fare.cents(),
                line.transit_minutes,
                line.active,
                line.operator_tax_id.as_str(),
            ],
        )
        .map_err(|e| {
            classify(
                e,
                "line",
                &line.code,
                Some(("public company", line.operator_tax_id.as_str())),
            )
        })?;
        Ok(())
    }

    pub fn insert_stop(conn: &Connection, stop: &Stop) -> Result<()> {
        conn.execute(
            "INSERT INTO stops (line_code, sequence, street, district, house_number, postal_code,
                                has_shelter, is_origin, is_destination)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                stop.line_code,
                stop.sequence,
                stop.street,
                stop.district,
                stop.house_number,
                stop.postal_code.as_ref().map(|p| p.as_str()),
                stop.has_shelter,
                stop.is_origin,
                stop.is_destination,
            ],
        )
        .map_err(|e| {
            classify(
                e,
                "stop",
                &stop.key().to_string(),
                Some(("line", stop.line_code.as_str())),
            )
        })?;
        Ok(())
    }

    pub fn insert_bus(conn: &Connection, bus: &Bus) -> Result<()> {
        conn.execute(
            "INSERT INTO buses (plate) VALUES (?1)",
            rusqlite::params![bus.plate],
        )
        .map_err(|e| classify(e, "bus", &bus.plate, None))?;
        Ok(())
    }
}

/// Duplicate key, dangling parent, or rejected shape; anything else is infrastructure
fn classify(
    err: rusqlite::Error,
    entity: &str,
    key: &str,
    parent: Option<(&str, &str)>,
) -> ExError {
    let classified = match (constraint_failure(&err), parent) {
        (Some(ConstraintFailure::Unique { .. }), _) => ExError::new(ExErrorKind::DuplicateRecord)
            .with_entity_id(key)
            .with_message(format!("{} already exists: {}", entity, key)),
        (Some(ConstraintFailure::ForeignKey), Some((parent_entity, parent_key))) => {
            TransitError::UnknownReference {
                entity: parent_entity.to_string(),
                key: parent_key.to_string(),
            }
            .into()
        }
        (Some(ConstraintFailure::Check { detail }), _) => {
            ExError::from(TransitError::ConstraintRejected { detail }).with_entity_id(key)
        }
        _ => from_rusqlite(err),
    };
    classified.with_op(format!("insert_{}", entity.replace(' ', "_")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use transit_core::model::{Money, TaxId};

    fn company() -> PublicCompany {
        PublicCompany {
            tax_id: TaxId::parse("12345678000199").unwrap(),
            name: "SPTrans".to_string(),
        }
    }

    fn line(code: &str, fare: &str) -> Line {
        Line {
            code: code.to_string(),
            fare: Money::parse(fare).unwrap(),
            transit_minutes: Some(40),
            active: true,
            operator_tax_id: company().tax_id,
        }
    }

    #[test]
    fn test_line_requires_existing_operator() {
        let conn = connect_in_memory().unwrap();
        let err = ReferenceRepo::insert_line(&conn, &line("L1", "4.50")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnknownReference);
        assert_eq!(err.entity_id(), Some("12345678000199"));
    }

    #[test]
    fn test_zero_fare_rejected_by_schema() {
        let conn = connect_in_memory().unwrap();
        ReferenceRepo::insert_company(&conn, &company()).unwrap();
        let err = ReferenceRepo::insert_line(&conn, &line("L1", "0")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ValidationFailure);
    }

    #[test]
    fn test_duplicate_stop_sequence_within_line() {
        let conn = connect_in_memory().unwrap();
        ReferenceRepo::insert_company(&conn, &company()).unwrap();
        ReferenceRepo::insert_line(&conn, &line("L1", "4.50")).unwrap();
        let stop = Stop {
            line_code: "L1".to_string(),
            sequence: 1,
            street: None,
            district: Some("Centro".to_string()),
            house_number: None,
            postal_code: None,
            has_shelter: false,
            is_origin: true,
            is_destination: false,
        };
        ReferenceRepo::insert_stop(&conn, &stop).unwrap();
        let err = ReferenceRepo::insert_stop(&conn, &stop).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicateRecord);
        assert_eq!(err.entity_id(), Some("L1#1"));
    }
}
