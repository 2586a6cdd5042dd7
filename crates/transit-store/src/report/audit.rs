//! Audits for business rules the schema leaves unenforced
//!
//! Lines should have exactly one origin and one destination stop, and a trip's
//! recorded cost usually equals its boarding line's fare. Neither is rejected
//! on write; these reports list the exceptions.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use transit_core::model::{Listing, TerminusAnomaly, TripSummary};

use super::rider::{trip_summary_row, TRIP_SUMMARY_SELECT};
use super::ReportEngine;
use crate::errors::{from_rusqlite, Result};
use crate::repo::row::count_column;

impl ReportEngine {
    /// Lines without exactly one origin stop and one destination stop
    pub fn lines_with_irregular_termini(conn: &Connection) -> Result<Listing<TerminusAnomaly>> {
        let mut stmt = conn
            .prepare(
                "SELECT l.code,
                        COALESCE(SUM(s.is_origin), 0) AS origins,
                        COALESCE(SUM(s.is_destination), 0) AS destinations
                 FROM lines l
                 LEFT JOIN stops s ON s.line_code = l.code
                 GROUP BY l.code
                 HAVING origins <> 1 OR destinations <> 1
                 ORDER BY l.code",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TerminusAnomaly {
                    line_code: row.get(0)?,
                    origin_count: count_column(row, 1)?,
                    destination_count: count_column(row, 2)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    /// Trips whose recorded cost differs from the boarding line's fare
    pub fn fare_mismatches(conn: &Connection) -> Result<Listing<TripSummary>> {
        let sql = format!(
            "{} WHERE t.total_cost_cents <> l.fare_cents ORDER BY t.started_at, t.rider_id",
            TRIP_SUMMARY_SELECT
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], trip_summary_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }
}
