//! Rider history: trips and total spend for one national ID

#![allow(clippy::result_large_err)]

use rusqlite::{Connection, Row};
use transit_core::model::{Listing, NationalId, SpendTotal, StopRef, TripSummary};

use super::ReportEngine;
use crate::errors::{from_rusqlite, Result};
use crate::repo::row::{count_column, money_column, timestamp_column};

/// Columns shared by every query producing `TripSummary` rows
pub(super) const TRIP_SUMMARY_SELECT: &str = "
    SELECT t.rider_id, t.started_at, t.ended_at,
           t.boarding_line, t.boarding_stop, t.alighting_line, t.alighting_stop,
           b.plate, l.fare_cents, t.total_cost_cents
    FROM trips t
    JOIN buses b ON t.bus_plate = b.plate
    JOIN lines l ON t.boarding_line = l.code";

pub(super) fn trip_summary_row(row: &Row<'_>) -> rusqlite::Result<TripSummary> {
    Ok(TripSummary {
        rider: row.get(0)?,
        started_at: timestamp_column(row, 1)?,
        ended_at: timestamp_column(row, 2)?,
        boarding: StopRef {
            line: row.get(3)?,
            stop: row.get(4)?,
        },
        alighting: StopRef {
            line: row.get(5)?,
            stop: row.get(6)?,
        },
        bus_plate: row.get(7)?,
        boarding_fare: money_column(row, 8)?,
        total_cost: money_column(row, 9)?,
    })
}

impl ReportEngine {
    /// Trips of one rider, oldest first, with the boarding line's fare
    pub fn trips_for_rider(conn: &Connection, rider: &NationalId) -> Result<Listing<TripSummary>> {
        let sql = format!(
            "{} WHERE t.rider_id = ?1 ORDER BY t.started_at",
            TRIP_SUMMARY_SELECT
        );
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([rider.as_str()], trip_summary_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    /// Sum of recorded trip costs and trip count; `(0, 0)` without trips
    pub fn total_spend(conn: &Connection, rider: &NationalId) -> Result<SpendTotal> {
        conn.query_row(
            "SELECT COALESCE(SUM(total_cost_cents), 0), COUNT(*)
             FROM trips WHERE rider_id = ?1",
            [rider.as_str()],
            |row| {
                Ok(SpendTotal {
                    total: money_column(row, 0)?,
                    trip_count: count_column(row, 1)?,
                })
            },
        )
        .map_err(from_rusqlite)
    }
}
