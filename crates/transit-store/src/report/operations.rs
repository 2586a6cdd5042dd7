//! Operational reports: line demand, popular routes, peak hours

#![allow(clippy::result_large_err)]

use rusqlite::types::Type;
use rusqlite::Connection;
use transit_core::errors::{ExError, TransitError};
use transit_core::model::{HourLoad, LineTripCount, Listing, RouteCount};

use super::ReportEngine;
use crate::errors::{from_rusqlite, Result};
use crate::repo::row::count_column;

impl ReportEngine {
    /// Trips per boarding line, busiest first (ties by line code)
    pub fn trip_count_by_boarding_line(conn: &Connection) -> Result<Listing<LineTripCount>> {
        let mut stmt = conn
            .prepare(
                "SELECT boarding_line, COUNT(*) AS trip_count
                 FROM trips
                 GROUP BY boarding_line
                 ORDER BY trip_count DESC, boarding_line ASC",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LineTripCount {
                    line_code: row.get(0)?,
                    trip_count: count_column(row, 1)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    /// Top `limit` (origin district, destination district) pairs
    ///
    /// Trips whose boarding or alighting stop has no district are left out.
    ///
    /// # Errors
    ///
    /// `ValidationFailure` when `limit` is zero.
    pub fn popular_routes(conn: &Connection, limit: u32) -> Result<Listing<RouteCount>> {
        if limit == 0 {
            return Err(ExError::from(TransitError::InvalidLimit { limit }).with_op("popular_routes"));
        }

        let mut stmt = conn
            .prepare(
                "SELECT pe.district AS origin, pd.district AS destination, COUNT(*) AS trip_count
                 FROM trips t
                 JOIN stops pe
                   ON t.boarding_line = pe.line_code AND t.boarding_stop = pe.sequence
                 JOIN stops pd
                   ON t.alighting_line = pd.line_code AND t.alighting_stop = pd.sequence
                 WHERE pe.district IS NOT NULL
                   AND pd.district IS NOT NULL
                 GROUP BY origin, destination
                 ORDER BY trip_count DESC, origin ASC, destination ASC
                 LIMIT ?1",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([limit], |row| {
                Ok(RouteCount {
                    origin_district: row.get(0)?,
                    destination_district: row.get(1)?,
                    trip_count: count_column(row, 2)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    /// Trips started per hour of day, busiest first (ties by hour)
    pub fn peak_hours(conn: &Connection) -> Result<Listing<HourLoad>> {
        let mut stmt = conn
            .prepare(
                "SELECT CAST(strftime('%H', started_at) AS INTEGER) AS hour, COUNT(*) AS trip_count
                 FROM trips
                 GROUP BY hour
                 ORDER BY trip_count DESC, hour ASC",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| {
                let hour: i64 = row.get(0)?;
                let hour = u8::try_from(hour).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(e))
                })?;
                Ok(HourLoad {
                    hour,
                    trip_count: count_column(row, 1)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }
}
