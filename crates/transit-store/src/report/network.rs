//! Network lookups: lines by district, stops by address, active lines

#![allow(clippy::result_large_err)]

use rusqlite::{Connection, Row};
use transit_core::model::{LineSummary, Listing, StopDetail};

use super::ReportEngine;
use crate::errors::{from_rusqlite, Result};
use crate::repo::row::{money_column, optional_u32_column};

fn line_summary_row(row: &Row<'_>) -> rusqlite::Result<LineSummary> {
    Ok(LineSummary {
        code: row.get(0)?,
        fare: money_column(row, 1)?,
        transit_minutes: optional_u32_column(row, 2)?,
        operator_name: row.get(3)?,
    })
}

fn stop_detail_row(row: &Row<'_>) -> rusqlite::Result<StopDetail> {
    Ok(StopDetail {
        line_code: row.get(0)?,
        sequence: row.get(1)?,
        street: row.get(2)?,
        district: row.get(3)?,
        house_number: optional_u32_column(row, 4)?,
        postal_code: row.get(5)?,
        has_shelter: row.get(6)?,
        is_origin: row.get(7)?,
        is_destination: row.get(8)?,
    })
}

impl ReportEngine {
    /// Active lines with at least one stop in `district` (case-insensitive)
    pub fn lines_serving_district(
        conn: &Connection,
        district: &str,
    ) -> Result<Listing<LineSummary>> {
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT l.code, l.fare_cents, l.transit_minutes, c.name
                 FROM lines l
                 JOIN stops s ON s.line_code = l.code
                 JOIN public_companies c ON l.operator_tax_id = c.tax_id
                 WHERE s.district = ?1 COLLATE NOCASE
                   AND l.active = 1
                 ORDER BY l.code",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([district.trim()], line_summary_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    /// Stops on `street` in `district`, both matched case-insensitively
    pub fn stops_at(
        conn: &Connection,
        district: &str,
        street: &str,
    ) -> Result<Listing<StopDetail>> {
        let mut stmt = conn
            .prepare(
                "SELECT line_code, sequence, street, district, house_number, postal_code,
                        has_shelter, is_origin, is_destination
                 FROM stops
                 WHERE district = ?1 COLLATE NOCASE
                   AND street = ?2 COLLATE NOCASE
                 ORDER BY line_code, sequence",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([district.trim(), street.trim()], stop_detail_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }

    pub fn active_lines(conn: &Connection) -> Result<Listing<LineSummary>> {
        let mut stmt = conn
            .prepare(
                "SELECT l.code, l.fare_cents, l.transit_minutes, c.name
                 FROM lines l
                 JOIN public_companies c ON l.operator_tax_id = c.tax_id
                 WHERE l.active = 1
                 ORDER BY l.code",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], line_summary_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        Ok(Listing::from_rows(rows))
    }
}
