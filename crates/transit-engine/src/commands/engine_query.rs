//! Engine-level read-only query surface.
//!
//! `apply_engine_query` is the single entry point for reports. It takes a
//! shared connection and the current session, refuses queries the session
//! is not allowed to run, and never writes.

#![allow(clippy::result_large_err)]

use rusqlite::Connection;
use transit_core::errors::ExError;
use transit_core::model::{
    HourLoad, LineSummary, LineTripCount, Listing, NationalId, RouteCount, SpendTotal, StopDetail,
    TerminusAnomaly, TripSummary,
};
use transit_core::{Capability, SessionState};
use transit_store::{ReportEngine, Result};

use super::logged;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    // ── Rider history (own ID only) ──────────────────────────────────────────
    TripsForRider { national_id: NationalId },
    TotalSpend { national_id: NationalId },

    // ── Network lookup ───────────────────────────────────────────────────────
    LinesServingDistrict { district: String },
    StopsAt { district: String, street: String },
    ActiveLines,

    // ── Operational reports ──────────────────────────────────────────────────
    TripCountByBoardingLine,
    PopularRoutes { limit: u32 },
    PeakHours,
    LinesWithIrregularTermini,
    FareMismatches,
}

/// Result of an engine query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineQueryResult {
    Trips(Listing<TripSummary>),
    Spend(SpendTotal),
    Lines(Listing<LineSummary>),
    Stops(Listing<StopDetail>),
    LineDemand(Listing<LineTripCount>),
    Routes(Listing<RouteCount>),
    PeakHours(Listing<HourLoad>),
    IrregularTermini(Listing<TerminusAnomaly>),
    FareMismatches(Listing<TripSummary>),
}

impl EngineQuery {
    /// Operation name used in log events
    pub fn op_name(&self) -> &'static str {
        match self {
            EngineQuery::TripsForRider { .. } => "trips_for_rider",
            EngineQuery::TotalSpend { .. } => "total_spend",
            EngineQuery::LinesServingDistrict { .. } => "lines_serving_district",
            EngineQuery::StopsAt { .. } => "stops_at",
            EngineQuery::ActiveLines => "active_lines",
            EngineQuery::TripCountByBoardingLine => "trip_count_by_boarding_line",
            EngineQuery::PopularRoutes { .. } => "popular_routes",
            EngineQuery::PeakHours => "peak_hours",
            EngineQuery::LinesWithIrregularTermini => "lines_with_irregular_termini",
            EngineQuery::FareMismatches => "fare_mismatches",
        }
    }

    fn authorize(&self, session: &SessionState) -> transit_core::Result<()> {
        match self {
            EngineQuery::TripsForRider { national_id } | EngineQuery::TotalSpend { national_id } => {
                session.require_rider(national_id)
            }
            EngineQuery::LinesServingDistrict { .. }
            | EngineQuery::StopsAt { .. }
            | EngineQuery::ActiveLines => session.require(Capability::NetworkLookup),
            EngineQuery::TripCountByBoardingLine
            | EngineQuery::PopularRoutes { .. }
            | EngineQuery::PeakHours
            | EngineQuery::LinesWithIrregularTermini
            | EngineQuery::FareMismatches => session.require(Capability::OperationalReports),
        }
    }
}

/// Apply a read-only query on behalf of `session`
pub fn apply_engine_query(
    query: EngineQuery,
    conn: &Connection,
    session: &SessionState,
) -> Result<EngineQueryResult> {
    let op = query.op_name();
    logged(op, || {
        query
            .authorize(session)
            .map_err(|e| ExError::from(e).with_op(op))?;

        let result = match &query {
            EngineQuery::TripsForRider { national_id } => {
                EngineQueryResult::Trips(ReportEngine::trips_for_rider(conn, national_id)?)
            }
            EngineQuery::TotalSpend { national_id } => {
                EngineQueryResult::Spend(ReportEngine::total_spend(conn, national_id)?)
            }
            EngineQuery::LinesServingDistrict { district } => {
                EngineQueryResult::Lines(ReportEngine::lines_serving_district(conn, district)?)
            }
            EngineQuery::StopsAt { district, street } => {
                EngineQueryResult::Stops(ReportEngine::stops_at(conn, district, street)?)
            }
            EngineQuery::ActiveLines => {
                EngineQueryResult::Lines(ReportEngine::active_lines(conn)?)
            }
            EngineQuery::TripCountByBoardingLine => {
                EngineQueryResult::LineDemand(ReportEngine::trip_count_by_boarding_line(conn)?)
            }
            EngineQuery::PopularRoutes { limit } => {
                EngineQueryResult::Routes(ReportEngine::popular_routes(conn, *limit)?)
            }
            EngineQuery::PeakHours => EngineQueryResult::PeakHours(ReportEngine::peak_hours(conn)?),
            EngineQuery::LinesWithIrregularTermini => EngineQueryResult::IrregularTermini(
                ReportEngine::lines_with_irregular_termini(conn)?,
            ),
            EngineQuery::FareMismatches => {
                EngineQueryResult::FareMismatches(ReportEngine::fare_mismatches(conn)?)
            }
        };

        Ok(result)
    })
}
