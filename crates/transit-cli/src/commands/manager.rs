//! Manager session commands
//!
//! Signs in, runs one operational report, signs out.
//!
//! Usage:
//!   transit manager --email <E> --credential <C> active-lines
//!   transit manager --email <E> --credential <C> line-demand
//!   transit manager --email <E> --credential <C> routes [--limit N]
//!   transit manager --email <E> --credential <C> peak-hours [--chronological]
//!   transit manager --email <E> --credential <C> audit

use clap::{Args, Subcommand};
use rusqlite::Connection;
use std::path::PathBuf;
use transit_core::SessionState;
use transit_core_types::Sensitive;
use transit_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineQuery, EngineQueryResult,
};

use super::output::{
    fare_mismatch_line, hour_line, line_demand_line, line_line, print_listing, route_line,
    terminus_line,
};
use super::{open_store, CliResult};

#[derive(Debug, Args)]
pub struct ManagerArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TRANSIT_CREDENTIAL", hide_env_values = true)]
    pub credential: String,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
    #[command(subcommand)]
    pub command: ManagerCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManagerCommand {
    /// All active lines
    ActiveLines,
    /// Trip count per boarding line, busiest first
    LineDemand,
    /// Most travelled district pairs
    Routes {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Trips started per hour of the day
    PeakHours {
        /// Order by hour instead of by trip count
        #[arg(long)]
        chronological: bool,
    },
    /// Lines with irregular termini and trips whose cost differs from the fare
    Audit,
}

pub fn execute(args: ManagerArgs, db: Option<PathBuf>) -> CliResult {
    let mut conn = open_store(db)?;
    let mut session = SessionState::default();

    apply_engine_command(
        EngineCommand::SignInManager {
            email: args.email,
            credential: Sensitive::new(args.credential),
        },
        &mut conn,
        &mut session,
    )?;

    let outcome = run_report(args.command, &conn, &session, args.json);
    apply_engine_command(EngineCommand::SignOut, &mut conn, &mut session)?;
    outcome
}

fn run_report(
    command: ManagerCommand,
    conn: &Connection,
    session: &SessionState,
    json: bool,
) -> CliResult {
    match command {
        ManagerCommand::ActiveLines => match apply_engine_query(EngineQuery::ActiveLines, conn, session)? {
            EngineQueryResult::Lines(lines) => {
                print_listing(&lines, json, "No active lines.", line_line)
            }
            other => unexpected(other),
        },
        ManagerCommand::LineDemand => {
            match apply_engine_query(EngineQuery::TripCountByBoardingLine, conn, session)? {
                EngineQueryResult::LineDemand(counts) => {
                    print_listing(&counts, json, "No trips recorded.", line_demand_line)
                }
                other => unexpected(other),
            }
        }
        ManagerCommand::Routes { limit } => {
            match apply_engine_query(EngineQuery::PopularRoutes { limit }, conn, session)? {
                EngineQueryResult::Routes(routes) => {
                    print_listing(&routes, json, "No routes recorded.", route_line)
                }
                other => unexpected(other),
            }
        }
        ManagerCommand::PeakHours { chronological } => {
            match apply_engine_query(EngineQuery::PeakHours, conn, session)? {
                EngineQueryResult::PeakHours(loads) => {
                    let loads = if chronological {
                        loads.into_chronological()
                    } else {
                        loads
                    };
                    print_listing(&loads, json, "No trips recorded.", hour_line)
                }
                other => unexpected(other),
            }
        }
        ManagerCommand::Audit => run_audit(conn, session, json),
    }
}

fn run_audit(conn: &Connection, session: &SessionState, json: bool) -> CliResult {
    let termini = match apply_engine_query(EngineQuery::LinesWithIrregularTermini, conn, session)? {
        EngineQueryResult::IrregularTermini(listing) => listing,
        other => return unexpected(other),
    };
    let mismatches = match apply_engine_query(EngineQuery::FareMismatches, conn, session)? {
        EngineQueryResult::FareMismatches(listing) => listing,
        other => return unexpected(other),
    };

    if json {
        let report = serde_json::json!({
            "irregular_termini": termini,
            "fare_mismatches": mismatches,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Lines with irregular termini:");
    print_listing(&termini, false, "  none", |a| format!("  {}", terminus_line(a)))?;
    println!("Trips whose cost differs from the boarding fare:");
    print_listing(&mismatches, false, "  none", |t| {
        format!("  {}", fare_mismatch_line(t))
    })
}

fn unexpected(result: EngineQueryResult) -> CliResult {
    Err(format!("unexpected query result: {:?}", result).into())
}
