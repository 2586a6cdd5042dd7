//! Citizen session commands
//!
//! Signs in, runs one rider or network query, signs out.
//!
//! Usage:
//!   transit citizen --email <E> --credential <C> trips
//!   transit citizen --email <E> --credential <C> spend
//!   transit citizen --email <E> --credential <C> lines --district <D>
//!   transit citizen --email <E> --credential <C> stops --district <D> --street <S>

use clap::{Args, Subcommand};
use rusqlite::Connection;
use std::path::PathBuf;
use transit_core::SessionState;
use transit_core_types::Sensitive;
use transit_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};

use super::output::{line_line, print_listing, stop_line, trip_line};
use super::{open_store, CliResult};

#[derive(Debug, Args)]
pub struct CitizenArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TRANSIT_CREDENTIAL", hide_env_values = true)]
    pub credential: String,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
    #[command(subcommand)]
    pub command: CitizenCommand,
}

#[derive(Debug, Subcommand)]
pub enum CitizenCommand {
    /// List your trips in chronological order
    Trips,
    /// Total spent across your trips
    Spend,
    /// Active lines with a stop in a district
    Lines {
        #[arg(long)]
        district: String,
    },
    /// Stops at a street within a district
    Stops {
        #[arg(long)]
        district: String,
        #[arg(long)]
        street: String,
    },
}

pub fn execute(args: CitizenArgs, db: Option<PathBuf>) -> CliResult {
    let mut conn = open_store(db)?;
    let mut session = SessionState::default();

    let signed_in = apply_engine_command(
        EngineCommand::SignInCitizen {
            email: args.email,
            credential: Sensitive::new(args.credential),
        },
        &mut conn,
        &mut session,
    )?;
    let national_id = match signed_in {
        EngineCommandResult::SignedIn(SessionState::CitizenSession { national_id }) => national_id,
        _ => return Err("sign-in did not open a citizen session".into()),
    };

    let query = match args.command {
        CitizenCommand::Trips => EngineQuery::TripsForRider { national_id },
        CitizenCommand::Spend => EngineQuery::TotalSpend { national_id },
        CitizenCommand::Lines { district } => EngineQuery::LinesServingDistrict { district },
        CitizenCommand::Stops { district, street } => EngineQuery::StopsAt { district, street },
    };

    let outcome = run_query(query, &conn, &session, args.json);
    apply_engine_command(EngineCommand::SignOut, &mut conn, &mut session)?;
    outcome
}

fn run_query(query: EngineQuery, conn: &Connection, session: &SessionState, json: bool) -> CliResult {
    match apply_engine_query(query, conn, session)? {
        EngineQueryResult::Trips(trips) => print_listing(&trips, json, "No trips recorded.", trip_line),
        EngineQueryResult::Spend(spend) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&spend)?);
            } else {
                println!("Total spent: R$ {} over {} trips", spend.total, spend.trip_count);
            }
            Ok(())
        }
        EngineQueryResult::Lines(lines) => {
            print_listing(&lines, json, "No active lines serve that district.", line_line)
        }
        EngineQueryResult::Stops(stops) => {
            print_listing(&stops, json, "No stops found at that address.", stop_line)
        }
        other => Err(format!("unexpected query result: {:?}", other).into()),
    }
}
