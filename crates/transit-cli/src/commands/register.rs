//! Registration commands
//!
//! Usage:
//!   transit register citizen --national-id <ID> --street <S> --district <D>
//!       [--number <N>] --postal-code <CEP> --email <E> --credential <C>
//!   transit register manager ... --job-title <T> --employer <TAX_ID>

use clap::{Args, Subcommand};
use std::path::PathBuf;
use transit_core::model::{CitizenRegistration, ManagerRegistration};
use transit_core::SessionState;
use transit_core_types::Sensitive;
use transit_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::{open_store, CliResult};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[command(subcommand)]
    pub command: RegisterCommand,
}

#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Register a citizen (rider)
    Citizen(PersonArgs),
    /// Register a manager employed by a public company
    Manager(ManagerArgs),
}

/// Fields shared by both registrations
#[derive(Debug, Args)]
pub struct PersonArgs {
    /// National ID, 11 digits
    #[arg(long)]
    pub national_id: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub district: String,
    /// House number
    #[arg(long)]
    pub number: Option<u32>,
    /// Postal code, 8 digits
    #[arg(long)]
    pub postal_code: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TRANSIT_CREDENTIAL", hide_env_values = true)]
    pub credential: String,
}

#[derive(Debug, Args)]
pub struct ManagerArgs {
    #[command(flatten)]
    pub person: PersonArgs,
    #[arg(long)]
    pub job_title: String,
    /// Employer's tax ID, 14 digits
    #[arg(long)]
    pub employer: String,
}

pub fn execute(args: RegisterArgs, db: Option<PathBuf>) -> CliResult {
    let cmd = match args.command {
        RegisterCommand::Citizen(person) => EngineCommand::RegisterCitizen(CitizenRegistration {
            national_id: person.national_id,
            street: person.street,
            district: person.district,
            house_number: person.number,
            postal_code: person.postal_code,
            email: person.email,
            credential: Sensitive::new(person.credential),
        }),
        RegisterCommand::Manager(manager) => EngineCommand::RegisterManager(ManagerRegistration {
            national_id: manager.person.national_id,
            street: manager.person.street,
            district: manager.person.district,
            house_number: manager.person.number,
            postal_code: manager.person.postal_code,
            job_title: manager.job_title,
            email: manager.person.email,
            credential: Sensitive::new(manager.person.credential),
            employer_tax_id: manager.employer,
        }),
    };

    let mut conn = open_store(db)?;
    let mut session = SessionState::default();
    if let EngineCommandResult::Registered(national_id) =
        apply_engine_command(cmd, &mut conn, &mut session)?
    {
        println!("✓ Registered {}", national_id);
    }
    Ok(())
}
