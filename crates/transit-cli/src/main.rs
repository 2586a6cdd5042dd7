//! Transit CLI
//!
//! Command-line front end for the transit operator's records

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use transit_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "transit")]
#[command(about = "Transit records - registration and operational reports", long_about = None)]
struct Cli {
    /// SQLite database file (overrides TRANSIT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Register a citizen or a manager
    Register(commands::register::RegisterArgs),
    /// Sign in as a citizen and run a rider or network query
    Citizen(commands::citizen::CitizenArgs),
    /// Sign in as a manager and run an operational report
    Manager(commands::manager::ManagerArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    init(Profile::from_env());

    let cli = Cli::parse();
    let db = cli.db;

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args, db),
        Commands::Register(args) => commands::register::execute(args, db),
        Commands::Citizen(args) => commands::citizen::execute(args, db),
        Commands::Manager(args) => commands::manager::execute(args, db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
