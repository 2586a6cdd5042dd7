//! Seed import command
//!
//! Usage: transit seed import <PATH>

use clap::{Args, Subcommand};
use std::path::PathBuf;
use transit_core::SessionState;
use transit_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

use super::{open_store, CliResult};

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every .yaml/.yml file in a directory
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(args: SeedArgs, db: Option<PathBuf>) -> CliResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, db),
    }
}

fn execute_import(args: ImportArgs, db: Option<PathBuf>) -> CliResult {
    let mut conn = open_store(db)?;
    let mut session = SessionState::default();

    let seed_files = if args.path.is_dir() {
        // sorted so later files may reference earlier ones
        let mut files: Vec<PathBuf> = std::fs::read_dir(&args.path)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    } else {
        vec![args.path]
    };

    for seed_file in seed_files {
        println!("Importing {}...", seed_file.display());
        let result = apply_engine_command(
            EngineCommand::ImportSeed { path: seed_file },
            &mut conn,
            &mut session,
        )?;
        if let EngineCommandResult::SeedImported(summary) = result {
            println!(
                "✓ Imported {} lines, {} stops, {} buses, {} citizens, {} managers, {} trips (digest: {})",
                summary.lines,
                summary.stops,
                summary.buses,
                summary.citizens,
                summary.managers,
                summary.trips,
                summary.digest
            );
        }
    }

    Ok(())
}
