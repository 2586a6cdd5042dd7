//! Subcommands and the helpers they share

pub mod citizen;
pub mod manager;
pub mod output;
pub mod register;
pub mod seed;

use rusqlite::Connection;
use std::path::PathBuf;
use transit_store::db::{connect, StoreConfig};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the store, letting `--db` win over `TRANSIT_DB_PATH`
pub fn open_store(db: Option<PathBuf>) -> Result<Connection, Box<dyn std::error::Error>> {
    let mut config = StoreConfig::from_env()?;
    if let Some(path) = db {
        config = config.with_db_path(path);
    }
    Ok(connect(&config)?)
}
