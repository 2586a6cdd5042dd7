//! Database connection management
//!
//! The connection provider: reads its settings from the environment, opens
//! the SQLite file, applies pragmas and migrations. Any failure on this path
//! is reported as a single `StoreUnavailable` condition.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use transit_core::errors::{ExError, ExErrorKind};

use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

/// Environment variable naming the SQLite database file
pub const DB_PATH_ENV: &str = "TRANSIT_DB_PATH";
/// Environment variable holding the busy timeout in milliseconds
pub const BUSY_TIMEOUT_ENV: &str = "TRANSIT_BUSY_TIMEOUT_MS";

const DEFAULT_DB_PATH: &str = ".transit/transit.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl StoreConfig {
    /// Read `TRANSIT_DB_PATH` and `TRANSIT_BUSY_TIMEOUT_MS`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                config.db_path = PathBuf::from(path);
            }
        }

        if let Ok(raw) = std::env::var(BUSY_TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                ExError::new(ExErrorKind::ValidationFailure)
                    .with_op("store_config")
                    .with_message(format!("{} must be a whole number, got '{}'", BUSY_TIMEOUT_ENV, raw))
            })?;
            config.busy_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection: foreign keys, WAL journal, busy timeout
pub fn configure(conn: &Connection, busy_timeout: Duration) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // In-memory databases answer "memory"; only file databases switch to WAL.
    let _mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;

    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;

    Ok(())
}

/// Open, configure and migrate the database described by `config`
///
/// The returned connection is the process's single session; dropping it
/// closes the database.
pub fn connect(config: &StoreConfig) -> Result<Connection> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExError::new(ExErrorKind::StoreUnavailable)
                    .with_op("connect")
                    .with_message(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
    }

    let mut conn = open(&config.db_path)?;
    configure(&conn, config.busy_timeout)?;
    apply_migrations(&mut conn)?;

    tracing::debug!(
        db_path = %config.db_path.display(),
        busy_timeout_ms = config.busy_timeout.as_millis() as u64,
        "store connected"
    );

    Ok(conn)
}

/// In-memory equivalent of [`connect`], fully configured and migrated
pub fn connect_in_memory() -> Result<Connection> {
    let mut conn = open_in_memory()?;
    configure(&conn, StoreConfig::default().busy_timeout)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}
