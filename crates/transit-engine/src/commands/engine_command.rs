//! Engine-level commands: registration, sign-in/out, seed import.

#![allow(clippy::result_large_err)]

use std::path::PathBuf;

use rusqlite::Connection;
use transit_core::errors::ExError;
use transit_core::model::{CitizenRegistration, ManagerRegistration, NationalId};
use transit_core::{SessionEvent, SessionState};
use transit_core_types::Sensitive;
use transit_store::seed::{import_seed, ImportSummary};
use transit_store::{DomainStore, Result};

use super::logged;

/// Commands that write to the store or move the session
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Register a new citizen; only from the main menu.
    RegisterCitizen(CitizenRegistration),
    /// Register a new manager; only from the main menu.
    RegisterManager(ManagerRegistration),
    /// Authenticate a citizen and open a citizen session.
    SignInCitizen {
        email: String,
        credential: Sensitive<String>,
    },
    /// Authenticate a manager and open a manager session.
    SignInManager {
        email: String,
        credential: Sensitive<String>,
    },
    /// Return to the main menu.
    SignOut,
    /// Load master data from a YAML seed file; only from the main menu.
    ImportSeed { path: PathBuf },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Registered(NationalId),
    /// The session after a successful sign-in.
    SignedIn(SessionState),
    SignedOut,
    SeedImported(ImportSummary),
}

/// Apply an engine command, updating `session` on sign-in and sign-out
pub fn apply_engine_command(
    cmd: EngineCommand,
    conn: &mut Connection,
    session: &mut SessionState,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::RegisterCitizen(registration) => logged("register_citizen", || {
            session
                .require_main_menu("register_citizen")
                .map_err(|e| ExError::from(e).with_op("register_citizen"))?;
            let national_id = DomainStore::register_citizen(conn, &registration)?;
            Ok(EngineCommandResult::Registered(national_id))
        }),

        EngineCommand::RegisterManager(registration) => logged("register_manager", || {
            session
                .require_main_menu("register_manager")
                .map_err(|e| ExError::from(e).with_op("register_manager"))?;
            let national_id = DomainStore::register_manager(conn, &registration)?;
            Ok(EngineCommandResult::Registered(national_id))
        }),

        EngineCommand::SignInCitizen { email, credential } => logged("sign_in_citizen", || {
            session
                .require_main_menu("citizen_authenticated")
                .map_err(|e| ExError::from(e).with_op("sign_in_citizen"))?;
            let national_id = DomainStore::authenticate_citizen(conn, &email, &credential)?;
            transition(session, SessionEvent::CitizenAuthenticated(national_id))?;
            Ok(EngineCommandResult::SignedIn(session.clone()))
        }),

        EngineCommand::SignInManager { email, credential } => logged("sign_in_manager", || {
            session
                .require_main_menu("manager_authenticated")
                .map_err(|e| ExError::from(e).with_op("sign_in_manager"))?;
            let email = DomainStore::authenticate_manager(conn, &email, &credential)?;
            transition(session, SessionEvent::ManagerAuthenticated(email))?;
            Ok(EngineCommandResult::SignedIn(session.clone()))
        }),

        EngineCommand::SignOut => logged("sign_out", || {
            transition(session, SessionEvent::SignedOut)?;
            Ok(EngineCommandResult::SignedOut)
        }),

        EngineCommand::ImportSeed { path } => logged("seed_import", || {
            session
                .require_main_menu("seed_import")
                .map_err(|e| ExError::from(e).with_op("seed_import"))?;
            let summary = import_seed(&path, conn)?;
            Ok(EngineCommandResult::SeedImported(summary))
        }),
    }
}

fn transition(session: &mut SessionState, event: SessionEvent) -> Result<()> {
    let next = session
        .clone()
        .transition(event)
        .map_err(|e| ExError::from(e).with_op("session_transition"))?;
    *session = next;
    Ok(())
}
