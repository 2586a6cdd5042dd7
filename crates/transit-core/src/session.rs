//! Session state machine and role gating
//!
//! The presentation layer moves between three states. Registration is only
//! offered from the main menu; reports are gated by the capabilities of the
//! current session.
//!
//! ```text
//!             CitizenAuthenticated
//!   MainMenu ─────────────────────▶ CitizenSession
//!      │  ▲                               │
//!      │  └────────── SignedOut ──────────┘
//!      │  ┌────────── SignedOut ──────────┐
//!      │  ▼                               │
//!      └──────────────────────────▶ ManagerSession
//!             ManagerAuthenticated
//! ```

use std::fmt;

use crate::errors::{Result, TransitError};
use crate::model::{Email, NationalId};

/// Where the caller currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    MainMenu,
    CitizenSession {
        national_id: NationalId,
    },
    ManagerSession {
        email: Email,
    },
}

/// Named transitions between session states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    CitizenAuthenticated(NationalId),
    ManagerAuthenticated(Email),
    SignedOut,
}

/// Groups of operations a session may be allowed to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Trips and spend of the signed-in rider only
    OwnRiderHistory,
    /// Lines by district, stops by address, active lines
    NetworkLookup,
    /// Line demand, popular routes, peak hours, audits
    OperationalReports,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::OwnRiderHistory => f.write_str("own_rider_history"),
            Capability::NetworkLookup => f.write_str("network_lookup"),
            Capability::OperationalReports => f.write_str("operational_reports"),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::MainMenu => f.write_str("main_menu"),
            SessionState::CitizenSession { .. } => f.write_str("citizen_session"),
            SessionState::ManagerSession { .. } => f.write_str("manager_session"),
        }
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::CitizenAuthenticated(_) => f.write_str("citizen_authenticated"),
            SessionEvent::ManagerAuthenticated(_) => f.write_str("manager_authenticated"),
            SessionEvent::SignedOut => f.write_str("signed_out"),
        }
    }
}

impl SessionState {
    /// Apply an event, returning the next state
    pub fn transition(self, event: SessionEvent) -> Result<SessionState> {
        match (self, event) {
            (SessionState::MainMenu, SessionEvent::CitizenAuthenticated(national_id)) => {
                Ok(SessionState::CitizenSession { national_id })
            }
            (SessionState::MainMenu, SessionEvent::ManagerAuthenticated(email)) => {
                Ok(SessionState::ManagerSession { email })
            }
            (SessionState::CitizenSession { .. }, SessionEvent::SignedOut)
            | (SessionState::ManagerSession { .. }, SessionEvent::SignedOut) => {
                Ok(SessionState::MainMenu)
            }
            (state, event) => Err(TransitError::IllegalTransition {
                state: state.to_string(),
                event: event.to_string(),
            }),
        }
    }

    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            SessionState::MainMenu => false,
            SessionState::CitizenSession { .. } => matches!(
                capability,
                Capability::OwnRiderHistory | Capability::NetworkLookup
            ),
            SessionState::ManagerSession { .. } => matches!(
                capability,
                Capability::NetworkLookup | Capability::OperationalReports
            ),
        }
    }

    /// Fail with `Forbidden` unless the session grants `capability`
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.grants(capability) {
            Ok(())
        } else {
            Err(TransitError::Forbidden {
                capability: capability.to_string(),
            })
        }
    }

    /// Registration is only offered from the main menu
    pub fn require_main_menu(&self, action: &str) -> Result<()> {
        match self {
            SessionState::MainMenu => Ok(()),
            state => Err(TransitError::IllegalTransition {
                state: state.to_string(),
                event: action.to_string(),
            }),
        }
    }

    /// Fail with `Forbidden` unless this is the citizen session of `rider`
    pub fn require_rider(&self, rider: &NationalId) -> Result<()> {
        match self {
            SessionState::CitizenSession { national_id } if national_id == rider => Ok(()),
            _ => Err(TransitError::Forbidden {
                capability: Capability::OwnRiderHistory.to_string(),
            }),
        }
    }
}
