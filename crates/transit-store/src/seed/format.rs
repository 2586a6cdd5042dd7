//! Seed format v0
//!
//! ```yaml
//! schema_version: 0
//! companies:
//!   - { tax_id: "12345678000199", name: "SPTrans" }
//! lines:
//!   - { code: "L1", fare: "4.50", transit_minutes: 40, operator_tax_id: "12345678000199" }
//! stops:
//!   - { line_code: "L1", sequence: 1, district: "Centro", is_origin: true }
//! buses:
//!   - { plate: "ABC1D23" }
//! trips:
//!   - rider: "12345678901"
//!     started_at: "2024-05-01T08:00:00"
//!     ...
//! ```
//!
//! Identifiers are digit strings and must be quoted so YAML keeps them as text.

use serde::Deserialize;
use transit_core::model::{
    Bus, CitizenRegistration, Line, ManagerRegistration, PublicCompany, Stop, TripRecord,
};

/// Root seed document
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSeed {
    pub schema_version: u32,
    #[serde(default)]
    pub companies: Vec<PublicCompany>,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub buses: Vec<Bus>,
    #[serde(default)]
    pub citizens: Vec<CitizenRegistration>,
    #[serde(default)]
    pub managers: Vec<ManagerRegistration>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}
