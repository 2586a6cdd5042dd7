//! Reference data (companies, lines, stops, buses) and historical trips
//!
//! These are the records the seed importer loads. Lines, stops, buses and
//! companies are master data; trips are append-only facts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::identity::{NationalId, PostalCode, TaxId};
use super::money::Money;
use crate::errors::{Result, TransitError};

/// Public company operating lines and employing managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCompany {
    pub tax_id: TaxId,
    pub name: String,
}

/// Bus line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub code: String,
    pub fare: Money,
    /// Estimated end-to-end transit time in minutes
    #[serde(default)]
    pub transit_minutes: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub operator_tax_id: TaxId,
}

fn default_active() -> bool {
    true
}

/// Stop along a line, keyed by (line code, sequence)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub line_code: String,
    pub sequence: u32,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub house_number: Option<u32>,
    #[serde(default)]
    pub postal_code: Option<PostalCode>,
    #[serde(default)]
    pub has_shelter: bool,
    #[serde(default)]
    pub is_origin: bool,
    #[serde(default)]
    pub is_destination: bool,
}

impl Stop {
    pub fn key(&self) -> StopRef {
        StopRef {
            line: self.line_code.clone(),
            stop: self.sequence,
        }
    }
}

/// Vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    pub plate: String,
}

/// Reference to a stop: (line code, sequence number)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopRef {
    pub line: String,
    pub stop: u32,
}

impl std::fmt::Display for StopRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.line, self.stop)
    }
}

/// A completed trip, identified by (rider, started_at)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub rider: NationalId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    /// Independently recorded cost; not derived from the line fare
    pub total_cost: Money,
    pub boarding: StopRef,
    pub alighting: StopRef,
    pub bus_plate: String,
}

impl TripRecord {
    /// Check the in-record invariants (end not before start)
    pub fn validate(&self) -> Result<()> {
        if self.ended_at < self.started_at {
            return Err(TransitError::TripEndsBeforeStart {
                national_id: self.rider.to_string(),
                started_at: self.started_at.to_string(),
            });
        }
        Ok(())
    }
}
