//! Row types returned by the report queries
//!
//! Reports never fail on "no matching rows"; they return [`Listing::Empty`].

use chrono::NaiveDateTime;
use serde::Serialize;

use super::money::Money;
use super::network::StopRef;

/// Result of a listing report: explicitly empty, or at least one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "rows", rename_all = "snake_case")]
pub enum Listing<T> {
    Empty,
    Rows(Vec<T>),
}

impl<T> Listing<T> {
    /// Wrap query rows, mapping an empty vector to [`Listing::Empty`]
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Listing::Empty
        } else {
            Listing::Rows(rows)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::Empty => &[],
            Listing::Rows(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Listing::Empty => Vec::new(),
            Listing::Rows(rows) => rows,
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(rows: Vec<T>) -> Self {
        Listing::from_rows(rows)
    }
}

/// One trip as shown to its rider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub rider: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub boarding: StopRef,
    pub alighting: StopRef,
    pub bus_plate: String,
    /// Current fare of the boarding line
    pub boarding_fare: Money,
    /// Cost recorded on the trip itself
    pub total_cost: Money,
}

/// Total spent by a rider across all recorded trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendTotal {
    pub total: Money,
    pub trip_count: u64,
}

/// Line with its operating company's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineSummary {
    pub code: String,
    pub fare: Money,
    pub transit_minutes: Option<u32>,
    pub operator_name: String,
}

/// Full stop record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopDetail {
    pub line_code: String,
    pub sequence: u32,
    pub street: Option<String>,
    pub district: Option<String>,
    pub house_number: Option<u32>,
    pub postal_code: Option<String>,
    pub has_shelter: bool,
    pub is_origin: bool,
    pub is_destination: bool,
}

/// Trip count for one boarding line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTripCount {
    pub line_code: String,
    pub trip_count: u64,
}

/// Trip count between two districts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteCount {
    pub origin_district: String,
    pub destination_district: String,
    pub trip_count: u64,
}

/// Trips started within one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourLoad {
    /// 0..=23
    pub hour: u8,
    pub trip_count: u64,
}

impl Listing<HourLoad> {
    /// Re-sort a busiest-first peak-hour listing into hour order
    pub fn into_chronological(self) -> Self {
        match self {
            Listing::Empty => Listing::Empty,
            Listing::Rows(mut rows) => {
                rows.sort_by_key(|load| load.hour);
                Listing::Rows(rows)
            }
        }
    }
}

/// Line whose stops do not contain exactly one origin and one destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminusAnomaly {
    pub line_code: String,
    pub origin_count: u64,
    pub destination_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_from_empty_rows_is_empty_marker() {
        let listing: Listing<u8> = Listing::from_rows(Vec::new());
        assert_eq!(listing, Listing::Empty);
        assert!(listing.is_empty());
        assert_eq!(listing.len(), 0);
    }

    #[test]
    fn test_listing_serializes_explicit_marker() {
        let empty: Listing<u8> = Listing::Empty;
        assert_eq!(
            serde_json::to_string(&empty).unwrap(),
            r#"{"result":"empty"}"#
        );
        let rows = Listing::from_rows(vec![1u8, 2]);
        assert_eq!(
            serde_json::to_string(&rows).unwrap(),
            r#"{"result":"rows","rows":[1,2]}"#
        );
    }

    #[test]
    fn test_peak_hours_chronological_resort() {
        let busiest_first = Listing::from_rows(vec![
            HourLoad {
                hour: 18,
                trip_count: 9,
            },
            HourLoad {
                hour: 7,
                trip_count: 8,
            },
            HourLoad {
                hour: 12,
                trip_count: 2,
            },
        ]);
        let hours: Vec<u8> = busiest_first
            .into_chronological()
            .rows()
            .iter()
            .map(|l| l.hour)
            .collect();
        assert_eq!(hours, vec![7, 12, 18]);
    }
}
