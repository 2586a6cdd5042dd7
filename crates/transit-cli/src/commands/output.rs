//! Rendering of report listings as text or JSON

use serde::Serialize;
use transit_core::model::{
    HourLoad, LineSummary, LineTripCount, Listing, RouteCount, StopDetail, TerminusAnomaly,
    TripSummary,
};

/// Print a listing as pretty JSON, or one text line per row
///
/// An empty listing prints `empty_message` in text mode and
/// `{"result":"empty"}` in JSON mode.
pub fn print_listing<T, F>(
    listing: &Listing<T>,
    json: bool,
    empty_message: &str,
    render: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(listing)?);
        return Ok(());
    }

    match listing {
        Listing::Empty => println!("{}", empty_message),
        Listing::Rows(rows) => {
            for row in rows {
                println!("{}", render(row));
            }
        }
    }
    Ok(())
}

pub fn trip_line(trip: &TripSummary) -> String {
    format!(
        "{} → {}  {} → {}  bus {}  fare R$ {}  paid R$ {}",
        trip.started_at.format("%Y-%m-%d %H:%M"),
        trip.ended_at.format("%Y-%m-%d %H:%M"),
        trip.boarding,
        trip.alighting,
        trip.bus_plate,
        trip.boarding_fare,
        trip.total_cost
    )
}

pub fn fare_mismatch_line(trip: &TripSummary) -> String {
    format!("{}  {}", trip.rider, trip_line(trip))
}

pub fn line_line(line: &LineSummary) -> String {
    let minutes = line
        .transit_minutes
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  R$ {}  {}  {}",
        line.code, line.fare, minutes, line.operator_name
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub fn stop_line(stop: &StopDetail) -> String {
    let number = stop
        .house_number
        .map(|n| format!(", {}", n))
        .unwrap_or_default();
    format!(
        "{}#{}  {}{} - {}  CEP {}  shelter: {}  origin: {}  destination: {}",
        stop.line_code,
        stop.sequence,
        stop.street.as_deref().unwrap_or("-"),
        number,
        stop.district.as_deref().unwrap_or("-"),
        stop.postal_code.as_deref().unwrap_or("-"),
        yes_no(stop.has_shelter),
        yes_no(stop.is_origin),
        yes_no(stop.is_destination)
    )
}

pub fn line_demand_line(count: &LineTripCount) -> String {
    format!("{}: {} trips", count.line_code, count.trip_count)
}

pub fn route_line(route: &RouteCount) -> String {
    format!(
        "{} → {}: {} trips",
        route.origin_district, route.destination_district, route.trip_count
    )
}

pub fn hour_line(load: &HourLoad) -> String {
    format!("{:02}h: {} trips", load.hour, load.trip_count)
}

pub fn terminus_line(anomaly: &TerminusAnomaly) -> String {
    format!(
        "{}: {} origin stop(s), {} destination stop(s)",
        anomaly.line_code, anomaly.origin_count, anomaly.destination_count
    )
}
