use chrono::NaiveDate;
use rusqlite::Connection;
use transit_core::errors::ExErrorKind;
use transit_core::model::{Listing, Money, NationalId};
use transit_store::db::connect_in_memory;
use transit_store::seed::import_seed_str;
use transit_store::ReportEngine;

fn seeded() -> Connection {
    let mut conn = connect_in_memory().unwrap();
    import_seed_str(include_str!("fixtures/network.yaml"), &mut conn).unwrap();
    conn
}

fn rider(id: &str) -> NationalId {
    NationalId::parse(id).unwrap()
}

fn money(value: &str) -> Money {
    Money::parse(value).unwrap()
}

#[test]
fn test_total_spend_sums_recorded_costs() {
    let conn = seeded();
    let spend = ReportEngine::total_spend(&conn, &rider("12345678901")).unwrap();
    assert_eq!(spend.total, money("8.50"));
    assert_eq!(spend.trip_count, 2);
    assert_eq!(spend.total.to_string(), "8.50");
}

#[test]
fn test_total_spend_without_trips_is_zero() {
    let conn = seeded();
    let spend = ReportEngine::total_spend(&conn, &rider("55555555555")).unwrap();
    assert_eq!(spend.total, Money::ZERO);
    assert_eq!(spend.trip_count, 0);
}

#[test]
fn test_trips_for_rider_ordered_by_start() {
    let conn = seeded();
    let trips = ReportEngine::trips_for_rider(&conn, &rider("98765432100")).unwrap();
    let starts: Vec<_> = trips.rows().iter().map(|t| t.started_at).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts.len(), 3);
    assert_eq!(starts, sorted);

    let first = &trips.rows()[0];
    assert_eq!(
        first.started_at,
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    );
    assert_eq!(first.boarding.to_string(), "L1#1");
    assert_eq!(first.alighting.to_string(), "L1#3");
    assert_eq!(first.bus_plate, "ABC1D23");
    assert_eq!(first.boarding_fare, money("4.50"));
}

#[test]
fn test_trip_summary_carries_fare_and_recorded_cost() {
    let conn = seeded();
    let trips = ReportEngine::trips_for_rider(&conn, &rider("12345678901")).unwrap();
    let first = &trips.rows()[0];
    assert_eq!(first.boarding_fare, money("4.50"));
    assert_eq!(first.total_cost, money("5.50"));
}

#[test]
fn test_trips_for_unknown_rider_is_empty() {
    let conn = seeded();
    assert_eq!(
        ReportEngine::trips_for_rider(&conn, &rider("55555555555")).unwrap(),
        Listing::Empty
    );
}

#[test]
fn test_lines_serving_district_only_active_lines() {
    let conn = seeded();
    // L1 (active) and L2 (inactive) both stop in Centro
    for district in ["Centro", "centro", " CENTRO "] {
        let lines = ReportEngine::lines_serving_district(&conn, district).unwrap();
        let codes: Vec<_> = lines.rows().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["L1"], "district {:?}", district);
        assert_eq!(lines.rows()[0].operator_name, "SPTrans");
    }
}

#[test]
fn test_lines_serving_district_deduplicates() {
    let conn = seeded();
    let lines = ReportEngine::lines_serving_district(&conn, "Pinheiros").unwrap();
    let codes: Vec<_> = lines.rows().iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["L1", "L4"]);
}

#[test]
fn test_lines_serving_unknown_district_is_empty() {
    let conn = seeded();
    assert!(ReportEngine::lines_serving_district(&conn, "Atlântida")
        .unwrap()
        .is_empty());
}

#[test]
fn test_stops_at_matches_case_insensitively() {
    let conn = seeded();
    let stops = ReportEngine::stops_at(&conn, "centro", "RUA DIREITA").unwrap();
    let keys: Vec<_> = stops
        .rows()
        .iter()
        .map(|s| (s.line_code.as_str(), s.sequence))
        .collect();
    assert_eq!(keys, vec![("L1", 1), ("L2", 1)]);

    let first = &stops.rows()[0];
    assert!(first.has_shelter);
    assert!(first.is_origin);
    assert!(!first.is_destination);
    assert_eq!(first.postal_code.as_deref(), Some("01002000"));
}

#[test]
fn test_active_lines_ordered_by_code() {
    let conn = seeded();
    let lines = ReportEngine::active_lines(&conn).unwrap();
    let codes: Vec<_> = lines.rows().iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["L1", "L3", "L4"]);
    assert_eq!(lines.rows()[1].operator_name, "Metra");
    assert_eq!(lines.rows()[1].transit_minutes, None);
}

#[test]
fn test_trip_count_by_boarding_line() {
    let conn = seeded();
    let counts = ReportEngine::trip_count_by_boarding_line(&conn).unwrap();
    let pairs: Vec<_> = counts
        .rows()
        .iter()
        .map(|c| (c.line_code.as_str(), c.trip_count))
        .collect();
    assert_eq!(pairs, vec![("L1", 3), ("L2", 1), ("L3", 1)]);
}

#[test]
fn test_popular_routes_exclude_stops_without_district() {
    let conn = seeded();
    let routes = ReportEngine::popular_routes(&conn, 10).unwrap();
    let triples: Vec<_> = routes
        .rows()
        .iter()
        .map(|r| {
            (
                r.origin_district.as_str(),
                r.destination_district.as_str(),
                r.trip_count,
            )
        })
        .collect();
    // the L3 trip alights at a stop without a district
    assert_eq!(
        triples,
        vec![
            ("Centro", "Pinheiros", 2),
            ("Centro", "Sé", 1),
            ("Lapa", "Centro", 1)
        ]
    );
}

#[test]
fn test_popular_routes_respects_limit() {
    let conn = seeded();
    let routes = ReportEngine::popular_routes(&conn, 1).unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes.rows()[0].trip_count, 2);
}

#[test]
fn test_popular_routes_zero_limit_is_validation_failure() {
    let conn = seeded();
    let err = ReportEngine::popular_routes(&conn, 0).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ValidationFailure);
}

#[test]
fn test_peak_hours_busiest_first() {
    let conn = seeded();
    let hours = ReportEngine::peak_hours(&conn).unwrap();
    let pairs: Vec<_> = hours
        .rows()
        .iter()
        .map(|h| (h.hour, h.trip_count))
        .collect();
    assert_eq!(pairs, vec![(8, 3), (18, 2)]);
}

#[test]
fn test_reports_on_empty_store_are_empty() {
    let conn = connect_in_memory().unwrap();
    assert!(ReportEngine::active_lines(&conn).unwrap().is_empty());
    assert!(ReportEngine::trip_count_by_boarding_line(&conn)
        .unwrap()
        .is_empty());
    assert!(ReportEngine::popular_routes(&conn, 5).unwrap().is_empty());
    assert!(ReportEngine::peak_hours(&conn).unwrap().is_empty());
    assert!(ReportEngine::fare_mismatches(&conn).unwrap().is_empty());
}

#[test]
fn test_irregular_termini_audit() {
    let conn = seeded();
    let anomalies = ReportEngine::lines_with_irregular_termini(&conn).unwrap();
    assert_eq!(anomalies.len(), 1);
    let l4 = &anomalies.rows()[0];
    assert_eq!(l4.line_code, "L4");
    assert_eq!(l4.origin_count, 1);
    assert_eq!(l4.destination_count, 0);
}

#[test]
fn test_fare_mismatch_audit() {
    let conn = seeded();
    let mismatches = ReportEngine::fare_mismatches(&conn).unwrap();
    assert_eq!(mismatches.len(), 1);
    let trip = &mismatches.rows()[0];
    assert_eq!(trip.rider, "12345678901");
    assert_eq!(trip.total_cost, money("5.50"));
    assert_eq!(trip.boarding_fare, money("4.50"));
}
