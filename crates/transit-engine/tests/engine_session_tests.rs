use std::path::PathBuf;

use rusqlite::Connection;
use transit_core::errors::ExErrorKind;
use transit_core::model::{CitizenRegistration, Listing, NationalId};
use transit_core::SessionState;
use transit_core_types::Sensitive;
use transit_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};
use transit_store::db::connect_in_memory;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../transit-store/tests/fixtures/network.yaml")
}

fn seeded() -> (Connection, SessionState) {
    let mut conn = connect_in_memory().unwrap();
    let mut session = SessionState::default();
    let result = apply_engine_command(
        EngineCommand::ImportSeed { path: fixture() },
        &mut conn,
        &mut session,
    )
    .unwrap();
    assert!(matches!(result, EngineCommandResult::SeedImported(_)));
    (conn, session)
}

fn sign_in_citizen(conn: &mut Connection, session: &mut SessionState) {
    apply_engine_command(
        EngineCommand::SignInCitizen {
            email: "ana@example.com".to_string(),
            credential: Sensitive::new("s3nha".to_string()),
        },
        conn,
        session,
    )
    .unwrap();
}

fn sign_in_manager(conn: &mut Connection, session: &mut SessionState) {
    apply_engine_command(
        EngineCommand::SignInManager {
            email: "carla@sptrans.example".to_string(),
            credential: Sensitive::new("gestao".to_string()),
        },
        conn,
        session,
    )
    .unwrap();
}

fn ana() -> NationalId {
    NationalId::parse("12345678901").unwrap()
}

#[test]
fn test_citizen_session_sees_own_history_and_network() {
    let (mut conn, mut session) = seeded();
    sign_in_citizen(&mut conn, &mut session);
    assert_eq!(
        session,
        SessionState::CitizenSession {
            national_id: ana()
        }
    );

    match apply_engine_query(
        EngineQuery::TotalSpend {
            national_id: ana(),
        },
        &conn,
        &session,
    )
    .unwrap()
    {
        EngineQueryResult::Spend(spend) => {
            assert_eq!(spend.total.to_string(), "8.50");
            assert_eq!(spend.trip_count, 2);
        }
        other => panic!("unexpected result {:?}", other),
    }

    let lines = apply_engine_query(
        EngineQuery::LinesServingDistrict {
            district: "Centro".to_string(),
        },
        &conn,
        &session,
    )
    .unwrap();
    assert!(matches!(lines, EngineQueryResult::Lines(Listing::Rows(ref rows)) if rows.len() == 1));
}

#[test]
fn test_citizen_cannot_read_other_riders_or_operational_reports() {
    let (mut conn, mut session) = seeded();
    sign_in_citizen(&mut conn, &mut session);

    let other = NationalId::parse("98765432100").unwrap();
    let err = apply_engine_query(
        EngineQuery::TripsForRider { national_id: other },
        &conn,
        &session,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let err = apply_engine_query(EngineQuery::PeakHours, &conn, &session).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_manager_session_runs_operational_reports() {
    let (mut conn, mut session) = seeded();
    sign_in_manager(&mut conn, &mut session);

    let routes = apply_engine_query(EngineQuery::PopularRoutes { limit: 2 }, &conn, &session)
        .unwrap();
    match routes {
        EngineQueryResult::Routes(listing) => assert_eq!(listing.len(), 2),
        other => panic!("unexpected result {:?}", other),
    }

    assert!(apply_engine_query(EngineQuery::ActiveLines, &conn, &session).is_ok());
    assert!(apply_engine_query(EngineQuery::FareMismatches, &conn, &session).is_ok());

    let err = apply_engine_query(
        EngineQuery::TripsForRider {
            national_id: ana(),
        },
        &conn,
        &session,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_main_menu_grants_no_reports() {
    let (conn, session) = seeded();
    let err = apply_engine_query(EngineQuery::ActiveLines, &conn, &session).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_failed_sign_in_stays_in_main_menu() {
    let (mut conn, mut session) = seeded();
    let err = apply_engine_command(
        EngineCommand::SignInCitizen {
            email: "ana@example.com".to_string(),
            credential: Sensitive::new("wrong".to_string()),
        },
        &mut conn,
        &mut session,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(session, SessionState::MainMenu);
}

#[test]
fn test_sign_out_returns_to_main_menu() {
    let (mut conn, mut session) = seeded();
    sign_in_manager(&mut conn, &mut session);
    apply_engine_command(EngineCommand::SignOut, &mut conn, &mut session).unwrap();
    assert_eq!(session, SessionState::MainMenu);

    let err = apply_engine_command(EngineCommand::SignOut, &mut conn, &mut session).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::IllegalTransition);
}

#[test]
fn test_registration_refused_inside_a_session() {
    let (mut conn, mut session) = seeded();
    sign_in_citizen(&mut conn, &mut session);

    let registration = CitizenRegistration {
        national_id: "55555555555".to_string(),
        street: "Rua Nova".to_string(),
        district: "Lapa".to_string(),
        house_number: None,
        postal_code: "05050000".to_string(),
        email: "novo@example.com".to_string(),
        credential: Sensitive::new("abc".to_string()),
    };
    let err = apply_engine_command(
        EngineCommand::RegisterCitizen(registration.clone()),
        &mut conn,
        &mut session,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::IllegalTransition);

    apply_engine_command(EngineCommand::SignOut, &mut conn, &mut session).unwrap();
    let result = apply_engine_command(
        EngineCommand::RegisterCitizen(registration),
        &mut conn,
        &mut session,
    )
    .unwrap();
    assert!(matches!(result, EngineCommandResult::Registered(id) if id.as_str() == "55555555555"));
}

#[test]
fn test_seed_import_refused_inside_a_session() {
    let (mut conn, mut session) = seeded();
    sign_in_citizen(&mut conn, &mut session);

    let err = apply_engine_command(
        EngineCommand::ImportSeed { path: fixture() },
        &mut conn,
        &mut session,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::IllegalTransition);
    assert_eq!(err.op(), Some("seed_import"));
    assert!(matches!(session, SessionState::CitizenSession { .. }));
}
