use rusqlite::Connection;
use transit_store::db::{connect, connect_in_memory, StoreConfig};
use transit_store::migrations::apply_migrations;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_migrations_create_all_tables() {
    let conn = connect_in_memory().unwrap();
    let tables = table_names(&conn);
    for expected in [
        "buses",
        "citizens",
        "lines",
        "managers",
        "public_companies",
        "schema_version",
        "stops",
        "trips",
        "users",
    ] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {}",
            expected
        );
    }
}

#[test]
fn test_migrations_are_idempotent_on_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = StoreConfig::default().with_db_path(dir.path().join("transit.db"));

    drop(connect(&config).unwrap());
    let mut conn = connect(&config).unwrap();
    apply_migrations(&mut conn).unwrap();

    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(applied, 1);
}

#[test]
fn test_role_row_must_match_user_role() {
    let conn = connect_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO public_companies VALUES ('12345678000199', 'SPTrans');
         INSERT INTO users VALUES ('12345678901', 'C');",
    )
    .unwrap();

    // a citizen's national ID cannot also carry a manager row
    let result = conn.execute(
        "INSERT INTO managers (national_id, street, district, postal_code, job_title, email,
                               credential_hash, employer_tax_id)
         VALUES ('12345678901', 'Rua A', 'Centro', '01310100', 'Gerente', 'x@y',
                 'h', '12345678000199')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_schema_rejects_malformed_identifiers() {
    let conn = connect_in_memory().unwrap();
    assert!(conn
        .execute("INSERT INTO users VALUES ('1234567890A', 'C')", [])
        .is_err());
    assert!(conn
        .execute("INSERT INTO public_companies VALUES ('123', 'Short')", [])
        .is_err());
}

#[test]
fn test_trip_cannot_end_before_start() {
    let conn = connect_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO public_companies VALUES ('12345678000199', 'SPTrans');
         INSERT INTO lines (code, fare_cents, operator_tax_id) VALUES ('L1', 450, '12345678000199');
         INSERT INTO stops (line_code, sequence) VALUES ('L1', 1);
         INSERT INTO buses VALUES ('ABC1D23');
         INSERT INTO users VALUES ('12345678901', 'C');
         INSERT INTO citizens (national_id, street, district, postal_code, email, credential_hash)
         VALUES ('12345678901', 'Rua A', 'Centro', '01310100', 'a@b', 'h');",
    )
    .unwrap();

    let result = conn.execute(
        "INSERT INTO trips VALUES ('12345678901', '2024-05-01 09:00:00', '2024-05-01 08:00:00',
                                   450, 'L1', 1, 'L1', 1, 'ABC1D23')",
        [],
    );
    assert!(result.is_err());
}
