use transit_core::errors::ExErrorKind;
use transit_core::model::{CitizenRegistration, ManagerRegistration};
use transit_core_types::Sensitive;
use transit_store::db::connect_in_memory;
use transit_store::DomainStore;

fn secret(value: &str) -> Sensitive<String> {
    Sensitive::new(value.to_string())
}

fn registered() -> rusqlite::Connection {
    let mut conn = connect_in_memory().unwrap();
    conn.execute_batch("INSERT INTO public_companies VALUES ('12345678000199', 'SPTrans');")
        .unwrap();

    DomainStore::register_citizen(
        &mut conn,
        &CitizenRegistration {
            national_id: "12345678901".to_string(),
            street: "Rua das Flores".to_string(),
            district: "Centro".to_string(),
            house_number: Some(120),
            postal_code: "01310100".to_string(),
            email: "ana@example.com".to_string(),
            credential: secret("s3nha"),
        },
    )
    .unwrap();

    DomainStore::register_manager(
        &mut conn,
        &ManagerRegistration {
            national_id: "11122233344".to_string(),
            street: "Rua Boa Vista".to_string(),
            district: "Centro".to_string(),
            house_number: None,
            postal_code: "01014000".to_string(),
            job_title: "Supervisora".to_string(),
            email: "carla@sptrans.example".to_string(),
            credential: secret("gestao"),
            employer_tax_id: "12345678000199".to_string(),
        },
    )
    .unwrap();

    conn
}

#[test]
fn test_register_then_authenticate_citizen() {
    let conn = registered();
    let id = DomainStore::authenticate_citizen(&conn, "ana@example.com", &secret("s3nha")).unwrap();
    assert_eq!(id.as_str(), "12345678901");
}

#[test]
fn test_wrong_email_and_wrong_credential_are_indistinguishable() {
    let conn = registered();

    let wrong_email =
        DomainStore::authenticate_citizen(&conn, "nobody@example.com", &secret("s3nha"))
            .unwrap_err();
    let wrong_credential =
        DomainStore::authenticate_citizen(&conn, "ana@example.com", &secret("S3NHA")).unwrap_err();

    assert_eq!(wrong_email.kind(), ExErrorKind::NotFound);
    assert_eq!(wrong_credential.kind(), ExErrorKind::NotFound);
    assert_eq!(wrong_email.to_string(), wrong_credential.to_string());
}

#[test]
fn test_authenticate_manager() {
    let conn = registered();
    let email =
        DomainStore::authenticate_manager(&conn, " carla@sptrans.example ", &secret("gestao"))
            .unwrap();
    assert_eq!(email.as_str(), "carla@sptrans.example");

    let err = DomainStore::authenticate_manager(&conn, "carla@sptrans.example", &secret("x"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_roles_do_not_cross_authenticate() {
    let conn = registered();
    assert!(
        DomainStore::authenticate_manager(&conn, "ana@example.com", &secret("s3nha")).is_err()
    );
    assert!(
        DomainStore::authenticate_citizen(&conn, "carla@sptrans.example", &secret("gestao"))
            .is_err()
    );
}
