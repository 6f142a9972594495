mod common;
use aerodesk::core::logbook::{LegInput, LogbookLogic};
use aerodesk::core::portal::{PortalLogic, hash_token, lookup, new_token};
use aerodesk::errors::AppError;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::{PIC, REG, admin, memory_pool_with_fleet};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).single().expect("valid instant")
}

#[test]
fn test_lookup_matches_cnpj_prefix_and_registration() {
    let pool = memory_pool_with_fleet();

    let (client, aircraft) = lookup(&pool.conn, "1234", "pr-abc").expect("login ok");
    assert_eq!(client.name, "Acme Participações");
    assert_eq!(aircraft.registration, REG);
}

#[test]
fn test_lookup_rejects_wrong_prefix() {
    let pool = memory_pool_with_fleet();
    assert!(matches!(
        lookup(&pool.conn, "9999", REG),
        Err(AppError::PortalLoginFailed)
    ));
}

#[test]
fn test_lookup_rejects_unknown_registration() {
    let pool = memory_pool_with_fleet();
    assert!(matches!(
        lookup(&pool.conn, "1234", "PT-ZZZ"),
        Err(AppError::PortalLoginFailed)
    ));
}

#[test]
fn test_lookup_requires_four_digits() {
    let pool = memory_pool_with_fleet();
    for prefix in ["123", "12345", "12.3", "", "abcd"] {
        assert!(
            matches!(lookup(&pool.conn, prefix, REG), Err(AppError::PortalLoginFailed)),
            "prefix {prefix:?}"
        );
    }
}

#[test]
fn test_tokens_are_random_and_hashed() {
    let a = new_token();
    let b = new_token();
    assert_ne!(a, b);
    assert_eq!(a.len(), 64);
    assert_eq!(hash_token(&a), hash_token(&a));
    assert_ne!(hash_token(&a), a);
}

#[test]
fn test_session_lifecycle() {
    let mut pool = memory_pool_with_fleet();

    let login = PortalLogic::login(&mut pool, "1234", REG, 12, now()).expect("login ok");
    assert_eq!(login.session.expires_at, now() + Duration::hours(12));

    let session = PortalLogic::validate(&pool.conn, &login.token, now()).expect("valid session");
    assert_eq!(session.client_name, "Acme Participações");

    // expired after the TTL
    let later = now() + Duration::hours(12);
    assert!(matches!(
        PortalLogic::validate(&pool.conn, &login.token, later),
        Err(AppError::PortalSessionInvalid)
    ));

    // logout revokes
    PortalLogic::logout(&mut pool, &login.token, now()).expect("logout ok");
    assert!(matches!(
        PortalLogic::validate(&pool.conn, &login.token, now()),
        Err(AppError::PortalSessionInvalid)
    ));
}

#[test]
fn test_session_lifetime_out_of_range_is_config_error() {
    let mut pool = memory_pool_with_fleet();

    for ttl in [0, -3, i64::MAX] {
        assert!(matches!(
            PortalLogic::login(&mut pool, "1234", REG, ttl, now()),
            Err(AppError::Config(_))
        ));
    }
}

#[test]
fn test_unknown_token_is_invalid() {
    let pool = memory_pool_with_fleet();
    assert!(matches!(
        PortalLogic::validate(&pool.conn, "deadbeef", now()),
        Err(AppError::PortalSessionInvalid)
    ));
}

#[test]
fn test_summary_separates_client_hours() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let day = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
    let mut leg = LegInput {
        date: Some(day),
        departure: Some("SBSP".into()),
        arrival: Some("SBRJ".into()),
        flight: Some(1.5),
        pic: Some(PIC.into()),
        client_id: Some(1),
        ..Default::default()
    };
    LogbookLogic::add_leg(&mut pool, &op, REG, &leg).expect("client leg");

    leg.client_id = None;
    leg.flight = Some(1.0);
    LogbookLogic::add_leg(&mut pool, &op, REG, &leg).expect("other leg");

    let login = PortalLogic::login(&mut pool, "1234", REG, 12, now()).expect("login ok");
    let summary = PortalLogic::summary(&mut pool, &login.token, None, now()).expect("summary");

    assert_eq!(summary.legs.len(), 2);
    assert_eq!(summary.aircraft_totals.flight_hours, 2.5);
    assert_eq!(summary.client_totals.flight_hours, 1.5);
    assert_eq!(summary.cell_hours, Some(189.8));
}

#[test]
fn test_summary_needs_valid_token() {
    let mut pool = memory_pool_with_fleet();
    assert!(matches!(
        PortalLogic::summary(&mut pool, "nope", None, now()),
        Err(AppError::PortalSessionInvalid)
    ));
}
