mod common;
use aerodesk::config::Config;
use aerodesk::core::permissions::Operator;
use aerodesk::core::receipt::{Payer, ReceiptInput, ReceiptLogic};
use aerodesk::errors::AppError;
use aerodesk::export::receipt_pdf::{Issuer, declaration_text, write_receipt_pdf};
use aerodesk::models::receipt::Receipt;
use aerodesk::models::role::Role;
use aerodesk::utils::formatting::{format_brl, parse_amount_cents};
use chrono::NaiveDate;
use common::{admin, memory_pool_with_fleet, temp_out};
use std::fs;
use std::path::Path;

fn input(amount: &str, date: (i32, u32, u32)) -> ReceiptInput {
    ReceiptInput {
        payer: Payer::Client(1),
        amount: amount.into(),
        description: "Rateio de horas de voo".into(),
        issue_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
    }
}

#[test]
fn test_amount_parsing() {
    assert_eq!(parse_amount_cents("1.234,56").expect("valid"), 123456);
    assert_eq!(parse_amount_cents("R$ 10,5").expect("valid"), 1050);
    assert_eq!(parse_amount_cents("99.90").expect("valid"), 9990);
    assert_eq!(parse_amount_cents("250").expect("valid"), 25000);
    assert!(parse_amount_cents("abc").is_err());
    assert!(parse_amount_cents("1,234").is_err());
    assert!(parse_amount_cents("-0,50").is_err());
    assert!(parse_amount_cents("1,-5").is_err());
    assert!(parse_amount_cents("+5").is_err());
    assert!(parse_amount_cents("-10").is_err());
    assert_eq!(format_brl(123456), "R$ 1.234,56");
    assert_eq!(format_brl(5), "R$ 0,05");
}

#[test]
fn test_sequence_restarts_each_year() {
    let mut pool = memory_pool_with_fleet();
    let cfg = Config::default();
    let op = admin();

    let a = ReceiptLogic::issue(&mut pool, &op, &cfg, &input("100", (2025, 1, 5))).expect("first");
    let b = ReceiptLogic::issue(&mut pool, &op, &cfg, &input("200", (2025, 7, 1))).expect("second");
    let c = ReceiptLogic::issue(&mut pool, &op, &cfg, &input("300", (2026, 1, 2))).expect("third");

    assert_eq!(a.number(), "001/2025");
    assert_eq!(b.number(), "002/2025");
    assert_eq!(c.number(), "001/2026");
    assert_eq!(a.payer_name, "Acme Participações");

    let found = ReceiptLogic::find(&mut pool, &op, "002/2025").expect("found");
    assert_eq!(found.amount_cents, 20000);
}

#[test]
fn test_issue_validation() {
    let mut pool = memory_pool_with_fleet();
    let cfg = Config::default();
    let op = admin();

    assert!(matches!(
        ReceiptLogic::issue(&mut pool, &op, &cfg, &input("0", (2025, 1, 5))),
        Err(AppError::InvalidAmount(_))
    ));

    let mut blank = input("10", (2025, 1, 5));
    blank.description = "  ".into();
    assert!(ReceiptLogic::issue(&mut pool, &op, &cfg, &blank).is_err());

    let mut unknown = input("10", (2025, 1, 5));
    unknown.payer = Payer::Client(42);
    assert!(matches!(
        ReceiptLogic::issue(&mut pool, &op, &cfg, &unknown),
        Err(AppError::NotFound(_))
    ));

    let pilot = Operator::new("pilot", vec![Role::Pilot]);
    assert!(matches!(
        ReceiptLogic::issue(&mut pool, &pilot, &cfg, &input("10", (2025, 1, 5))),
        Err(AppError::PermissionDenied(_))
    ));
}

fn sample(description: &str) -> Receipt {
    Receipt {
        id: 1,
        year: 2025,
        seq: 7,
        client_id: None,
        payer_name: "José da Silva".into(),
        payer_document: "12345678901".into(),
        description: description.into(),
        amount_cents: 150000,
        issue_date: NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
        city: "São Paulo".into(),
        created_at: String::new(),
    }
}

#[test]
fn test_declaration_mentions_payer_and_amount() {
    let text = declaration_text(&sample("traslado SBSP-SBRJ."));
    assert!(text.contains("José da Silva"));
    assert!(text.contains("R$ 1.500,00"));
    assert!(text.contains("traslado SBSP-SBRJ,"));
}

#[test]
fn test_receipt_pdf_single_page() {
    let out = temp_out("receipt_single", "pdf");
    let pages = write_receipt_pdf(&sample("Traslado"), &Issuer::default(), Path::new(&out))
        .expect("write pdf");

    assert_eq!(pages, 1);
    assert!(fs::read(&out).expect("read pdf").starts_with(b"%PDF"));
}

#[test]
fn test_long_description_flows_to_next_page() {
    let long = "Hora de voo com pernoite e taxas aeroportuárias. ".repeat(120);
    let out = temp_out("receipt_long", "pdf");
    let pages = write_receipt_pdf(&sample(&long), &Issuer::default(), Path::new(&out))
        .expect("write pdf");

    assert!(pages > 1);
}
