use aerodesk::core::calculator::cell::{CellProjection, running_cell};
use aerodesk::core::calculator::hours::{
    format_decimal_hours_to_hhmm, parse_hhmm_to_decimal, parse_hours_strict, round2,
};
use aerodesk::core::calculator::totals::{FlightTotals, fuel_used};
use aerodesk::models::logbook_entry::LogbookEntry;
use chrono::NaiveDate;

fn leg(flight: f64, night: f64, fuel_added: f64, fuel_remaining: f64) -> LogbookEntry {
    let mut e = LogbookEntry::blank(1, NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"));
    e.departure = "SBSP".into();
    e.arrival = "SBRJ".into();
    e.flight_hours = flight;
    e.night_hours = night;
    e.day_hours = flight - night;
    e.cell_delta = flight;
    e.fuel_added = fuel_added;
    e.fuel_remaining = fuel_remaining;
    e
}

#[test]
fn test_hhmm_to_decimal() {
    assert_eq!(parse_hhmm_to_decimal("01:30"), 1.5);
    assert_eq!(parse_hhmm_to_decimal("0:45"), 0.75);
    assert_eq!(parse_hhmm_to_decimal("12:00"), 12.0);
}

#[test]
fn test_hhmm_lenient_on_bad_input() {
    assert_eq!(parse_hhmm_to_decimal(""), 0.0);
    assert_eq!(parse_hhmm_to_decimal("abc"), 0.0);
    assert_eq!(parse_hhmm_to_decimal("1:75"), 0.0);
    assert_eq!(parse_hhmm_to_decimal("1:5"), 0.0);
}

#[test]
fn test_decimal_to_hhmm() {
    assert_eq!(format_decimal_hours_to_hhmm(1.5), "01:30");
    assert_eq!(format_decimal_hours_to_hhmm(0.0), "00:00");
    assert_eq!(format_decimal_hours_to_hhmm(-2.0), "00:00");
    assert_eq!(format_decimal_hours_to_hhmm(2.7), "02:42");
    assert_eq!(format_decimal_hours_to_hhmm(125.25), "125:15");
}

#[test]
fn test_hhmm_survives_round_trip() {
    for s in ["00:01", "01:30", "02:42", "10:59", "99:00"] {
        assert_eq!(format_decimal_hours_to_hhmm(parse_hhmm_to_decimal(s)), s);
    }
}

#[test]
fn test_strict_hours_rejects_garbage() {
    assert_eq!(parse_hours_strict("1:30").expect("valid"), 1.5);
    assert_eq!(parse_hours_strict("1,5").expect("valid"), 1.5);
    assert_eq!(parse_hours_strict("2.25").expect("valid"), 2.25);
    assert!(parse_hours_strict("1:99").is_err());
    assert!(parse_hours_strict("abc").is_err());
    assert!(parse_hours_strict("-1").is_err());
}

#[test]
fn test_cell_projection_to_next_boundary() {
    let p = CellProjection::from_cell_end(187.3, 10.0);
    assert_eq!(p.cell_end, 187.3);
    assert_eq!(p.cell_prev, 190.0);
    assert_eq!(p.cell_disp, 2.7);
}

#[test]
fn test_cell_projection_on_boundary() {
    let p = CellProjection::from_cell_end(190.0, 10.0);
    assert_eq!(p.cell_prev, 190.0);
    assert_eq!(p.cell_disp, 0.0);

    // float noise just under the boundary
    let p = CellProjection::from_cell_end(189.999999, 10.0);
    assert_eq!(p.cell_prev, 190.0);
    assert_eq!(p.cell_disp, 0.0);
}

#[test]
fn test_cell_projection_bad_interval_uses_default() {
    let p = CellProjection::from_cell_end(3.5, 0.0);
    assert_eq!(p.cell_prev, 10.0);
    assert_eq!(p.cell_disp, 6.5);
}

#[test]
fn test_running_cell() {
    let cells = running_cell(187.3, &[1.5, 0.7]);
    assert_eq!(cells, vec![(187.3, 188.8), (188.8, 189.5)]);
}

#[test]
fn test_totals_sum_legs() {
    let legs = vec![leg(1.5, 0.5, 100.0, 300.0), leg(2.0, 0.0, 0.0, 150.0)];
    let t = FlightTotals::from_entries(&legs);

    assert_eq!(t.legs, 2);
    assert_eq!(t.flight_hours, 3.5);
    assert_eq!(t.night_hours, 0.5);
    assert_eq!(t.day_hours, 3.0);
    assert_eq!(t.landings, 2);
    assert_eq!(t.fuel_added, 100.0);
    assert_eq!(round2(t.cell_hours), 3.5);
}

#[test]
fn test_fuel_used_between_legs() {
    let legs = vec![leg(1.0, 0.0, 0.0, 300.0), leg(1.0, 0.0, 50.0, 200.0)];
    let used = fuel_used(&legs);

    assert_eq!(used[0], None);
    assert_eq!(used[1], Some(150.0));
}
