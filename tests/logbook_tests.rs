mod common;
use aerodesk::core::logbook::{LegInput, LogbookLogic};
use aerodesk::core::records::RecordsLogic;
use aerodesk::core::permissions::Operator;
use aerodesk::errors::AppError;
use aerodesk::models::role::Role;
use aerodesk::utils::date::YearMonth;
use chrono::{NaiveDate, NaiveTime};
use common::{PIC, REG, SIC, admin, memory_pool_with_fleet};

fn leg_on(y: i32, m: u32, d: u32) -> LegInput {
    LegInput {
        date: NaiveDate::from_ymd_opt(y, m, d),
        departure: Some("SBSP".into()),
        arrival: Some("SBRJ".into()),
        pic: Some(PIC.into()),
        ..Default::default()
    }
}

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn ym(s: &str) -> YearMonth {
    YearMonth::parse(s).expect("valid month")
}

#[test]
fn test_flight_time_from_dep_pou() {
    let mut pool = memory_pool_with_fleet();
    let input = LegInput {
        time_dep: hm(10, 0),
        time_pou: hm(11, 30),
        ..leg_on(2025, 3, 10)
    };

    let e = LogbookLogic::add_leg(&mut pool, &admin(), REG, &input).expect("add leg");
    assert_eq!(e.flight_hours, 1.5);
    assert_eq!(e.day_hours, 1.5);
    assert_eq!(e.cell_delta, 1.5);
}

#[test]
fn test_explicit_cell_and_night() {
    let mut pool = memory_pool_with_fleet();
    let input = LegInput {
        flight: Some(2.0),
        night: Some(0.5),
        cell: Some(2.2),
        ..leg_on(2025, 3, 10)
    };

    let e = LogbookLogic::add_leg(&mut pool, &admin(), REG, &input).expect("add leg");
    assert_eq!(e.day_hours, 1.5);
    assert_eq!(e.cell_delta, 2.2);
}

#[test]
fn test_invalid_legs_rejected() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let night_too_long = LegInput {
        flight: Some(1.0),
        night: Some(1.5),
        ..leg_on(2025, 3, 10)
    };
    assert!(LogbookLogic::add_leg(&mut pool, &op, REG, &night_too_long).is_err());

    let same_crew = LegInput {
        sic: Some(PIC.into()),
        ..leg_on(2025, 3, 10)
    };
    assert!(LogbookLogic::add_leg(&mut pool, &op, REG, &same_crew).is_err());

    let unknown_aerodrome = LegInput {
        arrival: Some("SBGR".into()),
        ..leg_on(2025, 3, 10)
    };
    assert!(matches!(
        LogbookLogic::add_leg(&mut pool, &op, REG, &unknown_aerodrome),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_month_view_cell_projection() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    for (day, flight) in [(5, 1.5), (12, 0.7)] {
        let input = LegInput {
            flight: Some(flight),
            sic: Some(SIC.into()),
            ..leg_on(2025, 3, day)
        };
        LogbookLogic::add_leg(&mut pool, &op, REG, &input).expect("add leg");
    }

    let view = LogbookLogic::month_view(&mut pool, REG, ym("2025-03"), 10.0).expect("view");
    assert_eq!(view.legs.len(), 2);
    assert_eq!(view.month.cell_start, 187.3);
    assert_eq!(view.legs[0].cell_after, 188.8);
    assert_eq!(view.projection.cell_end, 189.5);
    assert_eq!(view.projection.cell_prev, 190.0);
    assert_eq!(view.projection.cell_disp, 0.5);
}

#[test]
fn test_next_month_starts_where_previous_ended() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let march = LegInput { flight: Some(2.0), ..leg_on(2025, 3, 5) };
    let april = LegInput { flight: Some(1.0), ..leg_on(2025, 4, 2) };
    LogbookLogic::add_leg(&mut pool, &op, REG, &march).expect("march");
    LogbookLogic::add_leg(&mut pool, &op, REG, &april).expect("april");

    let view = LogbookLogic::month_view(&mut pool, REG, ym("2025-04"), 10.0).expect("view");
    assert_eq!(view.month.cell_start, 189.3);
    assert_eq!(view.month.cell_end, 190.3);
}

#[test]
fn test_closed_month_is_frozen() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let e = LogbookLogic::add_leg(
        &mut pool,
        &op,
        REG,
        &LegInput { flight: Some(1.0), ..leg_on(2025, 3, 5) },
    )
    .expect("add leg");

    let closed = LogbookLogic::close_month(&mut pool, &op, REG, ym("2025-03")).expect("close");
    assert!(closed.closed);
    assert_eq!(closed.cell_end, 188.3);

    assert!(matches!(
        LogbookLogic::close_month(&mut pool, &op, REG, ym("2025-03")),
        Err(AppError::MonthAlreadyClosed(_))
    ));

    // operations may not touch a closed month
    let ops = Operator::new("ops", vec![Role::Operations]);
    assert!(matches!(
        LogbookLogic::delete_leg(&mut pool, &ops, e.id),
        Err(AppError::MonthClosed(_))
    ));
    assert!(matches!(
        LogbookLogic::add_leg(&mut pool, &ops, REG, &leg_on(2025, 3, 20)),
        Err(AppError::MonthClosed(_))
    ));

    // the next month still opens from the closed total
    LogbookLogic::add_leg(&mut pool, &ops, REG, &LegInput { flight: Some(0.5), ..leg_on(2025, 4, 1) })
        .expect("april leg");
    let april = LogbookLogic::month_view(&mut pool, REG, ym("2025-04"), 10.0).expect("view");
    assert_eq!(april.month.cell_start, 188.3);
}

#[test]
fn test_director_edits_closed_month() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let e = LogbookLogic::add_leg(&mut pool, &op, REG, &LegInput { flight: Some(1.0), ..leg_on(2025, 3, 5) })
        .expect("add leg");
    LogbookLogic::close_month(&mut pool, &op, REG, ym("2025-03")).expect("close");

    let director = Operator::new("dir", vec![Role::Director]);
    let edited = LogbookLogic::edit_leg(
        &mut pool,
        &director,
        e.id,
        &LegInput { landings: Some(2), ..Default::default() },
    )
    .expect("director may edit");
    assert_eq!(edited.landings, 2);
}

#[test]
fn test_closed_month_edit_carries_into_later_months() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let march = LogbookLogic::add_leg(&mut pool, &op, REG, &LegInput { flight: Some(1.0), ..leg_on(2025, 3, 5) })
        .expect("march leg");
    LogbookLogic::close_month(&mut pool, &op, REG, ym("2025-03")).expect("close");
    LogbookLogic::add_leg(&mut pool, &op, REG, &LegInput { flight: Some(0.5), ..leg_on(2025, 4, 2) })
        .expect("april leg");

    let director = Operator::new("dir", vec![Role::Director]);
    LogbookLogic::edit_leg(
        &mut pool,
        &director,
        march.id,
        &LegInput { flight: Some(3.0), ..Default::default() },
    )
    .expect("director may edit");

    let m = LogbookLogic::month_view(&mut pool, REG, ym("2025-03"), 100.0).expect("march");
    assert!(m.month.closed);
    assert_eq!(m.month.cell_start, 187.3);
    assert_eq!(m.month.cell_end, 190.3);
    assert_eq!(m.legs[0].cell_after, 190.3);

    let a = LogbookLogic::month_view(&mut pool, REG, ym("2025-04"), 100.0).expect("april");
    assert_eq!(a.month.cell_start, 190.3);
    assert_eq!(a.month.cell_end, 190.8);

    // deleting the leg moves the chain back
    LogbookLogic::delete_leg(&mut pool, &director, march.id).expect("director may delete");
    let m = LogbookLogic::month_view(&mut pool, REG, ym("2025-03"), 100.0).expect("march");
    let a = LogbookLogic::month_view(&mut pool, REG, ym("2025-04"), 100.0).expect("april");
    assert_eq!(m.month.cell_end, 187.3);
    assert_eq!(a.month.cell_start, 187.3);
    assert_eq!(a.month.cell_end, 187.8);
}

#[test]
fn test_pilot_cannot_close_month() {
    let mut pool = memory_pool_with_fleet();
    let pilot = Operator::new("pilot", vec![Role::Pilot]);
    assert!(matches!(
        LogbookLogic::close_month(&mut pool, &pilot, REG, ym("2025-03")),
        Err(AppError::PermissionDenied(_))
    ));
}

#[test]
fn test_summary_and_crew_hours() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    let with_client = LegInput {
        flight: Some(1.5),
        client_id: Some(1),
        sic: Some(SIC.into()),
        ..leg_on(2025, 3, 5)
    };
    LogbookLogic::add_leg(&mut pool, &op, REG, &with_client).expect("leg 1");
    LogbookLogic::add_leg(&mut pool, &op, REG, &LegInput { flight: Some(1.0), ..leg_on(2025, 3, 6) })
        .expect("leg 2");

    let (_, summary) = LogbookLogic::summary(&mut pool, REG, None).expect("summary");
    assert_eq!(summary.totals.legs, 2);
    assert_eq!(summary.totals.flight_hours, 2.5);
    assert_eq!(summary.by_client.len(), 1);
    assert_eq!(summary.by_client[0].1.flight_hours, 1.5);

    let (member, as_pic, as_sic) = LogbookLogic::crew_hours(&mut pool, SIC, None).expect("hours");
    assert_eq!(member.name, "Bruno Lima");
    assert_eq!(as_pic.legs, 0);
    assert_eq!(as_sic.flight_hours, 1.5);
}

#[test]
fn test_viewed_month_does_not_block_aircraft_delete() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    RecordsLogic::add_aircraft(&mut pool, &op, "PT-XYZ", None, None, None).expect("add aircraft");
    LogbookLogic::month_view(&mut pool, "PT-XYZ", ym("2025-03"), 100.0).expect("view empty month");

    RecordsLogic::delete_aircraft(&mut pool, &op, "PT-XYZ").expect("delete without legs");
}

#[test]
fn test_aircraft_with_legs_cannot_be_deleted() {
    let mut pool = memory_pool_with_fleet();
    let op = admin();

    RecordsLogic::add_aircraft(&mut pool, &op, "PT-XYZ", None, None, None).expect("add aircraft");
    LogbookLogic::add_leg(&mut pool, &op, "PT-XYZ", &leg_on(2025, 3, 5)).expect("add leg");

    assert!(RecordsLogic::delete_aircraft(&mut pool, &op, "PT-XYZ").is_err());
    assert!(LogbookLogic::month_view(&mut pool, "PT-XYZ", ym("2025-03"), 100.0).is_ok());
}
