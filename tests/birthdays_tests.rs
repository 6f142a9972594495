use aerodesk::core::birthdays::{
    BirthDate, Birthday, BirthdayFilter, next_occurrence, parse_birth_date, sort_birthdays,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn test_parse_birth_date_formats() {
    assert_eq!(
        parse_birth_date("1985-03-15"),
        Some(BirthDate { day: 15, month: 3, year: Some(1985) })
    );
    assert_eq!(
        parse_birth_date("1985-03-15T00:00:00"),
        Some(BirthDate { day: 15, month: 3, year: Some(1985) })
    );
    assert_eq!(
        parse_birth_date("15/03/1985"),
        Some(BirthDate { day: 15, month: 3, year: Some(1985) })
    );
    assert_eq!(
        parse_birth_date("15/03"),
        Some(BirthDate { day: 15, month: 3, year: None })
    );
    assert_eq!(parse_birth_date("31/02"), None);
    assert_eq!(parse_birth_date("hello"), None);
    assert_eq!(parse_birth_date(""), None);
}

#[test]
fn test_next_occurrence_already_passed_goes_to_next_year() {
    let b = parse_birth_date("15/03").expect("valid");
    assert_eq!(next_occurrence(&b, d(2024, 6, 1)), Some(d(2025, 3, 15)));
}

#[test]
fn test_next_occurrence_later_this_year() {
    let b = parse_birth_date("15/03").expect("valid");
    assert_eq!(next_occurrence(&b, d(2024, 2, 1)), Some(d(2024, 3, 15)));
}

#[test]
fn test_next_occurrence_today_is_today() {
    let b = parse_birth_date("15/03/1990").expect("valid");
    assert_eq!(next_occurrence(&b, d(2024, 3, 15)), Some(d(2024, 3, 15)));
}

#[test]
fn test_feb_29_in_common_and_leap_years() {
    let b = parse_birth_date("29/02").expect("valid");
    assert_eq!(next_occurrence(&b, d(2025, 1, 10)), Some(d(2025, 2, 28)));
    assert_eq!(next_occurrence(&b, d(2027, 12, 31)), Some(d(2028, 2, 29)));
}

#[test]
fn test_turning_age() {
    let b = Birthday::build("Ana", "crew", "15/03/1985", d(2024, 6, 1));
    assert_eq!(b.next, Some(d(2025, 3, 15)));
    assert_eq!(b.turning, Some(40));
    assert_eq!(b.days_until(d(2024, 6, 1)), Some(287));

    let no_year = Birthday::build("Bruno", "client", "15/03", d(2024, 6, 1));
    assert_eq!(no_year.turning, None);
}

#[test]
fn test_filters() {
    let today = d(2024, 6, 10);
    let soon = Birthday::build("Soon", "crew", "14/06", today);
    let later = Birthday::build("Later", "crew", "28/06", today);
    let past = Birthday::build("Past", "crew", "01/06", today);

    assert!(BirthdayFilter::ThisMonth.matches(&soon, today));
    assert!(BirthdayFilter::ThisMonth.matches(&past, today));
    assert!(BirthdayFilter::NextDays(7).matches(&soon, today));
    assert!(!BirthdayFilter::NextDays(7).matches(&later, today));
    assert!(!BirthdayFilter::NextDays(7).matches(&past, today));
    assert!(BirthdayFilter::All.matches(&past, today));
}

#[test]
fn test_sorted_by_next_occurrence() {
    let today = d(2024, 6, 10);
    let mut list = vec![
        Birthday::build("Past", "crew", "01/06", today),
        Birthday::build("Broken", "crew", "99/99", today),
        Birthday::build("Soon", "client", "14/06", today),
    ];
    sort_birthdays(&mut list);

    let names: Vec<&str> = list.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Soon", "Past", "Broken"]);
}
