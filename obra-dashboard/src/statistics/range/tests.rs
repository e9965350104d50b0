use super::*;
use chrono::Weekday;
use shared::models::RangeInput;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const TODAY: &str = "2023-11-15";

#[test]
fn test_day_uses_rango_fin() {
    let period = resolve_range(FilterKind::Day, &Filters::day("2023-11-10"), d(TODAY));
    assert_eq!(period.range, DateRange::single(d("2023-11-10")));
    assert_eq!(period.range.inicio_str(), "2023-11-10");
}

#[test]
fn test_day_defaults_to_today() {
    let period = resolve_range(FilterKind::Day, &Filters::default(), d(TODAY));
    assert_eq!(period.range, DateRange::single(d(TODAY)));

    // Malformed fin is treated as absent
    let period = resolve_range(FilterKind::Day, &Filters::day("15/11/2023"), d(TODAY));
    assert_eq!(period.range, DateRange::single(d(TODAY)));
}

#[test]
fn test_week_2024_w01_starts_on_monday() {
    let period = resolve_range(FilterKind::Week, &Filters::week("2024-W01"), d(TODAY));
    assert_eq!(period.range.inicio, d("2024-01-01"));
    assert_eq!(period.range.inicio.weekday(), Weekday::Mon);
    assert_eq!(period.range.fin, d("2024-01-07"));
    assert_eq!(period.week, Some(WeekKey { year: 2024, week: 1 }));
}

#[test]
fn test_week_uses_first_monday_on_or_after_jan_1() {
    // 2023-01-01 is a Sunday, so week 1 starts on the 2nd
    let period = resolve_range(FilterKind::Week, &Filters::week("2023-W01"), d(TODAY));
    assert_eq!(period.range.inicio, d("2023-01-02"));

    let period = resolve_range(FilterKind::Week, &Filters::week("2023-W46"), d(TODAY));
    assert_eq!(period.range.inicio, d("2023-11-13"));
    assert_eq!(period.range.fin, d("2023-11-19"));
}

#[test]
fn test_week_absent_uses_current_week() {
    let period = resolve_range(FilterKind::Week, &Filters::default(), d(TODAY));
    assert_eq!(period.range.inicio, d("2023-11-13"));
    assert_eq!(period.range.fin, d("2023-11-19"));
    assert_eq!(period.week, Some(WeekKey { year: 2023, week: 46 }));

    let malformed = Filters::week("2023-46");
    let period = resolve_range(FilterKind::Week, &malformed, d(TODAY));
    assert_eq!(period.range.inicio, d("2023-11-13"));
}

#[test]
fn test_month_february_leap_year() {
    let period = resolve_range(FilterKind::Month, &Filters::month("2024-02"), d(TODAY));
    assert_eq!(period.range.inicio_str(), "2024-02-01");
    assert_eq!(period.range.fin_str(), "2024-02-29");
    assert_eq!(period.month, Some(MonthKey { year: 2024, month: 2 }));

    let period = resolve_range(FilterKind::Month, &Filters::month("2023-02"), d(TODAY));
    assert_eq!(period.range.fin_str(), "2023-02-28");
}

#[test]
fn test_month_absent_or_malformed_uses_current_month() {
    let period = resolve_range(FilterKind::Month, &Filters::month("2023-13"), d(TODAY));
    assert_eq!(period.range, DateRange::new(d("2023-11-01"), d("2023-11-30")));
}

#[test]
fn test_range_passthrough() {
    let filters = Filters::range("2024-01-01", "2024-12-31");
    let period = resolve_range(FilterKind::Range, &filters, d(TODAY));
    assert_eq!(period.range, DateRange::new(d("2024-01-01"), d("2024-12-31")));
}

#[test]
fn test_range_defaults_each_missing_end() {
    let filters = Filters {
        kind: FilterKind::Range,
        range: RangeInput {
            inicio: None,
            fin: Some("2023-11-10".into()),
        },
        ..Default::default()
    };
    let period = resolve_range(FilterKind::Range, &filters, d(TODAY));
    assert_eq!(period.range.inicio, d("2023-10-16"));
    assert_eq!(period.range.fin, d("2023-11-10"));

    let period = resolve_range(FilterKind::Range, &Filters::default(), d(TODAY));
    assert_eq!(period.range, DateRange::new(d("2023-10-16"), d(TODAY)));
}

#[test]
fn test_strict_rejects_unknown_kind() {
    let err = resolve_range_strict("trimestre", &Filters::default(), d(TODAY)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFilterKind);

    let ok = resolve_range_strict("mes", &Filters::month("2024-02"), d(TODAY)).unwrap();
    assert_eq!(ok.kind, FilterKind::Month);
}

#[test]
fn test_lenient_falls_back_to_today() {
    let filters = Filters::month("2024-02");
    let period = resolve_range_lenient("trimestre", &filters, d(TODAY));
    assert_eq!(period.kind, FilterKind::Day);
    assert_eq!(period.range, DateRange::single(d(TODAY)));
}

#[test]
fn test_week_key_parse_and_display() {
    let key: WeekKey = "2024-W07".parse().unwrap();
    assert_eq!(key, WeekKey { year: 2024, week: 7 });
    assert_eq!(key.to_string(), "2024-W07");

    assert!("2024-W00".parse::<WeekKey>().is_err());
    assert!("2024-W54".parse::<WeekKey>().is_err());
    assert_eq!(
        "2024W07".parse::<WeekKey>().unwrap_err().code,
        ErrorCode::InvalidWeekFormat
    );
}

#[test]
fn test_week_key_containing() {
    assert_eq!(WeekKey::containing(d("2024-01-01")), WeekKey { year: 2024, week: 1 });
    assert_eq!(WeekKey::containing(d("2024-01-14")), WeekKey { year: 2024, week: 2 });
    // 2025-01-01 falls before 2025's first Monday (Jan 6)
    let key = WeekKey::containing(d("2025-01-01"));
    assert_eq!(key.year, 2024);
    assert_eq!(key.monday(), Some(d("2024-12-30")));
}

#[test]
fn test_month_key_parse() {
    let key: MonthKey = "2024-02".parse().unwrap();
    assert_eq!(key.to_string(), "2024-02");
    assert_eq!("2024-2".parse::<MonthKey>().unwrap_err().code, ErrorCode::InvalidMonthFormat);
    assert!("2024-00".parse::<MonthKey>().is_err());
}

#[test]
fn test_date_range_days() {
    let range = DateRange::new(d("2024-02-01"), d("2024-02-29"));
    assert_eq!(range.days(), 29);
    assert!(range.contains(d("2024-02-15")));
    assert!(!range.contains(d("2024-03-01")));
    assert_eq!(DateRange::new(d("2024-02-02"), d("2024-02-01")).days(), 0);
}
