//! Integration tests for schedule loading and queries.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Weekday as ChronoWeekday};
use indoc::indoc;
use openhours_core::{
    importer, ranges, ClockTime, Occurrence, RangeDef, ScheduleDef, ScheduleError, WeekSchedule,
    Weekday,
};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const BAKERY: &str = indoc! {r#"
    monday = ["07:00-13:00", "15:00-18:30"]
    tuesday = ["07:00-13:00", "15:00-18:30"]
    wednesday = ["07:00-13:00"]
    thursday = ["07:00-13:00", "15:00-18:30"]
    friday = ["07:00-13:00", "15:00-18:30"]
    saturday = [{ hours = "07:00-12:00", data = { note = "bread only" } }]

    [exceptions]
    "12-25" = []
    "12-26" = []
    "2021-12-24" = ["07:00-11:00"]
    "2021-12-31" = ["07:00-11:00"]

    [data]
    name = "Corner bakery"
"#};

fn bakery() -> WeekSchedule {
    WeekSchedule::fill(&ScheduleDef::from_toml_str(BAKERY).unwrap()).unwrap()
}

#[test]
fn test_bakery_regular_week() {
    let schedule = bakery();

    // 2021-12-13 is a Monday.
    assert!(schedule.is_open_at_local(at("2021-12-13 07:00")).unwrap());
    assert!(!schedule.is_open_at_local(at("2021-12-13 13:00")).unwrap());
    assert!(schedule.is_open_at_local(at("2021-12-13 18:29")).unwrap());
    assert!(!schedule.is_open_at_local(at("2021-12-15 15:30")).unwrap());
    assert!(!schedule.is_open_at_local(at("2021-12-19 10:00")).unwrap());

    assert_eq!(schedule.regular_closing_days(), vec![Weekday::Sunday]);
    assert_eq!(schedule.regular_closing_days_iso(), vec![7]);
    assert_eq!(schedule.day(Weekday::Monday).to_string(), "07:00-13:00 / 15:00-18:30");
}

#[test]
fn test_bakery_holidays() {
    let schedule = bakery();

    // Friday 2021-12-24 closes early, Saturday 2021-12-25 is closed.
    assert!(schedule.is_open_at_local(at("2021-12-24 10:30")).unwrap());
    assert!(!schedule.is_open_at_local(at("2021-12-24 15:30")).unwrap());
    assert!(!schedule.is_open_at_local(at("2021-12-25 08:00")).unwrap());

    // Recurring closures repeat in 2022 (Sunday/Monday).
    assert!(!schedule.is_open_at_local(at("2022-12-26 08:00")).unwrap());

    assert_eq!(schedule.exceptional_closing_dates(), Vec::<NaiveDate>::new());
}

#[test]
fn test_bakery_forward_search_across_holidays() {
    let schedule = bakery();

    // Friday 2021-12-24 at noon: closes at 11:00, so the next opening skips
    // the 25th (recurring), Sunday and the 26th, landing on Monday the 27th.
    let next = schedule.next_open_local(at("2021-12-24 12:00")).unwrap();
    assert_eq!(next, Occurrence { date: date("2021-12-27"), time: "07:00".parse().unwrap() });

    let close = schedule.next_close_local(at("2021-12-24 08:00")).unwrap();
    assert_eq!(close.to_string(), "2021-12-24 11:00");

    // Between the two Monday openings.
    let next = schedule.next_open_local(at("2021-12-13 14:00")).unwrap();
    assert_eq!(next.to_string(), "2021-12-13 15:00");
}

#[test]
fn test_bakery_structured_data() {
    let records = bakery().as_structured_data();
    // 4 days x 2 + Wednesday + Saturday + 2 dated + 2 recurring closures.
    assert_eq!(records.len(), 14);
    let christmas_eve = records
        .iter()
        .find(|r| r.valid_from.as_deref() == Some("2021-12-24"))
        .unwrap();
    assert_eq!(christmas_eve.closes, "11:00");
    assert!(records.iter().any(|r| r.valid_from.as_deref() == Some("--12-25")));
}

#[test]
fn test_json_and_toml_definitions_agree() {
    let json = r#"{
        "monday": ["09:00-18:00"],
        "exceptions": {"2021-12-20": []}
    }"#;
    let toml = indoc! {r#"
        monday = ["09:00-18:00"]
        [exceptions]
        "2021-12-20" = []
    "#};
    let from_json = WeekSchedule::fill(&ScheduleDef::from_json_str(json).unwrap()).unwrap();
    let from_toml = WeekSchedule::fill(&ScheduleDef::from_toml_str(toml).unwrap()).unwrap();

    for moment in ["2021-12-20 10:00", "2021-12-27 10:00", "2021-12-27 18:00"] {
        assert_eq!(
            from_json.is_open_at_local(at(moment)).unwrap(),
            from_toml.is_open_at_local(at(moment)).unwrap(),
            "{moment}"
        );
    }
    assert_eq!(from_json.exceptional_closing_dates(), vec![date("2021-12-20")]);
}

#[test]
fn test_invalid_definitions() {
    let overlapping = ScheduleDef::from_json_str(r#"{"monday": ["09:00-12:00", "11:00-13:00"]}"#).unwrap();
    assert!(matches!(
        WeekSchedule::fill(&overlapping),
        Err(ScheduleError::OverlappingRanges { .. })
    ));

    let bad_time = ScheduleDef::from_json_str(r#"{"monday": ["09:00-25:00"]}"#).unwrap();
    assert!(!WeekSchedule::is_valid(&bad_time));

    let bad_day = ScheduleDef::from_json_str(r#"{"mondays": ["09:00-18:00"]}"#).unwrap();
    assert_eq!(
        WeekSchedule::fill(&bad_day).unwrap_err(),
        ScheduleError::InvalidDayName("mondays".into())
    );

    let merged = WeekSchedule::merge_overlapping_ranges(&overlapping).unwrap();
    assert!(WeekSchedule::is_valid(&merged));
    assert_eq!(merged.days["monday"], ranges(["09:00-13:00"]));
}

#[test]
fn test_seasonal_filter_over_weekdays() {
    // Summer months open later on weekends.
    let def = ScheduleDef::from_toml_str(indoc! {r#"
        saturday = ["10:00-14:00"]
        sunday = []
    "#})
    .unwrap()
    .filter(|date: NaiveDate| -> Option<Vec<RangeDef>> {
        let weekend = matches!(date.weekday(), ChronoWeekday::Sat | ChronoWeekday::Sun);
        (weekend && (6..=8).contains(&date.month())).then(|| ranges(["10:00-20:00"]))
    });
    let schedule = WeekSchedule::fill(&def).unwrap();

    assert!(schedule.is_open_at_local(at("2022-07-03 19:00")).unwrap());
    assert!(!schedule.is_open_at_local(at("2022-10-02 11:00")).unwrap());
    assert!(!schedule.is_open_at_local(at("2022-10-01 19:00")).unwrap());

    // From an October Sunday the next opening is the following Saturday.
    let next = schedule.next_open_local(at("2022-10-02 11:00")).unwrap();
    assert_eq!(next.date, date("2022-10-08"));
    assert_eq!(next.time, ClockTime::new(10, 0).unwrap());
}

#[test]
fn test_offset_applies_before_resolution() {
    let def = importer::parse("Mo-Fr 09:00-17:00").unwrap();
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let schedule = WeekSchedule::fill(&def).unwrap().with_timezone(Some(tokyo));

    // Sunday 2022-01-16 23:30 UTC is Monday 08:30 in Tokyo.
    let moment = chrono::Utc.with_ymd_and_hms(2022, 1, 16, 23, 30, 0).unwrap();
    assert!(!schedule.is_open_at(&moment).unwrap());
    let next = schedule.next_open(&moment).unwrap();
    assert_eq!(next.to_string(), "2022-01-17 09:00");
    assert!(schedule
        .is_open_at(&(moment + chrono::Duration::minutes(45)))
        .unwrap());
}
