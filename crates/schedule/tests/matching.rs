//! Integration tests that exercise the public schedule API end to end:
//! parsing, time search, diagnostics, and serde embedding.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ticktab_schedule::{CronSchedule, CronTabList, ScheduleError};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

// ── documented search behavior ──────────────────────────────────────

#[test]
fn half_hour_schedule_boundaries() {
    let s: CronSchedule = "0,30 * * * *".parse().unwrap();
    assert_eq!(s.ceiling(at(2026, 8, 6, 1, 10)).unwrap(), at(2026, 8, 6, 1, 30));
    assert_eq!(s.ceiling(at(2026, 8, 6, 1, 40)).unwrap(), at(2026, 8, 6, 2, 0));
    assert_eq!(s.floor(at(2026, 8, 6, 1, 40)).unwrap(), at(2026, 8, 6, 1, 30));
}

#[test]
fn hour_and_minute_both_advance_with_reset() {
    let s: CronSchedule = "15,45 3 * * *".parse().unwrap();
    assert_eq!(s.ceiling(at(2026, 8, 6, 1, 10)).unwrap(), at(2026, 8, 6, 3, 15));
}

#[test]
fn ceiling_and_floor_bracket_the_reference() {
    let specs = ["* * * * *", "*/5 * * * *", "0 6 * * 1-5", "@monthly", "0 0 29 2 *"];
    let refs = [
        at(2026, 1, 1, 0, 0),
        at(2026, 6, 15, 12, 34),
        at(2026, 12, 31, 23, 59),
    ];
    for spec in specs {
        let s: CronSchedule = spec.parse().unwrap();
        for &t in &refs {
            if let Ok(up) = s.ceiling(t) {
                assert!(up >= t, "{spec}: ceiling({t}) = {up} went backwards");
                assert!(s.matches(up), "{spec}: ceiling({t}) = {up} does not match");
            }
            if let Ok(down) = s.floor(t) {
                assert!(down <= t, "{spec}: floor({t}) = {down} went forwards");
                assert!(s.matches(down), "{spec}: floor({t}) = {down} does not match");
            }
        }
    }
}

#[test]
fn repeated_ceiling_with_epsilon_advances() {
    // Nudging past a returned tick must move to the next tick, not stall.
    let s: CronSchedule = "*/10 * * * *".parse().unwrap();
    let first = s.ceiling(at(2026, 8, 6, 9, 3)).unwrap();
    let next = s.ceiling(first + chrono::Duration::seconds(1)).unwrap();
    assert!(next > first);
    assert_eq!(next - first, chrono::Duration::minutes(10));
}

#[test]
fn day_conflict_is_or_not_and() {
    // First of the month or any Sunday: both sides produce ticks.
    let s: CronSchedule = "0 0 1 * 0".parse().unwrap();
    let from_friday = s.ceiling(at(2010, 1, 1, 15, 55)).unwrap();
    assert_eq!(from_friday, at(2010, 1, 3, 0, 0), "Sunday side should fire first");
    let through_month = s.ceiling(at(2010, 1, 31, 12, 0)).unwrap();
    assert_eq!(through_month, at(2010, 2, 1, 0, 0), "first-of-month side should fire next");
}

#[test]
fn impossible_schedule_terminates_with_error() {
    let s: CronSchedule = "0 0 31 2 *".parse().unwrap();
    match s.ceiling(at(2026, 1, 1, 0, 0)) {
        Err(ScheduleError::NoMatchFound { spec, .. }) => assert_eq!(spec, "0 0 31 2 *"),
        other => panic!("expected NoMatchFound, got {other:?}"),
    }
}

// ── parse failures keep their taxonomy ──────────────────────────────

#[test]
fn parse_error_kinds_are_distinguishable() {
    assert!(matches!(
        "* * *".parse::<CronSchedule>().unwrap_err(),
        ScheduleError::MalformedSchedule { .. }
    ));
    assert!(matches!(
        "*/0 * * * *".parse::<CronSchedule>().unwrap_err(),
        ScheduleError::InvalidRange { .. }
    ));
    assert!(matches!(
        "99 * * * *".parse::<CronSchedule>().unwrap_err(),
        ScheduleError::OutOfRange { .. }
    ));
}

#[test]
fn parse_errors_render_descriptive_messages() {
    let err = "99 * * * *".parse::<CronSchedule>().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("minute"), "{message}");
    assert!(message.contains("99"), "{message}");
}

// ── serde embedding ─────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct JobConfig {
    name: String,
    cron: CronSchedule,
}

#[test]
fn schedule_round_trips_through_json_as_string() {
    let config: JobConfig =
        serde_json::from_str(r#"{"name":"nightly","cron":"0 2 * * *"}"#).unwrap();
    assert_eq!(config.cron.source(), "0 2 * * *");
    assert_eq!(
        config.cron.ceiling(at(2026, 8, 6, 10, 0)).unwrap(),
        at(2026, 8, 7, 2, 0)
    );

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"name":"nightly","cron":"0 2 * * *"}"#);
}

#[test]
fn invalid_schedule_fails_deserialization() {
    let result: Result<JobConfig, _> =
        serde_json::from_str(r#"{"name":"broken","cron":"not a cron"}"#);
    assert!(result.is_err());
}

#[test]
fn tab_list_round_trips_through_json() {
    let text = "# two dailies\n0 2 * * *\n30 14 * * *\n";
    let json = serde_json::to_string(&CronTabList::parse(text).unwrap()).unwrap();
    let back: CronTabList = serde_json::from_str(&json).unwrap();
    assert_eq!(back.source(), text);
    assert_eq!(back.len(), 2);
}

// ── tab list end to end ─────────────────────────────────────────────

#[test]
fn tab_list_next_tick_across_members() {
    let tab = CronTabList::parse("# morning and afternoon\n0 9 * * *\n30 16 * * *\n").unwrap();
    assert_eq!(tab.ceiling(at(2026, 8, 6, 8, 0)).unwrap(), at(2026, 8, 6, 9, 0));
    assert_eq!(tab.ceiling(at(2026, 8, 6, 10, 0)).unwrap(), at(2026, 8, 6, 16, 30));
    assert_eq!(tab.floor(at(2026, 8, 6, 10, 0)).unwrap(), at(2026, 8, 6, 9, 0));
}

#[test]
fn tab_list_surfaces_unsatisfiable_member_in_sanity() {
    let tab = CronTabList::parse("0 0 * * *\n0 0 30 2 *\n").unwrap();
    assert!(tab.check_sanity().is_some());
}
