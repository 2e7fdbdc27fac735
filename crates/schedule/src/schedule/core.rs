//! [`CronSchedule`] — a parsed five-field cron expression.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::field::{CronField, FieldKind};
use crate::search;

/// Named schedule aliases and their canonical five-field expansions.
const ALIASES: &[(&str, &str)] = &[
    ("@yearly", "0 0 1 1 *"),
    ("@annually", "0 0 1 1 *"),
    ("@monthly", "0 0 1 * *"),
    ("@weekly", "0 0 * * 0"),
    ("@daily", "0 0 * * *"),
    ("@midnight", "0 0 * * *"),
    ("@hourly", "0 * * * *"),
];

/// Maximum day each month can reach; February counts its leap-year length
/// so that day-29 schedules pass the sanity check.
const MONTH_LENGTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A parsed five-field cron schedule: `minute hour day-of-month month
/// day-of-week`, or one of the `@yearly`..`@hourly` aliases.
///
/// Matching is at minute resolution against wall-clock calendar fields;
/// no timezone or DST handling is involved. The original spec string is
/// retained for diagnostics and serialization.
///
/// ```
/// use chrono::NaiveDate;
/// use ticktab_schedule::CronSchedule;
///
/// let schedule = CronSchedule::parse("0,30 * * * *").unwrap();
/// let t = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap().and_hms_opt(1, 10, 0).unwrap();
/// let next = schedule.ceiling(t).unwrap();
/// assert_eq!(next.format("%H:%M").to_string(), "01:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    source: String,
    minutes: CronField,
    hours: CronField,
    days_of_month: CronField,
    months: CronField,
    days_of_week: CronField,
    first_day_of_week: Weekday,
}

impl CronSchedule {
    /// Parse a schedule spec.
    ///
    /// Fails fast: a malformed spec never yields a partially-built schedule.
    pub fn parse(spec: &str) -> Result<Self> {
        let source = spec.trim();
        if source.is_empty() {
            return Err(ScheduleError::MalformedSchedule {
                spec: spec.to_string(),
                reason: "empty schedule".into(),
            });
        }

        let expanded = ALIASES
            .iter()
            .find(|(name, _)| *name == source)
            .map(|(_, expansion)| *expansion)
            .unwrap_or(source);

        let fields: Vec<&str> = expanded.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ScheduleError::MalformedSchedule {
                spec: source.to_string(),
                reason: format!("expected 5 fields, found {}", fields.len()),
            });
        }

        Ok(Self {
            source: source.to_string(),
            minutes: CronField::parse(fields[0], FieldKind::Minute)?,
            hours: CronField::parse(fields[1], FieldKind::Hour)?,
            days_of_month: CronField::parse(fields[2], FieldKind::DayOfMonth)?,
            months: CronField::parse(fields[3], FieldKind::Month)?,
            days_of_week: CronField::parse(fields[4], FieldKind::DayOfWeek)?,
            first_day_of_week: Weekday::Sun,
        })
    }

    /// Parse a spec and log a warning if it parses but can never fire.
    pub fn parse_checked(spec: &str) -> Result<Self> {
        let schedule = Self::parse(spec)?;
        if let Some(warning) = schedule.check_sanity() {
            warn!(spec = %schedule.source, %warning, "schedule parses but looks unsatisfiable");
        }
        Ok(schedule)
    }

    /// Set the weekday used as the start of the week for display numbering.
    ///
    /// This affects [`weekday_display_number`](Self::weekday_display_number)
    /// only; evaluation always uses the fixed cron convention where day-of-week
    /// 0 (and 7) is Sunday.
    pub fn with_first_day_of_week(mut self, first_day: Weekday) -> Self {
        self.first_day_of_week = first_day;
        self
    }

    /// The original spec string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The configured start-of-week for display numbering.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Number of `weekday` counted from the configured start of the week
    /// (0-6), for diagnostics. Unrelated to schedule evaluation.
    pub fn weekday_display_number(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_sunday() + 7 - self.first_day_of_week.num_days_from_sunday()) % 7
    }

    // ── matching ────────────────────────────────────────────────────

    /// Whether `t`, at minute resolution, is in the schedule's set.
    /// Seconds and sub-second components of `t` are ignored.
    pub fn matches(&self, t: NaiveDateTime) -> bool {
        self.minutes.contains(t.minute())
            && self.hours.contains(t.hour())
            && self.months.contains(t.month())
            && self.matches_day(t.date())
    }

    /// The day constraint with traditional cron semantics: when both
    /// day-of-month and day-of-week are restricted, a day qualifies if it
    /// satisfies either one; a bare `*` on one side leaves the other as the
    /// sole constraint.
    pub fn matches_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_sunday();
        match (self.days_of_month.is_wildcard(), self.days_of_week.is_wildcard()) {
            (true, true) => true,
            (true, false) => self.days_of_week.contains(weekday),
            (false, true) => self.days_of_month.contains(date.day()),
            (false, false) => {
                self.days_of_month.contains(date.day()) || self.days_of_week.contains(weekday)
            }
        }
    }

    // ── time search ─────────────────────────────────────────────────

    /// Smallest matching instant at or after `reference`.
    ///
    /// Sub-minute components of `reference` are rounded up, so the result
    /// is never earlier than the true reference point.
    pub fn ceiling(&self, reference: NaiveDateTime) -> Result<NaiveDateTime> {
        search::ceiling(self, reference)
    }

    /// Largest matching instant at or before `reference`.
    pub fn floor(&self, reference: NaiveDateTime) -> Result<NaiveDateTime> {
        search::floor(self, reference)
    }

    /// Whether a scheduled tick falls in `(last_run, now]`.
    ///
    /// With no `last_run`, any tick in the 24 hours up to `now` counts.
    pub fn is_due(&self, now: NaiveDateTime, last_run: Option<NaiveDateTime>) -> bool {
        let check_from = last_run.unwrap_or_else(|| now - chrono::Duration::days(1));
        match self.floor(now) {
            Ok(tick) => tick > check_from,
            Err(_) => false,
        }
    }

    /// Successive matching instants at or after `from`, ascending.
    pub fn upcoming(&self, from: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> + '_ {
        let mut cursor = Some(from);
        std::iter::from_fn(move || {
            let from = cursor?;
            match self.ceiling(from) {
                Ok(tick) => {
                    cursor = tick.checked_add_signed(chrono::Duration::minutes(1));
                    Some(tick)
                }
                Err(_) => {
                    cursor = None;
                    None
                }
            }
        })
    }

    /// Successive matching instants at or before `from`, descending.
    pub fn preceding(&self, from: NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> + '_ {
        let mut cursor = Some(from);
        std::iter::from_fn(move || {
            let from = cursor?;
            match self.floor(from) {
                Ok(tick) => {
                    cursor = tick.checked_sub_signed(chrono::Duration::minutes(1));
                    Some(tick)
                }
                Err(_) => {
                    cursor = None;
                    None
                }
            }
        })
    }

    // ── diagnostics ─────────────────────────────────────────────────

    /// Non-fatal diagnostic: warns when the day-of-month field is restricted
    /// to days none of the selected months can reach, so the schedule can
    /// never fire. Returns `None` when the schedule looks sane.
    pub fn check_sanity(&self) -> Option<String> {
        // A restricted day-of-week can still satisfy the day constraint on
        // its own, whatever day-of-month says.
        if self.days_of_month.is_wildcard() || !self.days_of_week.is_wildcard() {
            return None;
        }
        let min_day = self.days_of_month.first();
        let longest = (1..=12u32)
            .filter(|m| self.months.contains(*m))
            .map(|m| MONTH_LENGTHS[(m - 1) as usize])
            .max()?;
        if min_day > longest {
            return Some(format!(
                "day-of-month {} never occurs: the longest selected month has only {} days",
                min_day, longest
            ));
        }
        None
    }

    // ── field access for the search loop ────────────────────────────

    pub(crate) fn minutes(&self) -> &CronField {
        &self.minutes
    }

    pub(crate) fn hours(&self) -> &CronField {
        &self.hours
    }

    pub(crate) fn months(&self) -> &CronField {
        &self.months
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for CronSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CronSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for CronSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}
