//! The bounded coarse-to-fine search behind `ceiling` and `floor`.

use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::schedule::CronSchedule;

use super::cursor::Cursor;

/// How many years the search may move from the reference before giving up.
///
/// Per-field impossible sets are already parse errors; what this bounds is
/// cross-field impossibilities such as day 31 in a February-only schedule,
/// which must yield an error instead of an endless scan.
pub(crate) const HORIZON_YEARS: i32 = 4;

/// Smallest matching instant at or after `reference`.
pub(crate) fn ceiling(schedule: &CronSchedule, reference: NaiveDateTime) -> Result<NaiveDateTime> {
    let max_year = reference.year() + HORIZON_YEARS;
    let mut cursor = Cursor::ceil_of(reference);

    loop {
        if cursor.year > max_year {
            return Err(give_up(schedule, reference));
        }

        // Month: a miss moves to the start of the next month.
        if !schedule.months().contains(cursor.month) {
            cursor.bump_month();
            continue;
        }

        // Day: a miss moves to the next midnight. The rollover may cross a
        // month boundary, so the month check must run again.
        let date = match cursor.date() {
            Some(date) => date,
            None => return Err(give_up(schedule, reference)),
        };
        if !schedule.matches_day(date) {
            cursor.bump_day();
            continue;
        }

        // Hour within the day; moving it resets the minute.
        match schedule.hours().next_from(cursor.hour) {
            Some(hour) => {
                if hour != cursor.hour {
                    cursor.hour = hour;
                    cursor.minute = 0;
                }
            }
            None => {
                cursor.bump_day();
                continue;
            }
        }

        // Minute within the hour; overflow carries into the next hour and
        // restarts the checks from the month.
        match schedule.minutes().next_from(cursor.minute) {
            Some(minute) => cursor.minute = minute,
            None => {
                cursor.bump_hour();
                continue;
            }
        }

        return match cursor.resolve() {
            Some(t) => Ok(t),
            None => Err(give_up(schedule, reference)),
        };
    }
}

/// Largest matching instant at or before `reference`.
///
/// Mirror image of [`ceiling`]: fields decrement, and each borrow resets the
/// finer fields to their maximum for the new context (23:59 for a day
/// change, the actual last day of the month for a month change).
pub(crate) fn floor(schedule: &CronSchedule, reference: NaiveDateTime) -> Result<NaiveDateTime> {
    let min_year = reference.year() - HORIZON_YEARS;
    let mut cursor = Cursor::floor_of(reference);

    loop {
        if cursor.year < min_year {
            return Err(give_up(schedule, reference));
        }

        if !schedule.months().contains(cursor.month) {
            cursor.drop_month();
            continue;
        }

        let date = match cursor.date() {
            Some(date) => date,
            None => return Err(give_up(schedule, reference)),
        };
        if !schedule.matches_day(date) {
            cursor.drop_day();
            continue;
        }

        match schedule.hours().prev_from(cursor.hour) {
            Some(hour) => {
                if hour != cursor.hour {
                    cursor.hour = hour;
                    cursor.minute = 59;
                }
            }
            None => {
                cursor.drop_day();
                continue;
            }
        }

        match schedule.minutes().prev_from(cursor.minute) {
            Some(minute) => cursor.minute = minute,
            None => {
                cursor.drop_hour();
                continue;
            }
        }

        return match cursor.resolve() {
            Some(t) => Ok(t),
            None => Err(give_up(schedule, reference)),
        };
    }
}

fn give_up(schedule: &CronSchedule, reference: NaiveDateTime) -> ScheduleError {
    debug!(
        spec = %schedule.source(),
        %reference,
        horizon_years = HORIZON_YEARS,
        "search passed its horizon without a match"
    );
    ScheduleError::NoMatchFound {
        spec: schedule.source().to_string(),
        reference,
        horizon_years: HORIZON_YEARS,
    }
}
