//! Minute-resolution calendar cursor for the time search.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Working copy of a reference timestamp, broken into the calendar fields
/// the search manipulates.
///
/// Mutators keep the date valid: carries and borrows cascade through day,
/// month, and year, and finer fields reset whenever a coarser one moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Cursor {
    pub fn from_datetime(t: NaiveDateTime) -> Self {
        Self {
            year: t.year(),
            month: t.month(),
            day: t.day(),
            hour: t.hour(),
            minute: t.minute(),
        }
    }

    /// Round up to the next whole minute when `t` has sub-minute parts, so
    /// a ceiling never lands before the true reference point.
    pub fn ceil_of(t: NaiveDateTime) -> Self {
        let mut cursor = Self::from_datetime(t);
        if t.second() != 0 || t.nanosecond() != 0 {
            cursor.bump_minute();
        }
        cursor
    }

    /// Truncate down to the containing minute.
    pub fn floor_of(t: NaiveDateTime) -> Self {
        Self::from_datetime(t)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn resolve(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour, self.minute, 0)
    }

    /// 00:00 on day 1 of the following month.
    pub fn bump_month(&mut self) {
        self.month += 1;
        if self.month > 12 {
            self.month = 1;
            self.year += 1;
        }
        self.day = 1;
        self.hour = 0;
        self.minute = 0;
    }

    /// 00:00 on the following day, rolling into the next month as needed.
    pub fn bump_day(&mut self) {
        self.day += 1;
        self.hour = 0;
        self.minute = 0;
        if self.day > days_in_month(self.year, self.month) {
            self.bump_month();
        }
    }

    /// Minute 0 of the following hour, rolling into the next day as needed.
    pub fn bump_hour(&mut self) {
        self.hour += 1;
        self.minute = 0;
        if self.hour > 23 {
            self.bump_day();
        }
    }

    /// The following minute, cascading as far up as the carry reaches.
    pub fn bump_minute(&mut self) {
        self.minute += 1;
        if self.minute > 59 {
            self.bump_hour();
        }
    }

    /// 23:59 on the last day of the preceding month.
    pub fn drop_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
        self.day = days_in_month(self.year, self.month);
        self.hour = 23;
        self.minute = 59;
    }

    /// 23:59 on the preceding day, rolling into the previous month as needed.
    pub fn drop_day(&mut self) {
        self.hour = 23;
        self.minute = 59;
        if self.day == 1 {
            self.drop_month();
        } else {
            self.day -= 1;
        }
    }

    /// Minute 59 of the preceding hour, rolling into the previous day.
    pub fn drop_hour(&mut self) {
        self.minute = 59;
        if self.hour == 0 {
            self.drop_day();
        } else {
            self.hour -= 1;
        }
    }
}

/// Days in the given month, leap-year February included.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
