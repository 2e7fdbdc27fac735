//! Cron schedule parsing and nearest-match time search.
//!
//! This crate provides:
//! - Five-field cron expressions compiled into immutable, bitset-backed
//!   schedules, with the `@yearly`..`@hourly` aliases
//! - Multi-line crontab lists with `#` comments
//! - `ceiling`/`floor`: the nearest matching minute at-or-after or
//!   at-or-before a reference timestamp, handling month lengths, leap
//!   years, and day-of-month/day-of-week conflicts
//! - Sanity diagnostics for schedules that can never fire
//!
//! Timestamps are `chrono::NaiveDateTime`: wall-clock calendar time with no
//! timezone or DST adjustment. Schedules are immutable after parsing and
//! safe to share across threads.

pub mod error;
pub mod field;
pub mod schedule;

mod search;

pub use error::{Result, ScheduleError};
pub use field::{CronField, FieldKind};
pub use schedule::{CronSchedule, CronTabList};
