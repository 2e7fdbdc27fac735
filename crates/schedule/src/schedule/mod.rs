//! Cron schedule types: the five-field grammar, named aliases, and the
//! multi-line crontab list.
//!
//! A [`CronSchedule`] is parsed once from a spec string and is immutable
//! afterwards; all queries (`matches`, `ceiling`, `floor`, `is_due`) work on
//! local copies of the reference timestamp, so a schedule can be shared
//! freely across threads.

mod core;
mod tab_list;


pub use self::core::CronSchedule;
pub use self::tab_list::CronTabList;
