//! [`CronTabList`] — schedules parsed from a multi-line crontab text.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

use crate::error::{Result, ScheduleError};
use crate::search::HORIZON_YEARS;

use super::core::CronSchedule;

/// An ordered set of schedules parsed from crontab-style text: one spec per
/// line, with blank lines and `#` comments ignored.
///
/// A list with no entries is legal; it matches nothing and every search
/// returns [`ScheduleError::NoMatchFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronTabList {
    source: String,
    entries: Vec<CronSchedule>,
}

impl CronTabList {
    /// Parse a crontab text. Any bad line fails the whole parse.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(CronSchedule::parse(line)?);
        }
        Ok(Self {
            source: text.to_string(),
            entries,
        })
    }

    /// The original crontab text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of schedules in the list.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no schedules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the member schedules in line order.
    pub fn iter(&self) -> impl Iterator<Item = &CronSchedule> {
        self.entries.iter()
    }

    /// Whether any member schedule matches `t`.
    pub fn matches(&self, t: NaiveDateTime) -> bool {
        self.entries.iter().any(|entry| entry.matches(t))
    }

    /// Earliest member ceiling at or after `reference`.
    pub fn ceiling(&self, reference: NaiveDateTime) -> Result<NaiveDateTime> {
        self.entries
            .iter()
            .filter_map(|entry| entry.ceiling(reference).ok())
            .min()
            .ok_or_else(|| self.no_match(reference))
    }

    /// Latest member floor at or before `reference`.
    pub fn floor(&self, reference: NaiveDateTime) -> Result<NaiveDateTime> {
        self.entries
            .iter()
            .filter_map(|entry| entry.floor(reference).ok())
            .max()
            .ok_or_else(|| self.no_match(reference))
    }

    /// Joined sanity warnings of all member schedules, if any.
    pub fn check_sanity(&self) -> Option<String> {
        let warnings: Vec<String> = self
            .entries
            .iter()
            .filter_map(|entry| {
                entry
                    .check_sanity()
                    .map(|w| format!("{}: {}", entry.source(), w))
            })
            .collect();
        if warnings.is_empty() {
            None
        } else {
            Some(warnings.join("\n"))
        }
    }

    fn no_match(&self, reference: NaiveDateTime) -> ScheduleError {
        ScheduleError::NoMatchFound {
            spec: self.source.clone(),
            reference,
            horizon_years: HORIZON_YEARS,
        }
    }
}

impl fmt::Display for CronTabList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for CronTabList {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CronTabList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for CronTabList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}
