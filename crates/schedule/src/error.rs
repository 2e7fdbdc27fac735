//! Error types for schedule parsing and time search.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced while parsing a cron expression or searching for a
/// matching instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Empty spec, or a spec that does not split into exactly five fields.
    #[error("malformed schedule \"{spec}\": {reason}")]
    MalformedSchedule { spec: String, reason: String },

    /// A field item that is structurally broken: inverted range (N > M),
    /// zero step, or an item that is not a number at all.
    #[error("invalid {field} item \"{item}\": {reason}")]
    InvalidRange {
        field: &'static str,
        item: String,
        reason: String,
    },

    /// A literal value outside the field's legal bounds.
    #[error("{field} value {value} out of range {lo}-{hi}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        lo: u32,
        hi: u32,
    },

    /// The search moved past its horizon without finding a matching instant.
    ///
    /// A valid outcome for schedules whose fields are individually legal but
    /// jointly impossible (day 31 in a February-only schedule).
    #[error("no time matching \"{spec}\" within {horizon_years} years of {reference}")]
    NoMatchFound {
        spec: String,
        reference: NaiveDateTime,
        horizon_years: i32,
    },
}

/// Result alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
