//! Typed errors for the schedule-reading pipeline.
//!
//! The week resolver and the per-day extraction stages fail in ways the caller
//! must tell apart (an unmatched schedule date is not a parse failure), so these
//! are enumerated here rather than collapsed into one string.

use std::io;
use thiserror::Error;

/// Weekday names used to attach day context to pipeline errors.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("OCR engine error: {0}")]
    Ocr(String),

    #[error("invalid time pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("malformed shift text {text:?} (expected \"HH:MM am - HH:MM pm\")")]
    ShiftShape { text: String },

    #[error("upper coverage text {0:?} contains no time token")]
    MissingStartToken(String),

    #[error("lower coverage text {0:?} contains no second time token")]
    MissingEndToken(String),

    #[error("lower coverage band is blank but the upper band reads {0:?}")]
    BlankLowerBand(String),

    #[error("no candidate Monday falls on day {day} of the month")]
    NoMatchingWeek { day: u32 },

    #[error("schedule date is ambiguous and no week prompt is available")]
    WeekPromptUnavailable,

    #[error("{weekday}: {source}")]
    Day {
        weekday: &'static str,
        #[source]
        source: Box<ScheduleError>,
    },
}

impl ScheduleError {
    /// Wraps an error with the weekday it occurred on (0 = Monday).
    pub fn on_day(self, index: usize) -> ScheduleError {
        ScheduleError::Day {
            weekday: WEEKDAY_NAMES[index % 7],
            source: Box::new(self),
        }
    }
}
