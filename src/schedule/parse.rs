//! Parsing a cleaned shift line into clock times.

use std::fmt;

use chrono::NaiveTime;

use crate::error::ScheduleError;

/// One shift, clock-in to clock-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%I:%M %P"),
            self.end.format("%I:%M %P")
        )
    }
}

/// Parses a shift line of the form "HH:MM am - HH:MM pm". `None` (a day off)
/// passes straight through. An end at or before the start is representable;
/// whether an overnight shift is meaningful is the calendar's concern, not a
/// parse error.
pub fn parse_shift(text: Option<&str>) -> Result<Option<Shift>, ScheduleError> {
    let Some(text) = text else {
        return Ok(None);
    };

    let malformed = || ScheduleError::ShiftShape {
        text: text.to_string(),
    };

    let parts: Vec<&str> = text.split('-').collect();
    let [start, end] = parts.as_slice() else {
        return Err(malformed());
    };

    let start = NaiveTime::parse_from_str(start.trim(), "%I:%M %p").map_err(|_| malformed())?;
    let end = NaiveTime::parse_from_str(end.trim(), "%I:%M %p").map_err(|_| malformed())?;

    Ok(Some(Shift { start, end }))
}
