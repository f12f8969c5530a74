//! Resolving which calendar week the schedule covers.
//!
//! The screenshot shows day-of-month numbers but no month or year, so the
//! schedule can only be this week's, next week's, or the one after. A
//! readable header date picks between those outright; otherwise a
//! [`WeekPicker`] is asked.

use std::io::{self, Write};

use chrono::{Datelike, Days, NaiveDate};

use crate::error::ScheduleError;

/// The three weeks a schedule screenshot can plausibly cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekChoice {
    ThisWeek,
    NextWeek,
    TwoWeeksOut,
}

/// Fallback asked for the week when the header date can't be read.
pub trait WeekPicker {
    fn pick(&self) -> Result<WeekChoice, ScheduleError>;
}

/// The Mondays of the current week and the two following ones.
pub fn candidate_mondays(today: NaiveDate) -> [NaiveDate; 3] {
    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    [monday, monday + Days::new(7), monday + Days::new(14)]
}

/// Resolves the Monday the schedule starts on.
///
/// A header day matching none of the candidate Mondays is an error rather
/// than a prompt: the screenshot is then from outside the three-week window
/// this tool can file, and silently picking a week would spray events across
/// the wrong dates.
pub fn resolve_week(
    today: NaiveDate,
    header_day: Option<u32>,
    picker: &dyn WeekPicker,
) -> Result<NaiveDate, ScheduleError> {
    let candidates = candidate_mondays(today);
    match header_day {
        Some(day) => candidates
            .into_iter()
            .find(|monday| monday.day() == day)
            .ok_or(ScheduleError::NoMatchingWeek { day }),
        None => Ok(match picker.pick()? {
            WeekChoice::ThisWeek => candidates[0],
            WeekChoice::NextWeek => candidates[1],
            WeekChoice::TwoWeeksOut => candidates[2],
        }),
    }
}

/// Asks on the terminal, retrying until the answer is 1, 2 or 3.
pub struct ConsolePicker;

impl WeekPicker for ConsolePicker {
    fn pick(&self) -> Result<WeekChoice, ScheduleError> {
        println!("Couldn't read the schedule's date. Which week does it cover?");
        println!("  1) this week");
        println!("  2) next week");
        println!("  3) two weeks out");
        loop {
            print!("Enter 1, 2 or 3: ");
            io::stdout().flush()?;

            let mut line = String::new();
            let bytes = io::stdin().read_line(&mut line)?;
            if bytes == 0 {
                // stdin closed under us; same situation as never having one
                return Err(ScheduleError::WeekPromptUnavailable);
            }
            match line.trim() {
                "1" => return Ok(WeekChoice::ThisWeek),
                "2" => return Ok(WeekChoice::NextWeek),
                "3" => return Ok(WeekChoice::TwoWeeksOut),
                other => println!("Didn't understand {:?}.", other),
            }
        }
    }
}

/// Refuses to guess. Used when running non-interactively, where an ambiguous
/// schedule must fail instead of blocking on a prompt.
pub struct Unattended;

impl WeekPicker for Unattended {
    fn pick(&self) -> Result<WeekChoice, ScheduleError> {
        Err(ScheduleError::WeekPromptUnavailable)
    }
}
