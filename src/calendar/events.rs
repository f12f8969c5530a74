//! Event payloads, the listing window, and the duplicate rule.

use std::fmt::Display;

use anyhow::{bail, Result};
use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::schedule::WeekShifts;

/// Timed endpoint of an event, in the shape the API takes and returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

/// The fields of an event this tool creates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventPayload {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// The slice of a listed event the duplicate check reads. All-day events come
/// back without a `dateTime` and never match a shift.
#[derive(Clone, Debug, Deserialize)]
pub struct ListedEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<ListedTime>,
    #[serde(default)]
    pub end: Option<ListedTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListedTime {
    #[serde(default, rename = "dateTime")]
    pub date_time: Option<String>,
}

/// Builds one event per working day of the week starting at `monday`.
/// Days off produce nothing. Times carry the local offset plus the
/// calendar's own time zone name, matching what the web UI creates.
pub fn build_events<Tz: TimeZone>(
    shifts: &WeekShifts,
    monday: NaiveDate,
    calendar_tz: &str,
    summary: &str,
    tz: &Tz,
) -> Result<Vec<EventPayload>>
where
    Tz::Offset: Display,
{
    let mut events = Vec::new();
    for (i, shift) in shifts.iter().enumerate() {
        let Some(shift) = shift else { continue };
        let date = monday + Days::new(i as u64);
        events.push(EventPayload {
            summary: summary.to_string(),
            start: EventTime {
                date_time: local_rfc3339(tz, date, shift.start)?,
                time_zone: calendar_tz.to_string(),
            },
            end: EventTime {
                date_time: local_rfc3339(tz, date, shift.end)?,
                time_zone: calendar_tz.to_string(),
            },
        });
    }
    Ok(events)
}

/// The listing window used for the duplicate check: the week's Monday at
/// local midnight up to the following Monday.
pub fn week_bounds<Tz: TimeZone>(monday: NaiveDate, tz: &Tz) -> Result<(String, String)>
where
    Tz::Offset: Display,
{
    let start = local_rfc3339(tz, monday, NaiveTime::MIN)?;
    let end = local_rfc3339(tz, monday + Days::new(7), NaiveTime::MIN)?;
    Ok((start, end))
}

fn local_rfc3339<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Result<String>
where
    Tz::Offset: Display,
{
    match tz.from_local_datetime(&date.and_time(time)).earliest() {
        Some(moment) => Ok(moment.to_rfc3339()),
        None => bail!("{} {} does not exist in the local time zone", date, time),
    }
}

/// A candidate counts as already filed when an existing event has the same
/// summary and both endpoints name the same instants. Instants are compared,
/// not strings: the API re-renders times in the calendar's own offset.
pub fn is_duplicate(candidate: &EventPayload, existing: &[ListedEvent]) -> bool {
    let (Some(start), Some(end)) = (
        parse_instant(&candidate.start.date_time),
        parse_instant(&candidate.end.date_time),
    ) else {
        return false;
    };

    existing.iter().any(|event| {
        event.summary.as_deref() == Some(candidate.summary.as_str())
            && listed_instant(&event.start) == Some(start)
            && listed_instant(&event.end) == Some(end)
    })
}

fn parse_instant(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

fn listed_instant(time: &Option<ListedTime>) -> Option<DateTime<FixedOffset>> {
    time.as_ref()?.date_time.as_deref().and_then(parse_instant)
}
