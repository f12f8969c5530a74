//! Thin blocking client for the Calendar API v3.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::events::{EventPayload, ListedEvent};

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client with the timeout every Google call here uses.
pub fn http_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

pub struct CalendarClient {
    http: reqwest::blocking::Client,
    token: String,
}

impl CalendarClient {
    /// Wraps the HTTP client the caller already built for the token refresh.
    pub fn new(http: reqwest::blocking::Client, token: String) -> CalendarClient {
        CalendarClient { http, token }
    }

    /// The calendar's own time zone name, read from the user's calendar list.
    pub fn calendar_time_zone(&self, calendar_id: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct Entry {
            #[serde(rename = "timeZone")]
            time_zone: String,
        }

        let url = format!("{}/users/me/calendarList/{}", API_BASE, calendar_id);
        let entry: Entry = self.get(&url, &[])?;
        Ok(entry.time_zone)
    }

    /// Events inside the given window. The window is one week, so a single
    /// page is always enough.
    pub fn list_events(
        &self,
        calendar_id: &str,
        time_min: &str,
        time_max: &str,
    ) -> Result<Vec<ListedEvent>> {
        #[derive(Deserialize)]
        struct Page {
            #[serde(default)]
            items: Vec<ListedEvent>,
        }

        let url = format!("{}/calendars/{}/events", API_BASE, calendar_id);
        let page: Page = self.get(
            &url,
            &[
                ("timeMin", time_min),
                ("timeMax", time_max),
                ("singleEvents", "true"),
                ("maxResults", "250"),
            ],
        )?;
        Ok(page.items)
    }

    /// Inserts one event and returns its link when the API sends one back.
    pub fn insert_event(&self, calendar_id: &str, event: &EventPayload) -> Result<Option<String>> {
        #[derive(Deserialize)]
        struct Created {
            #[serde(default, rename = "htmlLink")]
            html_link: Option<String>,
        }

        let url = format!("{}/calendars/{}/events", API_BASE, calendar_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(event)
            .send()
            .context("failed to reach the Calendar API")?;

        let created: Created = check_status(response)?
            .json()
            .context("failed to parse the Calendar API response")?;
        Ok(created.html_link)
    }

    fn get<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .context("failed to reach the Calendar API")?;

        check_status(response)?
            .json()
            .context("failed to parse the Calendar API response")
    }
}

fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().unwrap_or_default();
    bail!("Calendar API returned {}: {}", status, body.trim());
}
