//! Google Calendar integration, scoped to what shift filing needs: find the
//! calendar's time zone, list a week's events, insert the missing ones.

pub mod auth;
pub mod client;
pub mod events;

pub use client::{http_client, CalendarClient};
pub use events::{build_events, is_duplicate, week_bounds};
