//! OAuth token storage and refresh.
//!
//! The token file is the `token.json` Google's OAuth tooling writes after the
//! one-time consent flow. This module never runs that flow; it only refreshes
//! the stored token when stale and rewrites the file.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Refresh this long before the recorded expiry, to absorb clock skew and the
/// time the API calls themselves take.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// On-disk token, in the layout Google's OAuth tooling writes. Fields this
/// module doesn't touch are carried through unchanged on rewrite.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub refresh_token: String,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredToken {
    pub fn load(path: &Path) -> Result<StoredToken> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!(
                "no OAuth token at {}. Run Google's Calendar consent flow once and put \
                 the token.json it produces there.",
                path.display()
            )
        })?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// True when the access token is expired, about to expire, or has no
    /// readable expiry at all.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.expiry.as_deref().and_then(parse_expiry) {
            Some(expiry) => expiry - now <= Duration::seconds(EXPIRY_MARGIN_SECS),
            None => true,
        }
    }
}

/// Google writes expiries as RFC 3339, with or without fractional seconds,
/// and older tooling leaves the "Z" off; a bare timestamp is UTC.
fn parse_expiry(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
        return Some(moment.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Exchanges the refresh token for a fresh access token and updates the
/// token's expiry in place.
pub fn refresh(token: &mut StoredToken, http: &reqwest::blocking::Client) -> Result<()> {
    #[derive(Deserialize)]
    struct RefreshResponse {
        access_token: String,
        expires_in: i64,
    }

    let response = http
        .post(&token.token_uri)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
            ("client_id", token.client_id.as_str()),
            ("client_secret", token.client_secret.as_str()),
        ])
        .send()
        .context("failed to reach the OAuth token endpoint")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        bail!("token refresh rejected ({}): {}", status, body.trim());
    }

    let refreshed: RefreshResponse = response
        .json()
        .context("failed to parse the token refresh response")?;
    token.token = refreshed.access_token;
    token.expiry = Some(
        (Utc::now() + Duration::seconds(refreshed.expires_in))
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    Ok(())
}

/// Loads the stored token, refreshing and persisting it when stale, and
/// returns a bearer token ready for API calls.
pub fn access_token(path: &Path, http: &reqwest::blocking::Client) -> Result<String> {
    let mut token = StoredToken::load(path)?;
    if token.needs_refresh(Utc::now()) {
        tracing::info!("access token expired, refreshing");
        refresh(&mut token, http)?;
        token.save(path)?;
    }
    Ok(token.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "token": "ya29.sample",
        "refresh_token": "1//refresh",
        "token_uri": "https://oauth2.googleapis.com/token",
        "client_id": "client.apps.googleusercontent.com",
        "client_secret": "secret",
        "scopes": ["https://www.googleapis.com/auth/calendar"],
        "expiry": "2021-06-16T18:05:42.123456Z",
        "account": "someone@example.com"
    }"#;

    fn utc(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parses_google_token_layout() {
        let token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(token.token, "ya29.sample");
        assert_eq!(token.refresh_token, "1//refresh");
        assert_eq!(token.token_uri, "https://oauth2.googleapis.com/token");
        assert_eq!(token.scopes.len(), 1);
    }

    #[test]
    fn test_save_round_trips_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.json");
        let token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        token.save(&path).unwrap();

        let reloaded = StoredToken::load(&path).unwrap();
        assert_eq!(
            reloaded.extra.get("account").and_then(|v| v.as_str()),
            Some("someone@example.com")
        );
    }

    #[test]
    fn test_missing_token_file_explains_provisioning() {
        let dir = tempdir().unwrap();
        let err = StoredToken::load(&dir.path().join("token.json")).unwrap_err();
        assert!(err.to_string().contains("consent flow"));
    }

    #[test]
    fn test_fresh_token_is_not_refreshed() {
        let token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        assert!(!token.needs_refresh(utc("2021-06-16T16:00:00Z")));
    }

    #[test]
    fn test_expired_token_needs_refresh() {
        let token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        assert!(token.needs_refresh(utc("2021-06-16T19:00:00Z")));
    }

    #[test]
    fn test_token_expiring_within_margin_needs_refresh() {
        let token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        assert!(token.needs_refresh(utc("2021-06-16T18:05:00Z")));
    }

    #[test]
    fn test_naive_expiry_is_read_as_utc() {
        let mut token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        token.expiry = Some("2021-06-16T18:05:42.123456".to_string());
        assert!(!token.needs_refresh(utc("2021-06-16T16:00:00Z")));
        assert!(token.needs_refresh(utc("2021-06-16T18:06:00Z")));
    }

    #[test]
    fn test_unreadable_expiry_forces_refresh() {
        let mut token: StoredToken = serde_json::from_str(SAMPLE).unwrap();
        token.expiry = Some("whenever".to_string());
        assert!(token.needs_refresh(utc("2021-06-16T16:00:00Z")));

        token.expiry = None;
        assert!(token.needs_refresh(utc("2021-06-16T16:00:00Z")));
    }
}
