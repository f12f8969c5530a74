//! Run configuration: screenshot command, calendar target, layout measurements.
//!
//! Loaded from `config.json` in the config directory. Every field has a serde
//! default so a hand-edited or older file keeps working; an unparseable file
//! falls back to defaults with a warning rather than aborting.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A rectangle in relative coordinates (0.0 to 1.0).
/// Used for hand-measured regions that scale with the source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeRect {
    /// X position of top-left corner (0.0 = left edge, 1.0 = right edge)
    pub x: f32,
    /// Y position of top-left corner (0.0 = top edge, 1.0 = bottom edge)
    pub y: f32,
    /// Width as fraction of image width
    pub width: f32,
    /// Height as fraction of image height
    pub height: f32,
}

/// Complete run configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Screenshot program invoked to capture the schedule
    #[serde(default = "default_screenshotter")]
    pub screenshotter: String,
    /// Flags passed to the screenshot program ahead of the output path
    #[serde(default = "default_screenshot_args")]
    pub screenshot_args: String,
    /// ID of the Google calendar shifts are filed into
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Summary line for inserted events
    #[serde(default = "default_event_summary")]
    pub event_summary: String,
    /// Portion of Monday's column holding the date header (hand-measured)
    #[serde(default = "default_header_region")]
    pub header_region: RelativeRect,
    /// Override for the tesseract executable (defaults to a PATH lookup)
    #[serde(default)]
    pub tesseract_cmd: Option<String>,
}

fn default_screenshotter() -> String {
    "xfce4-screenshooter".to_string()
}

fn default_screenshot_args() -> String {
    "-rs".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_event_summary() -> String {
    "Work".to_string()
}

fn default_header_region() -> RelativeRect {
    RelativeRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 0.18,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screenshotter: default_screenshotter(),
            screenshot_args: default_screenshot_args(),
            calendar_id: default_calendar_id(),
            event_summary: default_event_summary(),
            header_region: default_header_region(),
            tesseract_cmd: None,
        }
    }
}

impl Config {
    /// Loads configuration from the given file, or returns defaults when the
    /// file is missing or unreadable.
    pub fn load(path: &Path) -> Config {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse {}: {}. Using defaults.", path.display(), e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read {}: {}. Using defaults.", path.display(), e);
                Config::default()
            }
        }
    }

    /// Writes the configuration to the given file as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Prompts for the user-tunable settings and rewrites the config file.
/// Pressing enter keeps a setting's current value.
pub fn edit_interactive(path: &Path) -> Result<()> {
    let mut config = Config::load(path);

    config.screenshotter = prompt(
        "What is the command to call your screenshot program?",
        &config.screenshotter,
    )?;
    config.screenshot_args = prompt(
        "What arguments make it take and save a screenshot of a selected region?",
        &config.screenshot_args,
    )?;
    config.calendar_id = prompt(
        "What is the ID of the Google calendar to add your shifts to?",
        &config.calendar_id,
    )?;
    config.event_summary = prompt(
        "What summary should the calendar events carry?",
        &config.event_summary,
    )?;

    config.save(path)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn prompt(question: &str, current: &str) -> io::Result<String> {
    println!("{}", question);
    print!("Press enter to keep the current value [{}]: ", current);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim();
    println!();
    Ok(if answer.is_empty() {
        current.to_string()
    } else {
        answer.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.screenshotter, "xfce4-screenshooter");
        assert_eq!(config.screenshot_args, "-rs");
        assert_eq!(config.calendar_id, "primary");
        assert!(config.tesseract_cmd.is_none());
        assert!(config.header_region.height > 0.0);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope.json"));
        assert_eq!(config.calendar_id, "primary");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"calendar_id": "work@example.com"}"#).unwrap();

        let config = Config::load(&path);
        assert_eq!(config.calendar_id, "work@example.com");
        assert_eq!(config.screenshotter, "xfce4-screenshooter");
    }

    #[test]
    fn test_load_garbage_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();

        let config = Config::load(&path);
        assert_eq!(config.calendar_id, "primary");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.screenshotter = "maim".to_string();
        config.screenshot_args = "-s".to_string();
        config.tesseract_cmd = Some("/opt/tesseract/bin/tesseract".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path);
        assert_eq!(loaded.screenshotter, "maim");
        assert_eq!(loaded.screenshot_args, "-s");
        assert_eq!(
            loaded.tesseract_cmd.as_deref(),
            Some("/opt/tesseract/bin/tesseract")
        );
        assert_eq!(loaded.header_region, config.header_region);
    }
}
