//! shiftshot reads a screenshot of the weekly work schedule and files the
//! shifts it finds into Google Calendar, skipping ones already there.

mod calendar;
mod capture;
mod config;
mod error;
mod ocr;
mod paths;
mod schedule;
mod week;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use image::RgbImage;
use tracing_subscriber::EnvFilter;

use crate::calendar::{auth, build_events, http_client, is_duplicate, week_bounds, CalendarClient};
use crate::config::Config;
use crate::error::WEEKDAY_NAMES;
use crate::ocr::TesseractOcr;
use crate::schedule::{divide_days, read_days, read_header_day, DAYS_IN_WEEK};
use crate::week::{resolve_week, ConsolePicker, Unattended, WeekPicker};

#[derive(Parser)]
#[command(
    name = "shiftshot",
    version,
    about = "File work shifts from a schedule screenshot into Google Calendar"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture (or load) a schedule and add the week's shifts to the calendar
    Sync {
        /// Read this image instead of taking a screenshot
        #[arg(long)]
        image: Option<PathBuf>,
        /// Fail instead of prompting when the schedule's date can't be read
        #[arg(long)]
        non_interactive: bool,
        /// Keep the per-day crops in the scratch directory for inspection
        #[arg(long)]
        keep_images: bool,
    },
    /// Print the shifts read from a schedule image; never touches the calendar
    Read {
        /// Schedule image to read
        image: PathBuf,
        /// Keep the per-day crops in the scratch directory for inspection
        #[arg(long)]
        keep_images: bool,
    },
    /// Edit the configuration interactively
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync {
            image,
            non_interactive,
            keep_images,
        } => sync(image.as_deref(), non_interactive, keep_images),
        Commands::Read { image, keep_images } => read(&image, keep_images),
        Commands::Config => config::edit_interactive(&paths::config_file()),
    }
}

fn sync(image: Option<&Path>, non_interactive: bool, keep_images: bool) -> Result<()> {
    let config = Config::load(&paths::config_file());
    paths::ensure_directories().context("failed to create app directories")?;

    let ocr = TesseractOcr::new(config.tesseract_cmd.as_deref());
    ocr.check_available()?;

    let schedule_path = match image {
        Some(path) => path.to_path_buf(),
        None => {
            let path = paths::schedule_image();
            capture::capture_schedule(&config, &path)?;
            path
        }
    };

    let screenshot = load_rgb(&schedule_path)?;
    let days = divide_days(&screenshot, DAYS_IN_WEEK as u32);
    if keep_images {
        dump_day_images(&days)?;
    }

    let monday_column = days.first().context("schedule image is empty")?;
    let header_day = read_header_day(monday_column, &ocr, &config.header_region)?;
    let shifts = read_days(&days, &ocr, &config.header_region)?;

    if shifts.iter().all(Option::is_none) {
        println!("No shifts on this schedule; nothing to add.");
        return Ok(());
    }

    // Everything local (including the week prompt) settles before the first
    // network call, so an abort here leaves the calendar untouched.
    let console = ConsolePicker;
    let unattended = Unattended;
    let picker: &dyn WeekPicker = if non_interactive { &unattended } else { &console };
    let today = Local::now().date_naive();
    let monday = resolve_week(today, header_day, picker)?;
    tracing::info!("filing shifts into the week of {}", monday);

    let http = http_client()?;
    let token = auth::access_token(&paths::token_file(), &http)?;
    let client = CalendarClient::new(http, token);
    let calendar_tz = client.calendar_time_zone(&config.calendar_id)?;

    let events = build_events(&shifts, monday, &calendar_tz, &config.event_summary, &Local)?;
    let (time_min, time_max) = week_bounds(monday, &Local)?;
    let existing = client.list_events(&config.calendar_id, &time_min, &time_max)?;

    let mut added = 0;
    let mut skipped = 0;
    for event in &events {
        if is_duplicate(event, &existing) {
            println!("Already on the calendar: {}", event.start.date_time);
            skipped += 1;
            continue;
        }
        let link = client.insert_event(&config.calendar_id, event)?;
        println!("Added: {}", event.start.date_time);
        if let Some(link) = link {
            tracing::debug!("created {}", link);
        }
        added += 1;
    }
    println!("Done: {} added, {} skipped.", added, skipped);
    Ok(())
}

fn read(image: &Path, keep_images: bool) -> Result<()> {
    let config = Config::load(&paths::config_file());
    paths::ensure_directories().context("failed to create app directories")?;

    let ocr = TesseractOcr::new(config.tesseract_cmd.as_deref());
    ocr.check_available()?;

    let screenshot = load_rgb(image)?;
    let days = divide_days(&screenshot, DAYS_IN_WEEK as u32);
    if keep_images {
        dump_day_images(&days)?;
    }

    let monday_column = days.first().context("schedule image is empty")?;
    if let Some(day) = read_header_day(monday_column, &ocr, &config.header_region)? {
        println!("Header day of month: {}", day);
    }

    let shifts = read_days(&days, &ocr, &config.header_region)?;
    for (i, shift) in shifts.iter().enumerate() {
        match shift {
            Some(shift) => println!("{:<10} {}", WEEKDAY_NAMES[i], shift),
            None => println!("{:<10} (off)", WEEKDAY_NAMES[i]),
        }
    }
    Ok(())
}

fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image =
        image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(image.to_rgb8())
}

fn dump_day_images(days: &[RgbImage]) -> Result<()> {
    let dir = paths::scratch_dir();
    for (i, day) in days.iter().enumerate() {
        let path = dir.join(format!("day{}.png", i));
        day.save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    println!("Kept day crops in {}", dir.display());
    Ok(())
}
