//! Reading the date header off Monday's column.

use image::RgbImage;
use regex::Regex;

use super::divide::crop_region;
use crate::config::RelativeRect;
use crate::error::ScheduleError;
use crate::ocr::{TextRecognizer, EMPTY_SENTINEL};

/// Reads the day-of-month printed in Monday's column header.
///
/// Returns `None` when nothing plausible is found there, so the caller can
/// fall back to asking which week the schedule covers. Only the header region
/// of the column is OCR'd; the shift text below it stays out of the way.
pub fn read_header_day(
    monday: &RgbImage,
    ocr: &dyn TextRecognizer,
    region: &RelativeRect,
) -> Result<Option<u32>, ScheduleError> {
    let header = crop_region(monday, region);
    let raw = ocr
        .image_to_text(&header)
        .map_err(|e| ScheduleError::Ocr(format!("{e:#}")))?;
    if raw == EMPTY_SENTINEL {
        return Ok(None);
    }

    let number = Regex::new(r"\b\d{1,2}\b")?;
    let day = number
        .find(&raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|day| (1..=31).contains(day));
    Ok(day)
}
