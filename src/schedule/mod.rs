//! Reading a week of shifts out of a schedule screenshot.
//!
//! The screenshot is cut into seven day columns. Each column is cropped to
//! the area under its date header, classified by pixel inspection,
//! color-normalized, OCR'd (in two pieces when the shift is drawn as stacked
//! coverage bands), and parsed into a [`Shift`].

pub mod classify;
pub mod divide;
pub mod extract;
pub mod header;
pub mod parse;

pub use classify::{classify_day, DayClass};
pub use divide::divide_days;
pub use header::read_header_day;
pub use parse::{parse_shift, Shift};

use image::RgbImage;

use crate::config::RelativeRect;
use crate::error::ScheduleError;
use crate::ocr::TextRecognizer;

/// The schedule always shows Monday through Sunday.
pub const DAYS_IN_WEEK: usize = 7;

/// A week of shifts, Monday first. `None` is a day off.
pub type WeekShifts = [Option<Shift>; DAYS_IN_WEEK];

/// Reads every day column in order. A failure on any day aborts the whole
/// week, tagged with the weekday it happened on, so a half-read schedule is
/// never acted on.
pub fn read_days(
    days: &[RgbImage],
    ocr: &dyn TextRecognizer,
    header_region: &RelativeRect,
) -> Result<WeekShifts, ScheduleError> {
    let mut shifts: WeekShifts = [None; DAYS_IN_WEEK];
    for (i, day) in days.iter().take(DAYS_IN_WEEK).enumerate() {
        shifts[i] = read_day(day, ocr, header_region).map_err(|e| e.on_day(i))?;
    }
    Ok(shifts)
}

/// Reads one day cell. Only the area under the date header is recognized;
/// the engine would otherwise report the date as the first line of every
/// column it is shown. A dual-band cell is cut at the band boundary and its
/// pieces merged back into one shift line; everything else is read whole.
fn read_day(
    day: &RgbImage,
    ocr: &dyn TextRecognizer,
    header_region: &RelativeRect,
) -> Result<Option<Shift>, ScheduleError> {
    let shift_area = divide::below_region(day, header_region);
    let text = match classify_day(&shift_area) {
        DayClass::DualBand { boundary } => {
            let (upper, lower) = classify::split_at_row(&shift_area, boundary);
            let upper_text = block_text(&upper, ocr)?;
            let lower_text = block_text(&lower, ocr)?;
            match (upper_text, lower_text) {
                // No start time anywhere: the bands are decoration on a day off.
                (None, _) => None,
                (Some(upper), None) => return Err(ScheduleError::BlankLowerBand(upper)),
                (Some(upper), Some(lower)) => Some(extract::merge_coverage(&upper, &lower)?),
            }
        }
        _ => block_text(&shift_area, ocr)?,
    };
    parse_shift(text.as_deref())
}

/// OCRs one block after flipping a highlighted cell back to dark-on-light.
fn block_text(block: &RgbImage, ocr: &dyn TextRecognizer) -> Result<Option<String>, ScheduleError> {
    let normalized = classify::normalize_colors(block);
    extract::shift_text(ocr, &normalized)
}
