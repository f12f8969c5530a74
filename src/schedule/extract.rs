//! Turning raw OCR output into a single candidate shift line.

use image::RgbImage;
use regex::Regex;

use crate::error::ScheduleError;
use crate::ocr::{TextRecognizer, EMPTY_SENTINEL};

/// Time token with its meridiem, e.g. "07:30 am". The meridiem is kept so
/// merged coverage text still parses like any other shift line.
const TIME_TOKEN: &str = r"(?i)\d{2}:\d{2} ?[ap]m";

/// The shift always sits on the first printed line of a cell; anything below
/// it is coverage labelling.
fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("").trim_end_matches('\r')
}

/// Drops the stray marks OCR reads off the band borders: an opening "(" or
/// "{" before the start time and a trailing ".".
fn clean_artifacts(text: &str) -> &str {
    let text = text
        .strip_prefix('(')
        .or_else(|| text.strip_prefix('{'))
        .unwrap_or(text);
    text.strip_suffix('.').unwrap_or(text)
}

/// Reads the shift line printed on a cell, or `None` when the cell holds no
/// text at all (a day off).
pub fn shift_text(
    ocr: &dyn TextRecognizer,
    image: &RgbImage,
) -> Result<Option<String>, ScheduleError> {
    let raw = ocr
        .image_to_text(image)
        .map_err(|e| ScheduleError::Ocr(format!("{e:#}")))?;
    if raw == EMPTY_SENTINEL {
        return Ok(None);
    }

    let line = clean_artifacts(first_line(&raw).trim());
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}

/// Rebuilds one shift line from a split day. The upper band prints the shift
/// start as its first time, the lower band prints the shift end as its
/// second; everything between is the coverage handover and is dropped.
pub fn merge_coverage(upper: &str, lower: &str) -> Result<String, ScheduleError> {
    let token = Regex::new(TIME_TOKEN)?;

    let start = token
        .find(upper)
        .ok_or_else(|| ScheduleError::MissingStartToken(upper.to_string()))?;
    let end = token
        .find_iter(lower)
        .nth(1)
        .ok_or_else(|| ScheduleError::MissingEndToken(lower.to_string()))?;

    Ok(format!("{} - {}", start.as_str(), end.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    /// Recognizer that always answers with a fixed string.
    struct FixedOcr(&'static str);

    impl TextRecognizer for FixedOcr {
        fn image_to_text(&self, _image: &RgbImage) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn any_image() -> RgbImage {
        RgbImage::new(4, 4)
    }

    #[test]
    fn test_takes_first_line_only() {
        let ocr = FixedOcr("02:00 pm - 08:00 pm\nFloor coverage\n\u{000C}");
        let text = shift_text(&ocr, &any_image()).unwrap();
        assert_eq!(text.as_deref(), Some("02:00 pm - 08:00 pm"));
    }

    #[test]
    fn test_strips_at_most_one_character_each_end() {
        // Matched parentheses lose only the leading one; the single-strip
        // rule never peels the closing paren under the trailing dot.
        assert_eq!(
            clean_artifacts("(07:30 am - 03:00 pm)."),
            "07:30 am - 03:00 pm)"
        );
    }

    #[test]
    fn test_strips_border_artifacts() {
        let ocr = FixedOcr("(07:30 am - 11:00 am.\n");
        let text = shift_text(&ocr, &any_image()).unwrap();
        assert_eq!(text.as_deref(), Some("07:30 am - 11:00 am"));

        let ocr = FixedOcr("{07:30 am - 11:00 am\n");
        let text = shift_text(&ocr, &any_image()).unwrap();
        assert_eq!(text.as_deref(), Some("07:30 am - 11:00 am"));
    }

    #[test]
    fn test_empty_page_sentinel_means_day_off() {
        let ocr = FixedOcr("\u{000C}");
        assert_eq!(shift_text(&ocr, &any_image()).unwrap(), None);
    }

    #[test]
    fn test_whitespace_only_output_means_day_off() {
        let ocr = FixedOcr("  \n\u{000C}");
        assert_eq!(shift_text(&ocr, &any_image()).unwrap(), None);
    }

    #[test]
    fn test_merge_keeps_start_and_final_end() {
        let merged = merge_coverage("07:30 am - 11:00 am", "11:00 am - 03:00 pm").unwrap();
        assert_eq!(merged, "07:30 am - 03:00 pm");
    }

    #[test]
    fn test_merge_tolerates_ocr_casing_and_spacing() {
        let merged = merge_coverage("07:30AM - 11:00 am", "11:00 am - 03:00PM").unwrap();
        assert_eq!(merged, "07:30AM - 03:00PM");
    }

    #[test]
    fn test_merge_without_start_token_fails() {
        let err = merge_coverage("no times here", "11:00 am - 03:00 pm").unwrap_err();
        assert!(matches!(err, ScheduleError::MissingStartToken(_)));
    }

    #[test]
    fn test_merge_without_second_end_token_fails() {
        let err = merge_coverage("07:30 am - 11:00 am", "11:00 am only").unwrap_err();
        assert!(matches!(err, ScheduleError::MissingEndToken(_)));
    }
}
