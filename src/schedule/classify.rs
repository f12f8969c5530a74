//! Deciding how a day cell must be read before OCR sees it.
//!
//! All decisions here come from pixel inspection alone, so they are testable
//! with synthetic images and no OCR engine.

use image::{imageops, Rgb, RgbImage};

/// Background of an unhighlighted cell.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Highlight fill of the current day's cell. Text printed on it comes out
/// unreadable unless the colors are inverted first.
pub const BRIGHT_GREEN: Rgb<u8> = Rgb([0, 128, 0]);

/// Layout of a day cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayClass {
    /// One shift on the highlighted green background.
    NeedsInvert,
    /// One shift (or none) on the normal background.
    SingleBand,
    /// Two stacked coverage bands; `boundary` is the first row of the lower one.
    DualBand { boundary: u32 },
    /// Nothing colored in the sampled strip; read the cell as-is.
    Unknown,
}

/// Classifies a day cell by walking a one-pixel column two thirds of the way
/// across, top to bottom. That column sits clear of the time text but inside
/// any coverage band. The first colored row fixes the band color; a later row
/// in a different (non-white) color marks the start of a second band.
pub fn classify_day(image: &RgbImage) -> DayClass {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return DayClass::Unknown;
    }

    let strip_x = width * 2 / 3;
    let mut first_band: Option<Rgb<u8>> = None;

    for y in 0..height {
        let pixel = *image.get_pixel(strip_x, y);
        if pixel == WHITE {
            continue;
        }
        match first_band {
            None => first_band = Some(pixel),
            Some(first_color) if pixel != first_color => {
                return DayClass::DualBand { boundary: y };
            }
            Some(_) => {}
        }
    }

    if first_band.is_none() {
        DayClass::Unknown
    } else if needs_inversion(image) {
        DayClass::NeedsInvert
    } else {
        DayClass::SingleBand
    }
}

/// A cell whose center pixel is the highlight green is rendered inverted.
pub fn needs_inversion(image: &RgbImage) -> bool {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return false;
    }
    *image.get_pixel(width / 2, height / 2) == BRIGHT_GREEN
}

/// Returns a copy of the cell with colors flipped back to dark-on-light when
/// the cell is highlighted, and an unchanged copy otherwise.
pub fn normalize_colors(image: &RgbImage) -> RgbImage {
    let mut copy = image.clone();
    if needs_inversion(&copy) {
        imageops::invert(&mut copy);
    }
    copy
}

/// Cuts a cell into the rows above `boundary` and the rows from `boundary`
/// down, one piece per coverage band.
pub fn split_at_row(image: &RgbImage, boundary: u32) -> (RgbImage, RgbImage) {
    let (width, height) = image.dimensions();
    let boundary = boundary.min(height);
    let upper = imageops::crop_imm(image, 0, 0, width, boundary).to_image();
    let lower = imageops::crop_imm(image, 0, boundary, width, height - boundary).to_image();
    (upper, lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIGHT_GREEN: Rgb<u8> = Rgb([200, 230, 201]);
    const LIGHT_ORANGE: Rgb<u8> = Rgb([255, 224, 178]);

    fn white_cell(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, WHITE)
    }

    fn paint_rows(image: &mut RgbImage, rows: std::ops::RangeInclusive<u32>, color: Rgb<u8>) {
        for y in rows {
            for x in 0..image.width() {
                image.put_pixel(x, y, color);
            }
        }
    }

    #[test]
    fn test_solid_band_is_single() {
        let mut cell = white_cell(90, 80);
        paint_rows(&mut cell, 10..=50, LIGHT_GREEN);

        assert_eq!(classify_day(&cell), DayClass::SingleBand);
    }

    #[test]
    fn test_highlighted_cell_needs_invert() {
        let cell = RgbImage::from_pixel(90, 80, BRIGHT_GREEN);
        assert_eq!(classify_day(&cell), DayClass::NeedsInvert);
    }

    #[test]
    fn test_two_adjacent_bands_split_at_color_change() {
        let mut cell = white_cell(90, 80);
        paint_rows(&mut cell, 10..=30, LIGHT_GREEN);
        paint_rows(&mut cell, 31..=60, LIGHT_ORANGE);

        assert_eq!(classify_day(&cell), DayClass::DualBand { boundary: 31 });
    }

    #[test]
    fn test_two_gapped_bands_split_at_second_band() {
        let mut cell = white_cell(90, 80);
        paint_rows(&mut cell, 10..=30, LIGHT_GREEN);
        paint_rows(&mut cell, 40..=60, LIGHT_ORANGE);

        assert_eq!(classify_day(&cell), DayClass::DualBand { boundary: 40 });
    }

    #[test]
    fn test_blank_cell_is_unknown() {
        assert_eq!(classify_day(&white_cell(90, 80)), DayClass::Unknown);
    }

    #[test]
    fn test_empty_image_is_unknown() {
        assert_eq!(classify_day(&RgbImage::new(0, 0)), DayClass::Unknown);
    }

    #[test]
    fn test_normalize_inverts_highlighted_cell() {
        let cell = RgbImage::from_pixel(20, 20, BRIGHT_GREEN);
        let normalized = normalize_colors(&cell);
        assert_eq!(*normalized.get_pixel(10, 10), Rgb([255, 127, 255]));
    }

    #[test]
    fn test_normalize_leaves_plain_cell_alone() {
        let mut cell = white_cell(20, 20);
        paint_rows(&mut cell, 5..=8, LIGHT_GREEN);

        let normalized = normalize_colors(&cell);
        assert_eq!(normalized, cell);
    }

    #[test]
    fn test_inverting_twice_restores_the_original() {
        let mut cell = RgbImage::from_pixel(20, 20, BRIGHT_GREEN);
        paint_rows(&mut cell, 5..=8, Rgb([17, 80, 200]));

        let mut twice = cell.clone();
        imageops::invert(&mut twice);
        imageops::invert(&mut twice);
        assert_eq!(twice, cell);
    }

    #[test]
    fn test_split_at_row_partitions_heights() {
        let cell = white_cell(90, 80);
        let (upper, lower) = split_at_row(&cell, 31);

        assert_eq!(upper.dimensions(), (90, 31));
        assert_eq!(lower.dimensions(), (90, 49));
    }
}
