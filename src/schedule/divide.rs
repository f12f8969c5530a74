//! Cutting the schedule screenshot into per-day columns.

use image::{imageops, RgbImage};

use crate::config::RelativeRect;

/// Splits the schedule into `columns` equal-width vertical slices, one per
/// day. Each slice keeps the full image height; the last slice absorbs any
/// remainder pixels so no column of the source is dropped.
pub fn divide_days(image: &RgbImage, columns: u32) -> Vec<RgbImage> {
    if columns == 0 {
        return Vec::new();
    }
    let (width, height) = image.dimensions();
    let col_width = width / columns;

    (0..columns)
        .map(|i| {
            let x = i * col_width;
            let w = if i == columns - 1 {
                width - x
            } else {
                col_width
            };
            imageops::crop_imm(image, x, 0, w, height).to_image()
        })
        .collect()
}

/// Crops a hand-measured relative region out of an image. The region is
/// clamped to the image bounds so a slightly-off measurement still yields a
/// usable crop instead of a panic.
pub fn crop_region(image: &RgbImage, region: &RelativeRect) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let x = ((region.x * width as f32) as u32).min(width.saturating_sub(1));
    let y = ((region.y * height as f32) as u32).min(height.saturating_sub(1));
    let w = ((region.width * width as f32) as u32).clamp(1, width - x);
    let h = ((region.height * height as f32) as u32).clamp(1, height - y);

    imageops::crop_imm(image, x, y, w, h).to_image()
}

/// Crops a day column to the full-width area strictly below a header
/// region's bottom edge. The shift block sits under the date text, and the
/// engine reads the date as the first line when shown the whole column, so
/// shift recognition only ever looks at this part.
pub fn below_region(image: &RgbImage, region: &RelativeRect) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let bottom = (region.y + region.height).clamp(0.0, 1.0);
    let y = ((bottom * height as f32) as u32).min(height.saturating_sub(1));

    imageops::crop_imm(image, 0, y, width, height - y).to_image()
}
