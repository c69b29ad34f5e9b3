//! PNG export.
//!
//! ```text
//! surface ──rasterize(ratio)──▶ source (sw × sh)
//!          center-crop square side min(sw, sh)
//!          resample to min(width, height)
//!          paste centered on width × height, background-filled
//! ```

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use super::{ExportError, ExportSettings};
use crate::render::{PreviewSurface, QR_SIZE};

/// Device pixels per logical pixel for a target width: at least 2.
pub fn pixel_ratio(width: u32) -> f32 {
    (width as f32 / QR_SIZE).max(2.0)
}

/// Compose `source` onto a `width × height` canvas filled with `background`:
/// the centered square of the source, resampled to the canvas' smaller side.
pub fn fit_square(source: &RgbaImage, width: u32, height: u32, background: image::Rgba<u8>) -> RgbaImage {
    let (sw, sh) = source.dimensions();
    let side = sw.min(sh);
    let cropped = imageops::crop_imm(source, (sw - side) / 2, (sh - side) / 2, side, side).to_image();

    let target = width.min(height);
    let resized = if target == side {
        cropped
    } else {
        imageops::resize(&cropped, target, target, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(width, height, background);
    imageops::overlay(
        &mut canvas,
        &resized,
        ((width - target) / 2) as i64,
        ((height - target) / 2) as i64,
    );
    canvas
}

/// Render the final canvas (before encoding).
pub fn render_canvas(surface: &PreviewSurface, settings: &ExportSettings) -> RgbaImage {
    let source = surface.rasterize(pixel_ratio(settings.width));
    fit_square(&source, settings.width, settings.height, surface.background().to_rgba())
}

pub fn encode(surface: &PreviewSurface, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let canvas = render_canvas(surface, settings);
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ExportError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_pixel_ratio_floor_is_two() {
        assert_eq!(pixel_ratio(256), 2.0);
        assert_eq!(pixel_ratio(880), 4.0);
    }

    #[test]
    fn test_fit_square_crops_center() {
        // 30 × 10 source: red band in the middle third
        let mut source = RgbaImage::from_pixel(30, 10, Rgba([0, 0, 255, 255]));
        for y in 0..10 {
            for x in 10..20 {
                source.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let out = fit_square(&source, 10, 10, Rgba([0, 0, 0, 255]));
        assert_eq!(out.dimensions(), (10, 10));
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_fit_square_pads_non_square_target() {
        let source = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        let out = fit_square(&source, 40, 20, Rgba([9, 9, 9, 255]));
        assert_eq!(out.dimensions(), (40, 20));
        assert_eq!(out.get_pixel(0, 0).0, [9, 9, 9, 255]);
        assert_eq!(out.get_pixel(20, 10).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(39, 19).0, [9, 9, 9, 255]);
    }
}
