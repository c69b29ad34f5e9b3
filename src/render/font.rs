//! Caption glyphs for raster output.
//!
//! Uses the Spleen bitmap font family. Small captions (≤16px) sample the
//! 8x16 face, larger ones the 12x24 face; either way the bitmap is stretched
//! to the requested font size with nearest-neighbor sampling.

use spleen_font::{FONT_8X16, FONT_12X24, PSF2Font};

/// Width of a glyph cell relative to the font size (both Spleen faces are 1:2).
pub const GLYPH_ASPECT: f32 = 0.5;

/// A line of text rasterized at the font's native resolution.
#[derive(Debug, Clone)]
pub struct CaptionBitmap {
    pub width: usize,
    pub height: usize,
    /// Row-major, true = ink
    pub bits: Vec<bool>,
}

impl CaptionBitmap {
    /// Sample at normalized coordinates (`0.0..1.0` on both axes).
    pub fn sample(&self, u: f32, v: f32) -> bool {
        if self.width == 0 || self.height == 0 || !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return false;
        }
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        self.bits[y * self.width + x]
    }

    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Logical width of `text` at `font_size` pixels.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_ASPECT
}

/// Rasterize one line of text.
pub fn render_line(text: &str, font_size: u32) -> CaptionBitmap {
    let (data, cell_w, cell_h): (&[u8], usize, usize) = if font_size <= 16 {
        (&FONT_8X16[..], 8, 16)
    } else {
        (&FONT_12X24[..], 12, 24)
    };

    let chars: Vec<char> = text.chars().collect();
    let width = chars.len() * cell_w;
    let mut bits = vec![false; width * cell_h];

    let mut font = match PSF2Font::new(data) {
        Ok(f) => f,
        Err(_) => {
            tracing::warn!("Failed to load caption font, drawing placeholder boxes");
            for i in 0..chars.len() {
                draw_box(&mut bits, width, i * cell_w, cell_w, cell_h);
            }
            return CaptionBitmap { width, height: cell_h, bits };
        }
    };

    for (i, ch) in chars.iter().enumerate() {
        let origin_x = i * cell_w;
        if *ch == ' ' {
            continue;
        }

        let utf8 = ch.to_string();
        match font.glyph_for_utf8(utf8.as_bytes()) {
            Some(glyph) => {
                for (row_y, row) in glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if on && row_y < cell_h && col_x < cell_w {
                            bits[row_y * width + origin_x + col_x] = true;
                        }
                    }
                }
            }
            // Unknown chars get a box
            None => draw_box(&mut bits, width, origin_x, cell_w, cell_h),
        }
    }

    CaptionBitmap {
        width,
        height: cell_h,
        bits,
    }
}

fn draw_box(bits: &mut [bool], stride: usize, origin_x: usize, cell_w: usize, cell_h: usize) {
    // Inset by one so neighboring boxes stay distinguishable
    let (x0, x1) = (origin_x + 1, origin_x + cell_w - 2);
    let (y0, y1) = (2, cell_h - 3);
    for x in x0..=x1 {
        bits[y0 * stride + x] = true;
        bits[y1 * stride + x] = true;
    }
    for y in y0..=y1 {
        bits[y * stride + x0] = true;
        bits[y * stride + x1] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_caption_uses_8x16() {
        let bitmap = render_line("Scan", 14);
        assert_eq!(bitmap.width, 32);
        assert_eq!(bitmap.height, 16);
        assert!(bitmap.ink_count() > 0);
    }

    #[test]
    fn test_large_caption_uses_12x24() {
        let bitmap = render_line("Scan", 24);
        assert_eq!(bitmap.width, 48);
        assert_eq!(bitmap.height, 24);
    }

    #[test]
    fn test_space_has_no_ink() {
        assert_eq!(render_line("   ", 16).ink_count(), 0);
    }

    #[test]
    fn test_sample_out_of_range_is_blank() {
        let bitmap = render_line("A", 16);
        assert!(!bitmap.sample(-0.1, 0.5));
        assert!(!bitmap.sample(0.5, 1.0));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("Pay Now", 20.0), 70.0);
    }
}
