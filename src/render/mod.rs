//! # Preview Surface
//!
//! Composes the QR symbol, template styling and caption into one surface
//! that can be rasterized at any pixel ratio or serialized to SVG.
//!
//! ## Layout
//!
//! All measurements are logical (CSS) pixels:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │            24 pad            │
//! │    ┌──────────────────┐      │
//! │ 24 │   symbol 220×220 │ 24   │
//! │    └──────────────────┘      │
//! │            16 gap            │   caption band only when
//! │        caption line          │   the caption text is non-empty
//! │            24 pad            │
//! └──────────────────────────────┘
//! ```
//!
//! The caption line is 1.5 × the font size tall. A caption wider than the
//! symbol widens the whole surface; the symbol stays centered.
//!
//! ## Example
//!
//! ```
//! use qrforge::caption::CaptionStyle;
//! use qrforge::render::PreviewSurface;
//! use qrforge::template;
//!
//! let surface = PreviewSurface::new(
//!     "https://example.com",
//!     template::by_id("dark").unwrap(),
//!     &CaptionStyle::new("Scan Me"),
//! ).unwrap();
//!
//! let image = surface.rasterize(2.0);
//! assert_eq!(image.width(), 536);
//! ```

pub mod blend;
pub mod font;
mod svg;
pub mod symbol;

pub use symbol::QrSymbol;

use image::RgbaImage;
use thiserror::Error;

use crate::caption::CaptionStyle;
use crate::color::Color;
use crate::template::{ModuleStyle, Template};
use blend::{GradientField, inside_rounded_box};
use font::CaptionBitmap;

/// Side of the symbol box.
pub const QR_SIZE: f32 = 220.0;
/// Padding around the content.
pub const PADDING: f32 = 24.0;
/// Space between symbol and caption.
pub const CAPTION_GAP: f32 = 16.0;
/// Caption line height as a multiple of the font size.
pub const CAPTION_LINE_HEIGHT: f32 = 1.5;
/// Encoded when the input is empty, so the preview is never blank.
pub const PLACEHOLDER_VALUE: &str = "https://example.com";

/// Errors that can occur while building a preview.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Encoding error: {0}")]
    Encode(String),
}

/// Caption placement within the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionBox {
    /// Left edge of the text
    pub x: f32,
    /// Top edge of the glyph cells
    pub y: f32,
    pub width: f32,
    /// Glyph cell height (the font size)
    pub height: f32,
    /// Baseline-independent center of the line, used for SVG text
    pub center_y: f32,
}

/// Surface geometry in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub qr_x: f32,
    pub qr_y: f32,
    pub caption: Option<CaptionBox>,
}

impl Layout {
    pub fn compute(caption: &CaptionStyle) -> Self {
        if !caption.is_visible() {
            let side = QR_SIZE + 2.0 * PADDING;
            return Self {
                width: side,
                height: side,
                qr_x: PADDING,
                qr_y: PADDING,
                caption: None,
            };
        }

        let font_size = caption.font_size as f32;
        let text_w = font::text_width(&caption.text, font_size);
        let content_w = QR_SIZE.max(text_w);
        let width = content_w + 2.0 * PADDING;

        let line_h = (font_size * CAPTION_LINE_HEIGHT).ceil();
        let line_top = PADDING + QR_SIZE + CAPTION_GAP;
        let height = line_top + line_h + PADDING;

        Self {
            width,
            height,
            qr_x: (width - QR_SIZE) / 2.0,
            qr_y: PADDING,
            caption: Some(CaptionBox {
                x: (width - text_w) / 2.0,
                y: line_top + (line_h - font_size) / 2.0,
                width: text_w,
                height: font_size,
                center_y: line_top + line_h / 2.0,
            }),
        }
    }
}

/// The styled preview: what gets shown and what gets exported.
#[derive(Debug, Clone)]
pub struct PreviewSurface {
    value: String,
    template: Template,
    caption: CaptionStyle,
    symbol: QrSymbol,
    layout: Layout,
}

impl PreviewSurface {
    /// Build a surface. An empty `value` previews [`PLACEHOLDER_VALUE`].
    pub fn new(value: &str, template: &Template, caption: &CaptionStyle) -> Result<Self, RenderError> {
        let value = if value.is_empty() { PLACEHOLDER_VALUE } else { value };
        let caption = caption.sanitized();
        let symbol = QrSymbol::encode(value)?;
        let layout = Layout::compute(&caption);

        Ok(Self {
            value: value.to_string(),
            template: *template,
            caption,
            symbol,
            layout,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn caption(&self) -> &CaptionStyle {
        &self.caption
    }

    pub fn symbol(&self) -> &QrSymbol {
        &self.symbol
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn background(&self) -> Color {
        self.template.background
    }

    /// Pixel dimensions of [`rasterize`](Self::rasterize) at `pixel_ratio`.
    pub fn pixel_size(&self, pixel_ratio: f32) -> (u32, u32) {
        let w = (self.layout.width * pixel_ratio).ceil().max(1.0) as u32;
        let h = (self.layout.height * pixel_ratio).ceil().max(1.0) as u32;
        (w, h)
    }

    /// Color of the symbol box at logical offset `(u, v)` from its top-left,
    /// or `None` where the rounded corners clip it away.
    fn symbol_color(&self, u: f32, v: f32, gradient: Option<&GradientField>) -> Option<Color> {
        if !inside_rounded_box(u, v, QR_SIZE, self.template.radius()) {
            return None;
        }

        let n = self.symbol.modules_per_side();
        let module = QR_SIZE / n as f32;
        let mx = ((u / module) as usize).min(n - 1);
        let my = ((v / module) as usize).min(n - 1);

        let mut dark = self.symbol.is_dark(mx, my);
        if dark && self.template.style() == ModuleStyle::Dots && !self.symbol.is_finder_module(mx, my) {
            let cx = (mx as f32 + 0.5) * module;
            let cy = (my as f32 + 0.5) * module;
            let r = module / 2.0;
            dark = (u - cx).powi(2) + (v - cy).powi(2) <= r * r;
        }

        let base = if dark {
            self.template.effective_foreground()
        } else {
            self.template.background
        };

        Some(match gradient {
            Some(field) => field.apply(base, u, v),
            None => base,
        })
    }

    /// Rasterize the surface at `pixel_ratio` device pixels per logical pixel.
    pub fn rasterize(&self, pixel_ratio: f32) -> RgbaImage {
        let ratio = pixel_ratio.max(0.01);
        let (w, h) = self.pixel_size(ratio);
        let mut img = RgbaImage::from_pixel(w, h, self.template.background.to_rgba());

        let gradient = self.template.gradient.as_ref().map(|g| GradientField::new(g, QR_SIZE));

        // Symbol box
        let x0 = (self.layout.qr_x * ratio).floor() as u32;
        let y0 = (self.layout.qr_y * ratio).floor() as u32;
        let x1 = (((self.layout.qr_x + QR_SIZE) * ratio).ceil() as u32).min(w);
        let y1 = (((self.layout.qr_y + QR_SIZE) * ratio).ceil() as u32).min(h);

        for py in y0..y1 {
            let v = (py as f32 + 0.5) / ratio - self.layout.qr_y;
            for px in x0..x1 {
                let u = (px as f32 + 0.5) / ratio - self.layout.qr_x;
                if let Some(color) = self.symbol_color(u, v, gradient.as_ref()) {
                    img.put_pixel(px, py, color.to_rgba());
                }
            }
        }

        if let Some(caption_box) = self.layout.caption {
            let bitmap = font::render_line(&self.caption.text, self.caption.font_size);
            draw_caption(&mut img, &bitmap, &caption_box, self.caption.color, ratio);
        }

        img
    }

    /// Serialize the surface as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        svg::surface_to_svg(self)
    }
}

fn draw_caption(img: &mut RgbaImage, bitmap: &CaptionBitmap, caption: &CaptionBox, color: Color, ratio: f32) {
    if caption.width <= 0.0 || caption.height <= 0.0 {
        return;
    }

    let (w, h) = img.dimensions();
    let x0 = (caption.x * ratio).floor().max(0.0) as u32;
    let y0 = (caption.y * ratio).floor().max(0.0) as u32;
    let x1 = (((caption.x + caption.width) * ratio).ceil() as u32).min(w);
    let y1 = (((caption.y + caption.height) * ratio).ceil() as u32).min(h);
    let ink = color.to_rgba();

    for py in y0..y1 {
        let v = ((py as f32 + 0.5) / ratio - caption.y) / caption.height;
        for px in x0..x1 {
            let u = ((px as f32 + 0.5) / ratio - caption.x) / caption.width;
            if bitmap.sample(u, v) {
                img.put_pixel(px, py, ink);
            }
        }
    }
}
