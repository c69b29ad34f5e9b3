//! # PDF Export
//!
//! Writes a single-page PDF with the preview embedded as an image.
//!
//! ## Page Geometry
//!
//! The page is `width × height` CSS pixels (1 px = 0.75 pt). The preview is
//! rasterized at a fixed ratio of 3 and fitted, aspect preserved, into a
//! centered square whose side is 80% of the shorter page side:
//!
//! ```text
//! ┌────────────────────────────┐
//! │         background         │
//! │     ┌──────────────┐       │
//! │     │   preview    │ 80%   │
//! │     └──────────────┘       │
//! └────────────────────────────┘
//! ```
//!
//! ## Object Layout
//!
//! | # | Object |
//! |---|--------|
//! | 1 | Catalog |
//! | 2 | Pages |
//! | 3 | Page |
//! | 4 | Image XObject (DeviceRGB, FlateDecode) |
//! | 5 | Content stream |

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use std::io::Write;

use super::{ExportError, ExportSettings};
use crate::color::Color;
use crate::render::PreviewSurface;

/// Raster ratio for PDF images.
pub const PDF_PIXEL_RATIO: f32 = 3.0;
/// Share of the shorter page side the image may occupy.
pub const IMAGE_SCALE: f32 = 0.8;
/// PDF points per CSS pixel.
pub const PT_PER_PX: f32 = 0.75;

/// Where the image lands on the page, in points (origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fit an `img_w × img_h` image into the centered square box.
pub fn placement(page_w: f32, page_h: f32, img_w: u32, img_h: u32) -> Placement {
    let box_side = page_w.min(page_h) * IMAGE_SCALE;
    let scale = box_side / img_w.max(img_h).max(1) as f32;
    let width = img_w as f32 * scale;
    let height = img_h as f32 * scale;
    Placement {
        x: (page_w - width) / 2.0,
        y: (page_h - height) / 2.0,
        width,
        height,
    }
}

fn pt(v: f32) -> String {
    format!("{:.2}", v)
}

fn rgb_operands(c: Color) -> String {
    let [r, g, b] = c.to_unit();
    format!("{:.4} {:.4} {:.4}", r, g, b)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Minimal PDF object writer that tracks byte offsets for the xref table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        // Binary marker comment so tools treat the file as binary
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self { buf, offsets: Vec::new() }
    }

    fn object(&mut self, body: &str) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    fn stream_object(&mut self, dict: &str, data: &[u8]) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(
            format!("{} 0 obj\n<< {} /Length {} >>\nstream\n", id, dict, data.len()).as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_start = self.buf.len();
        let count = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", count);
        for offset in &self.offsets {
            // Each entry is exactly 20 bytes including the EOL
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            count, xref_start
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

fn rgb_bytes(image: &RgbaImage) -> Vec<u8> {
    image
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect()
}

pub fn encode(surface: &PreviewSurface, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let image = surface.rasterize(PDF_PIXEL_RATIO);
    let (img_w, img_h) = image.dimensions();

    let page_w = settings.width as f32 * PT_PER_PX;
    let page_h = settings.height as f32 * PT_PER_PX;
    let place = placement(page_w, page_h, img_w, img_h);

    let pixels = deflate(&rgb_bytes(&image))?;

    let content = format!(
        "q\n{} rg\n0 0 {} {} re\nf\nQ\nq\n{} 0 0 {} {} {} cm\n/Im1 Do\nQ\n",
        rgb_operands(surface.background()),
        pt(page_w),
        pt(page_h),
        pt(place.width),
        pt(place.height),
        pt(place.x),
        pt(place.y),
    );
    let content = deflate(content.as_bytes())?;

    let mut pdf = PdfWriter::new();
    pdf.object("<< /Type /Catalog /Pages 2 0 R >>");
    pdf.object("<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    pdf.object(&format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /XObject << /Im1 4 0 R >> >> /Contents 5 0 R >>",
        pt(page_w),
        pt(page_h),
    ));
    pdf.stream_object(
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode",
            img_w, img_h
        ),
        &pixels,
    );
    pdf.stream_object("/Filter /FlateDecode", &content);

    Ok(pdf.finish())
}
