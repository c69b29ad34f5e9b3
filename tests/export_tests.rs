//! # Export Tests
//!
//! Exports produced through the controller, checked by decoding the bytes
//! back where a decoder is available.

use pretty_assertions::assert_eq;
use qrforge::App;
use qrforge::caption::CaptionStyle;
use qrforge::export::{ExportFormat, ExportSettings};
use qrforge::history::MemoryStore;
use qrforge::session::Event;

fn ready_app(template: &str, caption: Option<&str>, settings: ExportSettings) -> App<MemoryStore> {
    let mut app = App::new(MemoryStore::new());
    app.dispatch(Event::SelectTemplate(template.into())).unwrap();
    if let Some(text) = caption {
        app.dispatch(Event::EditCaption(CaptionStyle::new(text))).unwrap();
    }
    app.dispatch(Event::EditExport(settings)).unwrap();
    app.dispatch(Event::EditInput("https://example.com".into())).unwrap();
    app.generate().unwrap();
    app
}

#[test]
fn test_png_with_caption_is_exact_square() {
    let mut app = ready_app(
        "minimal",
        Some("Scan Me"),
        ExportSettings::new(ExportFormat::Png, 256, 256),
    );
    let artifact = app.export(1).unwrap();
    assert_eq!(artifact.file_name, "qr-code-1.png");

    let img = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (256, 256));
}

#[test]
fn test_png_non_square_is_padded_with_background() {
    let mut app = ready_app("dark", None, ExportSettings::new(ExportFormat::Png, 800, 400));
    let artifact = app.export(2).unwrap();

    let img = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (800, 400));
    // Left edge lies outside the centered 400x400 square
    let corner = img.get_pixel(0, 200);
    assert_eq!(&corner.0[..3], &[0x18, 0x18, 0x1b]);
}

#[test]
fn test_svg_contains_caption_and_gradient() {
    let mut app = ready_app(
        "gradient-teal",
        Some("Menu & Prices"),
        ExportSettings::new(ExportFormat::Svg, 1024, 1024),
    );
    let artifact = app.export(3).unwrap();
    assert_eq!(artifact.mime_type(), "image/svg+xml");

    let svg = String::from_utf8(artifact.bytes).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("linearGradient"));
    assert!(svg.contains("Menu &amp; Prices"));
}

#[test]
fn test_pdf_page_matches_requested_size() {
    let mut app = ready_app("pastel", None, ExportSettings::new(ExportFormat::Pdf, 1024, 512));
    let artifact = app.export(4).unwrap();

    let bytes = &artifact.bytes;
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    let text = String::from_utf8_lossy(bytes);
    assert!(text.contains("/MediaBox [0 0 768.00 384.00]"));
}

#[test]
fn test_write_to_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exports");

    let mut app = ready_app("light", None, ExportSettings::default());
    let artifact = app.export(5).unwrap();
    let path = artifact.write_to(&out).unwrap();

    assert_eq!(path, out.join("qr-code-5.png"));
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
}
