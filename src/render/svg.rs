//! SVG serialization of a preview surface.
//!
//! Produces the same layout as the raster path, in logical pixels. The
//! gradient is an overlay rect with `mix-blend-mode: multiply`, so viewers
//! that ignore blend modes show it as an opaque wash.

use std::fmt::Write;

use super::{PreviewSurface, QR_SIZE};
use crate::template::ModuleStyle;

/// Format a coordinate with at most three decimals and no trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Escape text for XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

pub(super) fn surface_to_svg(surface: &PreviewSurface) -> String {
    let layout = surface.layout();
    let template = surface.template();
    let symbol = surface.symbol();
    let n = symbol.modules_per_side();
    let module = QR_SIZE / n as f32;
    let radius = template.radius().min(QR_SIZE / 2.0);
    let dots = template.style() == ModuleStyle::Dots;

    let mut svg = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(layout.width),
        h = num(layout.height),
    );

    let clip_id = format!("qr-clip-{}", template.id);
    let gradient_id = format!("qr-gradient-{}", template.id);

    svg.push_str("<defs>\n");
    let _ = writeln!(
        svg,
        r#"<clipPath id="{}"><rect width="{s}" height="{s}" rx="{r}" ry="{r}"/></clipPath>"#,
        clip_id,
        s = num(QR_SIZE),
        r = num(radius),
    );
    if let Some(gradient) = &template.gradient {
        // SVG gradients run left-to-right at 0°, CSS ones bottom-to-top
        let _ = writeln!(
            svg,
            r#"<linearGradient id="{}" gradientTransform="rotate({} 0.5 0.5)"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
            gradient_id,
            num(gradient.rotation_degrees() - 90.0),
            gradient.stops[0],
            gradient.stops[1],
        );
    }
    svg.push_str("</defs>\n");

    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        template.background
    );

    let _ = writeln!(
        svg,
        r#"<g transform="translate({} {})" clip-path="url(#{})">"#,
        num(layout.qr_x),
        num(layout.qr_y),
        clip_id
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{s}" height="{s}" fill="{}"/>"#,
        template.background,
        s = num(QR_SIZE),
    );

    // Square modules share one path; dots become circles
    let mut path = String::new();
    let mut circles = String::new();
    for y in 0..n {
        for x in 0..n {
            if !symbol.is_dark(x, y) {
                continue;
            }
            let px = x as f32 * module;
            let py = y as f32 * module;
            if dots && !symbol.is_finder_module(x, y) {
                let _ = writeln!(
                    circles,
                    r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                    num(px + module / 2.0),
                    num(py + module / 2.0),
                    num(module / 2.0),
                );
            } else {
                let _ = write!(
                    path,
                    "M{} {}h{m}v{m}h-{m}z",
                    num(px),
                    num(py),
                    m = num(module),
                );
            }
        }
    }

    let fg = template.effective_foreground();
    let _ = writeln!(svg, r#"<g fill="{}">"#, fg);
    if !path.is_empty() {
        let _ = writeln!(svg, r#"<path d="{}"/>"#, path);
    }
    svg.push_str(&circles);
    svg.push_str("</g>\n");

    if template.gradient.is_some() {
        let _ = writeln!(
            svg,
            r#"<rect width="{s}" height="{s}" fill="url(#{})" style="mix-blend-mode:multiply"/>"#,
            gradient_id,
            s = num(QR_SIZE),
        );
    }
    svg.push_str("</g>\n");

    if let Some(caption_box) = layout.caption {
        let caption = surface.caption();
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="{}" font-size="{}" font-weight="500" fill="{}">{}</text>"#,
            num(layout.width / 2.0),
            num(caption_box.center_y),
            escape_xml(&caption.font_family),
            caption.font_size,
            caption.color,
            escape_xml(&caption.text),
        );
    }

    svg.push_str("</svg>\n");
    svg
}
