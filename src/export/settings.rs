//! Export format and target size.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_EXPORT_PX: u32 = 64;
pub const MAX_EXPORT_PX: u32 = 4096;

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "svg" => Ok(ExportFormat::Svg),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("Unknown export format '{}' (expected png, svg or pdf)", other)),
        }
    }
}

/// A named size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const EXPORT_DIMENSIONS: &[Dimension] = &[
    Dimension { label: "Small (256px)", width: 256, height: 256 },
    Dimension { label: "Medium (512px)", width: 512, height: 512 },
    Dimension { label: "Large (1024px)", width: 1024, height: 1024 },
    Dimension { label: "Print (2048px)", width: 2048, height: 2048 },
];

/// Requested export format and pixel size.
///
/// Both dimensions always lie in `[MIN_EXPORT_PX, MAX_EXPORT_PX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            width: 512,
            height: 512,
        }
    }
}

fn clamp_px(px: u32) -> u32 {
    px.clamp(MIN_EXPORT_PX, MAX_EXPORT_PX)
}

impl ExportSettings {
    pub fn new(format: ExportFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width: clamp_px(width),
            height: clamp_px(height),
        }
    }

    /// Build settings from optional overrides on top of the default.
    ///
    /// `size` sets both sides; `width` and `height` then override one side each.
    pub fn from_overrides(format: ExportFormat, size: Option<u32>, width: Option<u32>, height: Option<u32>) -> Self {
        let mut settings = Self::default().with_format(format);
        if let Some(px) = size {
            settings = settings.with_square_size(px);
        }
        if let Some(px) = width {
            settings = settings.with_width(px);
        }
        if let Some(px) = height {
            settings = settings.with_height(px);
        }
        settings
    }

    pub fn with_format(self, format: ExportFormat) -> Self {
        Self { format, ..self }
    }

    /// Set both dimensions, as the custom width field does.
    pub fn with_square_size(self, px: u32) -> Self {
        Self::new(self.format, px, px)
    }

    pub fn with_width(self, px: u32) -> Self {
        Self::new(self.format, px, self.height)
    }

    pub fn with_height(self, px: u32) -> Self {
        Self::new(self.format, self.width, px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_are_clamped() {
        let s = ExportSettings::new(ExportFormat::Png, 10, 100_000);
        assert_eq!((s.width, s.height), (64, 4096));
    }

    #[test]
    fn test_square_size_sets_both() {
        let s = ExportSettings::default().with_height(300).with_square_size(1000);
        assert_eq!((s.width, s.height), (1000, 1000));
    }

    #[test]
    fn test_with_height_keeps_width() {
        let s = ExportSettings::default().with_height(128);
        assert_eq!((s.width, s.height), (512, 128));
    }

    #[test]
    fn test_overrides_size_then_sides() {
        let s = ExportSettings::from_overrides(ExportFormat::Pdf, Some(1024), None, None);
        assert_eq!(s, ExportSettings::new(ExportFormat::Pdf, 1024, 1024));

        let s = ExportSettings::from_overrides(ExportFormat::Png, Some(1024), None, Some(300));
        assert_eq!((s.width, s.height), (1024, 300));

        let s = ExportSettings::from_overrides(ExportFormat::Svg, None, Some(9000), None);
        assert_eq!((s.format, s.width, s.height), (ExportFormat::Svg, 4096, 512));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("svg".parse::<ExportFormat>().unwrap().mime_type(), "image/svg+xml");
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_presets_within_bounds() {
        for d in EXPORT_DIMENSIONS {
            let s = ExportSettings::default().with_square_size(d.width);
            assert_eq!((s.width, s.height), (d.width, d.height));
        }
    }
}
