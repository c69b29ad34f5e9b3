//! Caption text drawn below the QR symbol.

use serde::{Deserialize, Serialize};

use crate::color::Color;

pub const MAX_CAPTION_CHARS: usize = 50;
pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 32;

/// Font families offered for captions.
pub const FONT_OPTIONS: &[&str] = &["DM Sans", "Arial", "Georgia", "Courier New", "Verdana"];

/// One-click caption texts.
pub const TEXT_PRESETS: &[&str] = &[
    "Scan Me",
    "Visit My Website",
    "Pay Now",
    "Learn More",
    "Get Started",
    "Follow Us",
];

/// Caption text and its styling.
///
/// Serialized in camelCase so persisted history matches the
/// `{text, fontFamily, color, fontSize}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionStyle {
    pub text: String,
    pub font_family: String,
    pub color: Color,
    pub font_size: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: FONT_OPTIONS[0].to_string(),
            color: Color::rgb(0x1a, 0x1a, 0x1a),
            font_size: 16,
        }
    }
}

impl CaptionStyle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn font(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, px: u32) -> Self {
        self.font_size = px;
        self
    }

    /// Copy with text cut to [`MAX_CAPTION_CHARS`] and the font size clamped
    /// into `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.
    pub fn sanitized(&self) -> Self {
        Self {
            text: self.text.chars().take(MAX_CAPTION_CHARS).collect(),
            font_family: self.font_family.clone(),
            color: self.color,
            font_size: self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        }
    }

    /// Whether a caption band is drawn at all.
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }
}
