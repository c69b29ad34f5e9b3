//! # Template Catalog
//!
//! Fixed, ordered list of visual presets for QR codes.
//!
//! | Id | Name | Foreground | Background | Extras |
//! |----|------|------------|------------|--------|
//! | `minimal` | Minimal B&W | #1a1a1a | #ffffff | squares |
//! | `rounded` | Rounded | #2d3436 | #ffffff | radius 8, dots |
//! | `gradient-teal` | Teal Gradient | #0d9488 | #ffffff | 135° gradient |
//! | `pastel` | Soft Pastel | #6366f1 | #faf5ff | dots |
//! | `dark` | Dark Theme | #e5e5e5 | #18181b | |
//! | `light` | Light Theme | #404040 | #fafafa | |
//! | `modern-blocks` | Modern Blocks | #1e293b | #f8fafc | squares |
//! | `elegant` | Elegant | #374151 | #ffffff | dots |
//! | `creative` | Creative | #7c3aed | #fef3c7 | 45° gradient, dots |
//!
//! Templates are immutable and looked up by id. A lookup miss is reported as
//! `None`; what to do about it is up to the caller.

use serde::Serialize;

use crate::color::Color;

/// How individual QR modules are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStyle {
    #[default]
    Squares,
    Dots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    Linear,
    /// Carried as data; rendered with the linear overlay.
    Radial,
}

/// Two-stop gradient composited over the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: [Color; 2],
    /// CSS angle in degrees (0 = towards the top, 90 = towards the right).
    pub rotation: Option<f32>,
}

impl Gradient {
    /// Angle used when the template does not specify one.
    pub const DEFAULT_ROTATION: f32 = 135.0;

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.unwrap_or(Self::DEFAULT_ROTATION)
    }
}

/// A named styling preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub foreground: Color,
    pub background: Color,
    /// Corner rounding of the symbol box, in logical pixels.
    pub corner_radius: Option<f32>,
    pub module_style: Option<ModuleStyle>,
    pub gradient: Option<Gradient>,
}

impl Template {
    /// Color the modules are drawn with before any gradient overlay.
    pub fn effective_foreground(&self) -> Color {
        match &self.gradient {
            Some(g) => g.stops[0],
            None => self.foreground,
        }
    }

    pub fn style(&self) -> ModuleStyle {
        self.module_style.unwrap_or_default()
    }

    pub fn radius(&self) -> f32 {
        self.corner_radius.unwrap_or(0.0).max(0.0)
    }
}

const fn plain(id: &'static str, name: &'static str, fg: Color, bg: Color) -> Template {
    Template {
        id,
        name,
        foreground: fg,
        background: bg,
        corner_radius: None,
        module_style: None,
        gradient: None,
    }
}

static TEMPLATES: [Template; 9] = [
    Template {
        module_style: Some(ModuleStyle::Squares),
        ..plain("minimal", "Minimal B&W", Color::rgb(0x1a, 0x1a, 0x1a), Color::WHITE)
    },
    Template {
        corner_radius: Some(8.0),
        module_style: Some(ModuleStyle::Dots),
        ..plain("rounded", "Rounded", Color::rgb(0x2d, 0x34, 0x36), Color::WHITE)
    },
    Template {
        gradient: Some(Gradient {
            kind: GradientKind::Linear,
            stops: [Color::rgb(0x0d, 0x94, 0x88), Color::rgb(0x06, 0xb6, 0xd4)],
            rotation: Some(135.0),
        }),
        ..plain("gradient-teal", "Teal Gradient", Color::rgb(0x0d, 0x94, 0x88), Color::WHITE)
    },
    Template {
        module_style: Some(ModuleStyle::Dots),
        ..plain("pastel", "Soft Pastel", Color::rgb(0x63, 0x66, 0xf1), Color::rgb(0xfa, 0xf5, 0xff))
    },
    plain("dark", "Dark Theme", Color::rgb(0xe5, 0xe5, 0xe5), Color::rgb(0x18, 0x18, 0x1b)),
    plain("light", "Light Theme", Color::rgb(0x40, 0x40, 0x40), Color::rgb(0xfa, 0xfa, 0xfa)),
    Template {
        module_style: Some(ModuleStyle::Squares),
        ..plain("modern-blocks", "Modern Blocks", Color::rgb(0x1e, 0x29, 0x3b), Color::rgb(0xf8, 0xfa, 0xfc))
    },
    Template {
        module_style: Some(ModuleStyle::Dots),
        ..plain("elegant", "Elegant", Color::rgb(0x37, 0x41, 0x51), Color::WHITE)
    },
    Template {
        gradient: Some(Gradient {
            kind: GradientKind::Linear,
            stops: [Color::rgb(0x7c, 0x3a, 0xed), Color::rgb(0xec, 0x48, 0x99)],
            rotation: Some(45.0),
        }),
        module_style: Some(ModuleStyle::Dots),
        ..plain("creative", "Creative", Color::rgb(0x7c, 0x3a, 0xed), Color::rgb(0xfe, 0xf3, 0xc7))
    },
];

/// All templates in display order.
pub fn all() -> &'static [Template] {
    &TEMPLATES
}

/// Look up a template by id.
pub fn by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// The template selected when a session starts.
pub fn default_template() -> &'static Template {
    &TEMPLATES[0]
}

/// Template ids in display order.
pub fn ids() -> Vec<&'static str> {
    TEMPLATES.iter().map(|t| t.id).collect()
}
