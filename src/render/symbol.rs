//! QR symbol encoding.
//!
//! Uses the qrcode crate with error correction level H and a two-module
//! quiet zone. Coordinates passed to [`QrSymbol::is_dark`] include the quiet
//! zone, so `(0, 0)` is always light.

use qrcode::{Color as ModuleColor, EcLevel, QrCode};

use super::RenderError;

/// Quiet zone width in modules, on every side.
pub const MARGIN_MODULES: usize = 2;

/// Side length of a finder pattern in modules.
const FINDER_SIZE: usize = 7;

/// An encoded QR symbol.
#[derive(Debug, Clone)]
pub struct QrSymbol {
    /// Modules per side, excluding the quiet zone
    width: usize,
    /// Row-major, true = dark
    modules: Vec<bool>,
}

impl QrSymbol {
    /// Encode `value` at error correction level H.
    pub fn encode(value: &str) -> Result<Self, RenderError> {
        let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::H)
            .map_err(|e| RenderError::Encode(format!("QR code generation failed: {}", e)))?;

        let width = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == ModuleColor::Dark)
            .collect();

        Ok(Self { width, modules })
    }

    /// Modules per side of the symbol without the quiet zone.
    pub fn symbol_width(&self) -> usize {
        self.width
    }

    /// Modules per side including the quiet zone.
    pub fn modules_per_side(&self) -> usize {
        self.width + 2 * MARGIN_MODULES
    }

    /// Whether the module at `(x, y)` (quiet-zone inclusive) is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        match self.inner(x, y) {
            Some((ix, iy)) => self.modules[iy * self.width + ix],
            None => false,
        }
    }

    /// Whether `(x, y)` (quiet-zone inclusive) lies in one of the three
    /// finder patterns.
    pub fn is_finder_module(&self, x: usize, y: usize) -> bool {
        let Some((ix, iy)) = self.inner(x, y) else {
            return false;
        };
        let far = self.width.saturating_sub(FINDER_SIZE);
        let near_x = ix < FINDER_SIZE;
        let near_y = iy < FINDER_SIZE;
        (near_x && near_y) || (ix >= far && near_y) || (near_x && iy >= far)
    }

    /// Number of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&d| d).count()
    }

    fn inner(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        let ix = x.checked_sub(MARGIN_MODULES)?;
        let iy = y.checked_sub(MARGIN_MODULES)?;
        if ix < self.width && iy < self.width {
            Some((ix, iy))
        } else {
            None
        }
    }
}
