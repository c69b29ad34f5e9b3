//! # Export Pipeline
//!
//! Serializes a [`PreviewSurface`] to a file in the requested format.
//!
//! | Format | Size handling | Background |
//! |--------|---------------|------------|
//! | PNG | exactly `width × height`, square crop centered | template background |
//! | SVG | native preview proportions (size ignored) | template background |
//! | PDF | page `width × height`, image at 80% of the short side | template background |
//!
//! Files are named `qr-code-<epochMillis>.<ext>`. A failed export produces
//! no file.

pub mod pdf;
pub mod png;
pub mod settings;

pub use settings::{Dimension, EXPORT_DIMENSIONS, ExportFormat, ExportSettings, MAX_EXPORT_PX, MIN_EXPORT_PX};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::render::PreviewSurface;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image error: {0}")]
    Image(String),

    #[error("Render error: {0}")]
    Render(#[from] crate::render::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An encoded export, ready to be written.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Write into `dir` (created if missing) and return the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// `qr-code-<epoch_millis>.<ext>`
pub fn file_name(format: ExportFormat, epoch_millis: i64) -> String {
    format!("qr-code-{}.{}", epoch_millis, format.extension())
}

/// Export `surface` according to `settings`.
pub fn export(
    surface: &PreviewSurface,
    settings: &ExportSettings,
    epoch_millis: i64,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match settings.format {
        ExportFormat::Png => png::encode(surface, settings)?,
        ExportFormat::Svg => surface.to_svg().into_bytes(),
        ExportFormat::Pdf => pdf::encode(surface, settings)?,
    };

    tracing::debug!(
        format = %settings.format,
        width = settings.width,
        height = settings.height,
        bytes = bytes.len(),
        "export encoded"
    );

    Ok(ExportArtifact {
        file_name: file_name(settings.format, epoch_millis),
        format: settings.format,
        bytes,
    })
}
