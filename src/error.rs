//! # Error Types
//!
//! Top-level error for the qrforge library and CLI. Each module has its own
//! error enum; this one wraps them.

use thiserror::Error;

/// Main error type for qrforge operations
#[derive(Debug, Error)]
pub enum QrForgeError {
    /// Rejected user input (empty text, unknown template, ...)
    #[error("{0}")]
    Session(#[from] crate::session::SessionError),

    /// Controller errors
    #[error("{0}")]
    App(#[from] crate::app::AppError),

    /// Invalid color string
    #[error("{0}")]
    Color(#[from] crate::color::ColorError),

    /// QR encoding or preview error
    #[error("Render error: {0}")]
    Render(#[from] crate::render::RenderError),

    /// Export pipeline error
    #[error("Export error: {0}")]
    Export(#[from] crate::export::ExportError),

    /// Persistence error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::history::StorageError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
