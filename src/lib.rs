//! # QrForge - Styled QR Code Generator
//!
//! QrForge turns a URL or text into a styled QR code and exports it. It
//! provides:
//!
//! - **Templates**: a fixed catalog of color, gradient and module-shape presets
//! - **Captions**: optional text below the symbol with its own font, color and size
//! - **Preview rendering**: raster at any pixel ratio, or SVG
//! - **Export**: PNG, SVG and PDF at a chosen size
//! - **History**: the last 20 generations, deduplicated and persisted
//!
//! ## Quick Start
//!
//! ```no_run
//! use qrforge::{
//!     app::App,
//!     export::{ExportFormat, ExportSettings},
//!     history::FileStore,
//!     session::Event,
//! };
//!
//! let mut app = App::new(FileStore::new("/tmp/qrforge"));
//! app.dispatch(Event::SelectTemplate("gradient-teal".into()))?;
//! app.dispatch(Event::EditInput("https://example.com".into()))?;
//! app.dispatch(Event::EditExport(ExportSettings::new(ExportFormat::Png, 1024, 1024)))?;
//! app.generate()?;
//!
//! let artifact = app.export(qrforge::history::now_millis())?;
//! artifact.write_to(std::path::Path::new("."))?;
//! # Ok::<(), qrforge::QrForgeError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Template catalog |
//! | [`caption`] | Caption style and presets |
//! | [`render`] | QR symbol encoding and the preview surface |
//! | [`export`] | PNG / SVG / PDF serialization |
//! | [`history`] | Bounded, persisted generation history |
//! | [`session`] | Controller state and reducer |
//! | [`app`] | Application controller |
//! | [`config`] | Runtime configuration |
//! | [`error`] | Error types |

pub mod app;
pub mod caption;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod render;
pub mod session;
pub mod template;

// Re-exports for convenience
pub use app::App;
pub use error::QrForgeError;
pub use template::Template;
