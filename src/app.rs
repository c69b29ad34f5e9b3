//! # Application Controller
//!
//! Owns the session and the history store and carries out the effects the
//! reducer asks for.
//!
//! ```
//! use qrforge::app::App;
//! use qrforge::history::MemoryStore;
//! use qrforge::session::Event;
//!
//! let mut app = App::new(MemoryStore::new());
//! app.dispatch(Event::SelectTemplate("dark".into())).unwrap();
//! app.dispatch(Event::EditInput("hello".into())).unwrap();
//! app.generate().unwrap();
//!
//! let id = app.history().entries()[0].id.clone();
//! app.restore(&id).unwrap();
//! assert!(app.session().is_ready());
//! ```

use thiserror::Error;

use crate::export::{self, ExportArtifact, ExportError};
use crate::history::{HistoryEntry, HistoryStore, KeyValueStore};
use crate::render::{PreviewSurface, RenderError};
use crate::session::{self, Effect, Event, Session, SessionError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No history entry with id '{0}'")]
    HistoryEntryNotFound(String),

    #[error("Failed to export QR code: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to render preview: {0}")]
    Render(#[from] RenderError),
}

pub struct App<S: KeyValueStore> {
    session: Session,
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> App<S> {
    /// Start a session, loading history from `store`.
    pub fn new(store: S) -> Self {
        Self::with_history(HistoryStore::initialize(store))
    }

    pub fn with_history(history: HistoryStore<S>) -> Self {
        Self {
            session: Session::new(),
            history,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Run `event` through the reducer and apply its effect.
    ///
    /// Returns the history entry when the event recorded one.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<HistoryEntry>, SessionError> {
        let transition = session::reduce(&self.session, event)?;
        self.session = transition.session;

        let recorded = match transition.effect {
            Some(Effect::Record {
                value,
                template_id,
                caption,
            }) => {
                let entry = self.history.record(&value, &template_id, caption);
                tracing::info!(id = %entry.id, template = %entry.template_id, "QR code generated");
                Some(entry)
            }
            None => None,
        };

        Ok(recorded)
    }

    /// Generate from the current input, recording it in history.
    pub fn generate(&mut self) -> Result<HistoryEntry, AppError> {
        match self.dispatch(Event::Generate)? {
            Some(entry) => Ok(entry),
            // Generate always records on success
            None => Err(AppError::Session(SessionError::EmptyInput)),
        }
    }

    /// Like [`generate`](Self::generate), but first checks that the input
    /// fits in a QR symbol so nothing unexportable is recorded.
    pub fn generate_encodable(&mut self) -> Result<HistoryEntry, AppError> {
        if !self.session.input.trim().is_empty() {
            self.preview()?;
        }
        self.generate()
    }

    /// Copy a history entry back into the session.
    pub fn restore(&mut self, id: &str) -> Result<(), AppError> {
        let entry = self
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::HistoryEntryNotFound(id.to_string()))?;
        self.dispatch(Event::Restore(entry))?;
        Ok(())
    }

    pub fn remove_history(&mut self, id: &str) -> Option<HistoryEntry> {
        self.history.remove(id)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The surface for the current session state.
    pub fn preview(&self) -> Result<PreviewSurface, RenderError> {
        PreviewSurface::new(&self.session.input, self.session.template, &self.session.caption)
    }

    /// Export the current preview with the session's export settings.
    ///
    /// Only one export runs at a time and only once the session is ready.
    pub fn export(&mut self, epoch_millis: i64) -> Result<ExportArtifact, AppError> {
        self.dispatch(Event::ExportStarted)?;

        let settings = self.session.export;
        let result = self
            .preview()
            .map_err(ExportError::from)
            .and_then(|surface| export::export(&surface, &settings, epoch_millis));

        self.dispatch(Event::ExportFinished)?;

        match result {
            Ok(artifact) => {
                tracing::info!(file = %artifact.file_name, "QR code exported");
                Ok(artifact)
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                Err(AppError::Export(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::CaptionStyle;
    use crate::export::{ExportFormat, ExportSettings};
    use crate::history::MemoryStore;
    use crate::session::Phase;

    fn ready_app(value: &str) -> App<MemoryStore> {
        let mut app = App::new(MemoryStore::new());
        app.dispatch(Event::EditInput(value.into())).unwrap();
        app.generate().unwrap();
        app
    }

    #[test]
    fn test_generate_records_history() {
        let app = ready_app("hello");
        assert_eq!(app.session().phase, Phase::Ready);
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history().entries()[0].value, "hello");
    }

    #[test]
    fn test_blank_generate_changes_nothing() {
        let mut app = App::new(MemoryStore::new());
        app.dispatch(Event::EditInput("  ".into())).unwrap();
        assert!(matches!(app.generate(), Err(AppError::Session(SessionError::EmptyInput))));
        assert!(app.history().is_empty());
        assert_eq!(app.session().phase, Phase::Idle);
    }

    #[test]
    fn test_restore_unknown_id() {
        let mut app = ready_app("hello");
        assert!(matches!(app.restore("nope"), Err(AppError::HistoryEntryNotFound(_))));
    }

    #[test]
    fn test_restore_does_not_touch_history() {
        let mut app = ready_app("first");
        app.dispatch(Event::EditInput("second".into())).unwrap();
        app.generate().unwrap();
        let first_id = app.history().entries()[1].id.clone();

        app.restore(&first_id).unwrap();
        assert_eq!(app.session().input, "first");
        let values: Vec<_> = app.history().entries().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["second", "first"]);
    }

    #[test]
    fn test_export_before_generate_is_disabled() {
        let mut app = App::new(MemoryStore::new());
        assert!(matches!(
            app.export(0),
            Err(AppError::Session(SessionError::ExportDisabled))
        ));
    }

    #[test]
    fn test_export_clears_in_flight_flag() {
        let mut app = ready_app("hello");
        app.dispatch(Event::EditExport(ExportSettings::new(ExportFormat::Svg, 512, 512)))
            .unwrap();
        let artifact = app.export(42).unwrap();
        assert_eq!(artifact.file_name, "qr-code-42.svg");
        assert!(app.session().can_export());
    }

    #[test]
    fn test_export_failure_clears_in_flight_flag() {
        let mut app = ready_app(&"x".repeat(4000));
        assert!(matches!(app.export(0), Err(AppError::Export(_))));
        assert!(app.session().can_export());
    }

    #[test]
    fn test_oversized_input_is_not_recorded() {
        let mut app = App::new(MemoryStore::new());
        app.dispatch(Event::EditInput("x".repeat(4000))).unwrap();
        assert!(matches!(app.generate_encodable(), Err(AppError::Render(_))));
        assert!(app.history().is_empty());
        assert_eq!(app.session().phase, Phase::Idle);

        app.dispatch(Event::EditInput("hello".into())).unwrap();
        assert_eq!(app.generate_encodable().unwrap().value, "hello");
    }

    #[test]
    fn test_blank_input_still_reports_empty() {
        let mut app = App::new(MemoryStore::new());
        assert!(matches!(
            app.generate_encodable(),
            Err(AppError::Session(SessionError::EmptyInput))
        ));
    }

    #[test]
    fn test_caption_snapshot_is_recorded() {
        let mut app = App::new(MemoryStore::new());
        app.dispatch(Event::EditCaption(CaptionStyle::new("Scan Me").size(20)))
            .unwrap();
        app.dispatch(Event::EditInput("hello".into())).unwrap();
        let entry = app.generate().unwrap();
        assert_eq!(entry.caption.text, "Scan Me");
        assert_eq!(entry.caption.font_size, 20);
    }
}
