//! # Session State
//!
//! The controller's state as one immutable value, advanced by a pure
//! reducer. Each event yields a new [`Session`] and, for generation, an
//! [`Effect`] for the caller to carry out.
//!
//! ## Phases
//!
//! ```text
//!          Generate (non-empty) / Restore
//!   Idle ─────────────────────────────────▶ Ready
//!                                            │ ▲
//!                                            └─┘ edits, Generate, Restore
//! ```
//!
//! There is no way back to `Idle` short of starting a new session.
//! Exports are only accepted in `Ready`, one at a time.

use thiserror::Error;

use crate::caption::CaptionStyle;
use crate::export::ExportSettings;
use crate::history::HistoryEntry;
use crate::template::{self, Template};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Ready,
}

/// Rejected events. None of them change the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please enter a URL or text")]
    EmptyInput,

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("Generate a QR code before exporting")]
    ExportDisabled,

    #[error("An export is already in progress")]
    ExportInProgress,
}

/// User-triggered events.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EditInput(String),
    SelectTemplate(String),
    EditCaption(CaptionStyle),
    EditExport(ExportSettings),
    Generate,
    Restore(HistoryEntry),
    ExportStarted,
    ExportFinished,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add a history entry.
    Record {
        value: String,
        template_id: String,
        caption: CaptionStyle,
    },
}

/// Result of a successful [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(session: Session) -> Self {
        Self { session, effect: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub input: String,
    pub template: &'static Template,
    pub caption: CaptionStyle,
    pub export: ExportSettings,
    pub phase: Phase,
    pub export_in_flight: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            input: String::new(),
            template: template::default_template(),
            caption: CaptionStyle::default(),
            export: ExportSettings::default(),
            phase: Phase::Idle,
            export_in_flight: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Whether an export may start right now.
    pub fn can_export(&self) -> bool {
        self.is_ready() && !self.export_in_flight
    }
}

/// Apply `event` to `session`.
pub fn reduce(session: &Session, event: Event) -> Result<Transition, SessionError> {
    match event {
        Event::EditInput(input) => Ok(Transition::to(Session {
            input,
            ..session.clone()
        })),

        Event::SelectTemplate(id) => {
            let template = template::by_id(&id).ok_or(SessionError::UnknownTemplate(id))?;
            Ok(Transition::to(Session {
                template,
                ..session.clone()
            }))
        }

        Event::EditCaption(caption) => Ok(Transition::to(Session {
            caption: caption.sanitized(),
            ..session.clone()
        })),

        Event::EditExport(settings) => Ok(Transition::to(Session {
            // Re-clamp in case the value was built by hand
            export: ExportSettings::new(settings.format, settings.width, settings.height),
            ..session.clone()
        })),

        Event::Generate => {
            if session.input.trim().is_empty() {
                return Err(SessionError::EmptyInput);
            }
            Ok(Transition {
                effect: Some(Effect::Record {
                    value: session.input.clone(),
                    template_id: session.template.id.to_string(),
                    caption: session.caption.clone(),
                }),
                session: Session {
                    phase: Phase::Ready,
                    ..session.clone()
                },
            })
        }

        Event::Restore(entry) => {
            // A template id that no longer resolves keeps the current one
            let template = template::by_id(&entry.template_id).unwrap_or(session.template);
            Ok(Transition::to(Session {
                input: entry.value,
                template,
                caption: entry.caption.sanitized(),
                phase: Phase::Ready,
                ..session.clone()
            }))
        }

        Event::ExportStarted => {
            if !session.is_ready() {
                return Err(SessionError::ExportDisabled);
            }
            if session.export_in_flight {
                return Err(SessionError::ExportInProgress);
            }
            Ok(Transition::to(Session {
                export_in_flight: true,
                ..session.clone()
            }))
        }

        Event::ExportFinished => Ok(Transition::to(Session {
            export_in_flight: false,
            ..session.clone()
        })),
    }
}
