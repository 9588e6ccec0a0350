//! Export of laid-out timelines.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`Payload`] to an output format. It is the final stage in the
//! Almanac pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! RawTable
//!     ↓ normalize
//! Timeline events
//!     ↓ layout
//! Geometry tables
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`json`] - JSON output via [`json::JsonExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering serialization failures and
//! I/O errors. [`Error`] converts into [`AlmanacError::Export`] at the crate
//! boundary.
//!
//! [`AlmanacError::Export`]: crate::AlmanacError::Export

/// JSON export backend.
pub mod json;

use serde::Serialize;

use almanac_core::{
    event::{EventId, SourceRef, TimelineEvent},
    identifier::Id,
    text::{date_label, time_label, truncate},
};

use crate::{
    View,
    layout::{EntityEntry, HorizontalLayout, VerticalLayout},
};

/// Abstraction for payload export backends.
pub trait Exporter {
    /// Writes `payload` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the payload cannot be encoded, or
    /// [`Error::Io`] if writing the output fails.
    fn export_payload(&mut self, payload: &Payload) -> Result<(), Error>;
}

/// Errors that can occur during export.
///
/// This type is converted into [`AlmanacError::Export`] at the crate
/// boundary via its [`From`] implementation.
///
/// [`AlmanacError::Export`]: crate::AlmanacError::Export
#[derive(Debug)]
pub enum Error {
    /// The payload could not be encoded.
    Serialize(serde_json::Error),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "Serialization error: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Everything a presentation layer needs to draw a timeline and re-run the
/// vertical layout client-side after a filter change.
#[derive(Debug, Clone, Serialize)]
pub struct Payload {
    view: View,
    entities: Vec<EntityEntry>,
    events: Vec<EventRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    horizontal: Option<HorizontalLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vertical: Option<VerticalLayout>,
}

impl Payload {
    /// Creates a payload with no geometry attached.
    pub fn new(view: View, entities: Vec<EntityEntry>, events: Vec<EventRecord>) -> Self {
        Self {
            view,
            entities,
            events,
            horizontal: None,
            vertical: None,
        }
    }

    pub fn with_horizontal(mut self, layout: HorizontalLayout) -> Self {
        self.horizontal = Some(layout);
        self
    }

    pub fn with_vertical(mut self, layout: VerticalLayout) -> Self {
        self.vertical = Some(layout);
        self
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn entities(&self) -> &[EntityEntry] {
        &self.entities
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn horizontal(&self) -> Option<&HorizontalLayout> {
        self.horizontal.as_ref()
    }

    pub fn vertical(&self) -> Option<&VerticalLayout> {
        self.vertical.as_ref()
    }
}

/// One event as handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    id: EventId,
    entities: Vec<Id>,
    date_label: String,
    time_label: String,
    /// Start in milliseconds since the Unix epoch, read as UTC.
    start_ms: Option<i64>,
    /// End in milliseconds; equals `start_ms` for point events.
    end_ms: Option<i64>,
    is_range: bool,
    certain: bool,
    verified: bool,
    description: String,
    short_description: String,
    sources: Vec<SourceRef>,
}

impl EventRecord {
    /// Builds the record for `event`, truncating the short description to
    /// `short_chars` characters.
    pub fn from_event(event: &TimelineEvent, short_chars: usize) -> Self {
        let start_ms = event
            .start()
            .map(|start| start.and_utc().timestamp_millis());
        let end_ms = event
            .effective_end()
            .map(|end| end.and_utc().timestamp_millis());
        Self {
            id: event.id(),
            entities: event.entities().to_vec(),
            date_label: date_label(event),
            time_label: time_label(event),
            start_ms,
            end_ms,
            is_range: event.is_range(),
            certain: event.is_certain(),
            verified: event.is_verified(),
            description: event.description().to_string(),
            short_description: truncate(event.description(), short_chars, "…"),
            sources: event.sources().to_vec(),
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn start_ms(&self) -> Option<i64> {
        self.start_ms
    }

    pub fn end_ms(&self) -> Option<i64> {
        self.end_ms
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }
}
