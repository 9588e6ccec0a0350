//! Almanac - packed timeline layouts for dated, entity-tagged events.
//!
//! Reads a table of events, normalizes dates, times and entity lists, and
//! computes two independent geometry tables: a horizontal layout with one
//! lane per entity over a shared, density-packed X axis, and a filterable
//! vertical layout with wrapper columns for ranges and stacks for
//! simultaneous points. The result is exported as a JSON payload for a
//! presentation layer.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use almanac_core::{color, event, geometry, identifier, interval, text};
pub use almanac_ingest as ingest;

pub use error::AlmanacError;

use std::fmt;

use log::{debug, info, trace};
use serde::Serialize;

use almanac_core::{color::EntityPalette, event::TimelineEvent};
use almanac_ingest::{Normalized, RawTable};

use config::AppConfig;
use export::{EventRecord, Exporter, Payload, json::JsonExporter};
use layout::{
    EntityGroups, EntitySelection, HorizontalEngine, HorizontalLayout, VerticalEngine,
    VerticalLayout,
};

/// Which geometry a payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Per-entity lanes over a packed X axis.
    Horizontal,
    /// Wrapper columns and stacks over a packed Y axis.
    Vertical,
    /// Both geometries side by side.
    Combined,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Combined => "combined",
        }
    }

    fn has_horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Combined)
    }

    fn has_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Combined)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for reading and laying out Almanac timelines.
///
/// # Examples
///
/// ```rust
/// use almanac::{TimelineBuilder, View, config::AppConfig, layout::EntitySelection};
///
/// let source = r#"[{
///     "Date": "2024-03-01", "Start time": "09:00", "End time": "11:00",
///     "Certain": "yes", "Entities": "Mayor | Council",
///     "Description": "Session", "Verified": "no"
/// }]"#;
///
/// let builder = TimelineBuilder::new(AppConfig::default());
/// let json = builder
///     .render_json(source, View::Combined, &EntitySelection::All)
///     .expect("Failed to render");
/// assert!(json.contains("\"lanes\""));
/// ```
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    config: AppConfig,
}

impl TimelineBuilder {
    /// Creates a new timeline builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including ingest, layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Reads a JSON table.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::Ingest`] if the text is not a table.
    pub fn parse_table(&self, source: &str) -> Result<RawTable, AlmanacError> {
        info!("Reading table");
        let table = RawTable::from_json(source)?;
        debug!(rows = table.rows().len(), columns = table.columns().len(); "Table read");
        Ok(table)
    }

    /// Normalizes table rows into events.
    ///
    /// Row anomalies are logged and kept as warnings on the result.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::Ingest`] if required columns are missing.
    pub fn normalize(&self, table: &RawTable) -> Result<Normalized, AlmanacError> {
        let normalized = almanac_ingest::normalize(table, self.config.ingest())?;
        info!(
            events = normalized.events().len(),
            untimed = normalized.untimed_count(),
            warnings = normalized.warnings().len();
            "Rows normalized"
        );
        Ok(normalized)
    }

    /// Entity colors for `events`, following the configured strategy.
    pub fn palette(&self, events: &[TimelineEvent]) -> EntityPalette {
        let style = self.config.style();
        EntityPalette::build(
            EntityGroups::from_events(events).entities(),
            style.palette(),
            style.base_hue(),
        )
    }

    /// Computes the horizontal layout.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::EmptyTimeline`] if no event has a start.
    pub fn horizontal(&self, events: &[TimelineEvent]) -> Result<HorizontalLayout, AlmanacError> {
        let engine = HorizontalEngine::new(self.config.layout().horizontal().clone())
            .with_summary_chars(self.config.style().truncation().horizontal());
        engine.layout(events, &self.palette(events))
    }

    /// Computes the vertical layout for `selection`.
    ///
    /// An empty selection is not an error; it yields an empty layout.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::EmptyTimeline`] if no event at all has a start.
    pub fn vertical(
        &self,
        events: &[TimelineEvent],
        selection: &EntitySelection,
    ) -> Result<VerticalLayout, AlmanacError> {
        if events.iter().all(|event| event.start().is_none()) {
            return Err(AlmanacError::EmptyTimeline {
                events: events.len(),
            });
        }
        let engine = VerticalEngine::new(self.config.layout().vertical().clone());
        Ok(engine.layout(events, selection))
    }

    /// Bundles events, the entity catalogue and the geometry `view` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::EmptyTimeline`] if no event has a start.
    pub fn payload(
        &self,
        events: &[TimelineEvent],
        view: View,
        selection: &EntitySelection,
    ) -> Result<Payload, AlmanacError> {
        let palette = self.palette(events);
        let entities = EntityGroups::from_events(events).catalogue(&palette);
        let short_chars = self.config.style().truncation().vertical();
        let records = events
            .iter()
            .map(|event| EventRecord::from_event(event, short_chars))
            .collect();

        let mut payload = Payload::new(view, entities, records);
        if view.has_horizontal() {
            payload = payload.with_horizontal(self.horizontal(events)?);
        }
        if view.has_vertical() {
            payload = payload.with_vertical(self.vertical(events, selection)?);
        }
        trace!(view:% = view, entities = payload.entities().len(); "Payload assembled");
        Ok(payload)
    }

    /// Reads `source`, lays it out and returns the pretty-printed payload.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError`] for unreadable input, missing columns, an
    /// empty timeline or an export failure.
    pub fn render_json(
        &self,
        source: &str,
        view: View,
        selection: &EntitySelection,
    ) -> Result<String, AlmanacError> {
        let table = self.parse_table(source)?;
        let normalized = self.normalize(&table)?;
        let payload = self.payload(normalized.events(), view, selection)?;

        let mut exporter = JsonExporter::new(Vec::new()).with_embeddable(true);
        exporter.export_payload(&payload)?;
        let json = String::from_utf8(exporter.into_inner())
            .map_err(|err| AlmanacError::Export(Box::new(err)))?;

        info!(view:% = view, bytes = json.len(); "Payload rendered");
        Ok(json)
    }
}
