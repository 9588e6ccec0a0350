//! The timeline event model.
//!
//! A [`TimelineEvent`] is created once per source row and never mutated
//! afterwards. Layout engines hold events by reference, so an event shared by
//! several entities keeps a single identity across every lane it appears in.

use std::{cmp::Ordering, fmt};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::identifier::Id;

/// A point in time on the timeline. Source data carries no time zone.
pub type Instant = NaiveDateTime;

/// Entity name used when a row names no entity at all.
pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Stable event identifier: the ordinal of the source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(usize);

impl EventId {
    /// Creates an id from a zero-based row ordinal.
    pub fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    /// Returns the zero-based row ordinal.
    pub fn ordinal(self) -> usize {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A citation attached to an event.
///
/// Web addresses become [`SourceRef::Link`] so the presentation layer can
/// open them; everything else is an opaque [`SourceRef::Label`] meant to be
/// copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRef {
    /// A web address. `href` is normalized to carry a scheme.
    Link { text: String, href: String },
    /// Any other citation text.
    Label { text: String },
}

impl SourceRef {
    /// Classifies a citation string.
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac_core::event::SourceRef;
    ///
    /// let link = SourceRef::classify("www.example.org/report");
    /// assert_eq!(link.href(), Some("https://www.example.org/report"));
    ///
    /// let label = SourceRef::classify("Minutes 2023-04, p. 12");
    /// assert!(!label.is_link());
    /// ```
    pub fn classify(text: &str) -> Self {
        let text = text.trim();
        let lower = text.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Link {
                text: text.to_string(),
                href: text.to_string(),
            }
        } else if lower.starts_with("www.") {
            Self::Link {
                text: text.to_string(),
                href: format!("https://{text}"),
            }
        } else {
            Self::Label {
                text: text.to_string(),
            }
        }
    }

    /// The citation text as written in the source.
    pub fn text(&self) -> &str {
        match self {
            Self::Link { text, .. } | Self::Label { text } => text,
        }
    }

    /// The link target, for web links.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Link { href, .. } => Some(href),
            Self::Label { .. } => None,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }
}

/// One dated, entity-tagged event.
///
/// Built with [`TimelineEvent::new`] and the `with_*` methods; read-only
/// afterwards.
///
/// # Invariants
///
/// - `entities` is never empty and holds no duplicates.
/// - `end` is only present when `start` is present and `end` is after it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    id: EventId,
    description: String,
    entities: Vec<Id>,
    start: Option<Instant>,
    end: Option<Instant>,
    certain: bool,
    verified: bool,
    sources: Vec<SourceRef>,
}

impl TimelineEvent {
    /// Creates an event with the given id and start, attached to the
    /// [`UNKNOWN_ENTITY`] until entities are supplied.
    pub fn new(id: EventId, start: Option<Instant>) -> Self {
        Self {
            id,
            description: String::new(),
            entities: vec![Id::new(UNKNOWN_ENTITY)],
            start,
            end: None,
            certain: false,
            verified: false,
            sources: Vec::new(),
        }
    }

    /// Sets the end instant.
    ///
    /// Ignored when the event has no start or when `end` is not after the start.
    pub fn with_end(mut self, end: Option<Instant>) -> Self {
        self.end = match (self.start, end) {
            (Some(start), Some(end)) if end > start => Some(end),
            _ => None,
        };
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the entities, dropping duplicates while keeping first-seen order.
    ///
    /// An empty iterator leaves the current entities untouched.
    pub fn with_entities<I>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        let mut unique: Vec<Id> = Vec::new();
        for entity in entities {
            if !unique.contains(&entity) {
                unique.push(entity);
            }
        }
        if !unique.is_empty() {
            self.entities = unique;
        }
        self
    }

    pub fn with_certain(mut self, certain: bool) -> Self {
        self.certain = certain;
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entities(&self) -> &[Id] {
        &self.entities
    }

    pub fn start(&self) -> Option<Instant> {
        self.start
    }

    pub fn end(&self) -> Option<Instant> {
        self.end
    }

    pub fn is_certain(&self) -> bool {
        self.certain
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn sources(&self) -> &[SourceRef] {
        &self.sources
    }

    /// Timeline order: by start, ranges before points at equal start, then id.
    ///
    /// Events without a start sort last.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        let key = |event: &Self| (event.start.is_none(), event.start, !event.is_range(), event.id);
        key(self).cmp(&key(other))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32) -> Instant {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_event_defaults_to_unknown_entity() {
        let event = TimelineEvent::new(EventId::new(0), Some(at(1, 9)));
        assert_eq!(event.entities(), &[Id::new(UNKNOWN_ENTITY)]);
        assert!(!event.is_certain());
        assert!(!event.is_verified());
        assert!(event.sources().is_empty());
    }

    #[test]
    fn test_with_end_requires_start() {
        let event = TimelineEvent::new(EventId::new(0), None).with_end(Some(at(1, 9)));
        assert_eq!(event.end(), None);
    }

    #[test]
    fn test_with_end_drops_equal_end() {
        let event = TimelineEvent::new(EventId::new(0), Some(at(1, 9))).with_end(Some(at(1, 9)));
        assert_eq!(event.end(), None);
    }

    #[test]
    fn test_with_end_drops_earlier_end() {
        let event = TimelineEvent::new(EventId::new(0), Some(at(2, 9))).with_end(Some(at(1, 9)));
        assert_eq!(event.end(), None);
    }

    #[test]
    fn test_with_entities_deduplicates() {
        let event = TimelineEvent::new(EventId::new(0), None).with_entities([
            Id::new("Mayor"),
            Id::new("Council"),
            Id::new("Mayor"),
        ]);
        assert_eq!(event.entities(), &[Id::new("Mayor"), Id::new("Council")]);
    }

    #[test]
    fn test_with_empty_entities_keeps_default() {
        let event = TimelineEvent::new(EventId::new(0), None).with_entities(Vec::new());
        assert_eq!(event.entities().len(), 1);
    }

    #[test]
    fn test_chronological_order_ranges_first() {
        let point = TimelineEvent::new(EventId::new(0), Some(at(1, 9)));
        let range = TimelineEvent::new(EventId::new(1), Some(at(1, 9))).with_end(Some(at(1, 11)));
        assert_eq!(range.chronological_cmp(&point), Ordering::Less);
    }

    #[test]
    fn test_chronological_order_untimed_last() {
        let untimed = TimelineEvent::new(EventId::new(0), None);
        let timed = TimelineEvent::new(EventId::new(5), Some(at(30, 23)));
        assert_eq!(untimed.chronological_cmp(&timed), Ordering::Greater);
    }

    #[test]
    fn test_source_classification() {
        assert!(SourceRef::classify("HTTPS://Example.org").is_link());
        assert_eq!(
            SourceRef::classify("http://a.b").href(),
            Some("http://a.b")
        );
        let label = SourceRef::classify("  Archive box 7 ");
        assert_eq!(label.text(), "Archive box 7");
        assert_eq!(label.href(), None);
    }
}
