//! Entity selection for filtered re-layout.

use std::collections::HashSet;

use almanac_core::{event::TimelineEvent, identifier::Id};

/// The set of entities a view shows.
///
/// An event is visible when at least one of its entities is selected.
///
/// # Examples
///
/// ```
/// use almanac::{identifier::Id, layout::EntitySelection};
///
/// let selection = EntitySelection::only([Id::new("Harbour")]);
/// assert!(selection.contains(Id::new("Harbour")));
/// assert!(!selection.contains(Id::new("Ferry")));
/// assert!(EntitySelection::All.contains(Id::new("Ferry")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntitySelection {
    #[default]
    All,
    Only(HashSet<Id>),
}

impl EntitySelection {
    /// Selects exactly the given entities. An empty iterator selects nothing.
    pub fn only<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        Self::Only(entities.into_iter().collect())
    }

    pub fn contains(&self, entity: Id) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.contains(&entity),
        }
    }

    /// Returns `true` if any of the event's entities is selected.
    pub fn admits(&self, event: &TimelineEvent) -> bool {
        event.entities().iter().any(|entity| self.contains(*entity))
    }

    /// The admitted events, in input order.
    pub fn filter<'a>(&self, events: &'a [TimelineEvent]) -> Vec<&'a TimelineEvent> {
        events.iter().filter(|event| self.admits(event)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::event::EventId;

    fn tagged(id: usize, entities: &[&str]) -> TimelineEvent {
        TimelineEvent::new(EventId::new(id), None)
            .with_entities(entities.iter().map(|name| Id::new(name)))
    }

    #[test]
    fn test_any_entity_admits() {
        let event = tagged(0, &["Port", "Customs"]);
        assert!(EntitySelection::only([Id::new("Customs")]).admits(&event));
        assert!(!EntitySelection::only([Id::new("Police")]).admits(&event));
    }

    #[test]
    fn test_empty_selection_admits_nothing() {
        let events = vec![tagged(0, &["Port"]), tagged(1, &["Customs"])];
        assert!(EntitySelection::only([]).filter(&events).is_empty());
    }

    #[test]
    fn test_filter_keeps_order() {
        let events = vec![
            tagged(0, &["Port"]),
            tagged(1, &["Customs"]),
            tagged(2, &["Port"]),
        ];
        let ids: Vec<usize> = EntitySelection::only([Id::new("Port")])
            .filter(&events)
            .iter()
            .map(|event| event.id().ordinal())
            .collect();
        assert_eq!(ids, vec![0, 2]);
    }
}
