//! Entity grouping.
//!
//! Partitions events by entity without copying them: each group holds
//! references into the normalized event slice, so an event tagged with
//! several entities is the same value in every group.

use indexmap::IndexMap;
use serde::Serialize;

use almanac_core::{
    color::{EntityColor, EntityPalette},
    event::TimelineEvent,
    identifier::Id,
};

/// Events per entity, with entities in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EntityGroups<'a> {
    groups: IndexMap<Id, Vec<&'a TimelineEvent>>,
}

impl<'a> EntityGroups<'a> {
    /// Groups `events`. Events keep their input order inside each group.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a TimelineEvent>,
    {
        let mut groups: IndexMap<Id, Vec<&'a TimelineEvent>> = IndexMap::new();
        for event in events {
            for entity in event.entities() {
                groups.entry(*entity).or_default().push(event);
            }
        }
        Self { groups }
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = Id> + '_ {
        self.groups.keys().copied()
    }

    /// Events tagged with `entity`; empty for unknown entities.
    pub fn events(&self, entity: Id) -> &[&'a TimelineEvent] {
        self.groups
            .get(&entity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, &[&'a TimelineEvent])> + '_ {
        self.groups
            .iter()
            .map(|(entity, events)| (*entity, events.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every entity in case-insensitive name order with its color and event count.
    pub fn catalogue(&self, palette: &EntityPalette) -> Vec<EntityEntry> {
        let mut entries: Vec<EntityEntry> = self
            .iter()
            .map(|(entity, events)| EntityEntry {
                name: entity,
                color: palette.color(entity),
                hex: palette.color(entity).to_hex(),
                events: events.len(),
            })
            .collect();
        entries.sort_by_cached_key(|entry| (entry.name.sort_key(), entry.name.name()));
        entries
    }
}

/// One row of the entity catalogue, as offered to a filter control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityEntry {
    name: Id,
    color: EntityColor,
    hex: String,
    /// Events mentioning this entity, timed or not.
    events: usize,
}

impl EntityEntry {
    pub fn name(&self) -> Id {
        self.name
    }

    pub fn color(&self) -> EntityColor {
        self.color
    }

    pub fn events(&self) -> usize {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use almanac_core::{color::PaletteStrategy, event::EventId};

    use super::*;

    fn tagged(id: usize, entities: &[&str]) -> TimelineEvent {
        TimelineEvent::new(EventId::new(id), None)
            .with_entities(entities.iter().map(|name| Id::new(name)))
    }

    #[test]
    fn test_shared_event_is_same_reference() {
        let events = vec![tagged(0, &["Port", "Customs"])];
        let groups = EntityGroups::from_events(&events);

        let port = groups.events(Id::new("Port"))[0];
        let customs = groups.events(Id::new("Customs"))[0];
        assert!(std::ptr::eq(port, customs));
    }

    #[test]
    fn test_first_seen_entity_order() {
        let events = vec![tagged(0, &["zeta"]), tagged(1, &["Alpha", "zeta"])];
        let groups = EntityGroups::from_events(&events);

        let order: Vec<Id> = groups.entities().collect();
        assert_eq!(order, vec![Id::new("zeta"), Id::new("Alpha")]);
        assert_eq!(groups.events(Id::new("zeta")).len(), 2);
        assert!(groups.events(Id::new("missing")).is_empty());
    }

    #[test]
    fn test_catalogue_sorted_case_insensitively() {
        let events = vec![
            tagged(0, &["zeta"]),
            tagged(1, &["Alpha", "zeta"]),
            tagged(2, &["beta"]),
        ];
        let groups = EntityGroups::from_events(&events);
        let palette = EntityPalette::build(groups.entities(), PaletteStrategy::GoldenAngle, 24.0);

        let catalogue = groups.catalogue(&palette);

        let names: Vec<String> = catalogue.iter().map(|entry| entry.name().name()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(catalogue[2].events(), 2);
        assert_eq!(catalogue[0].color().hue(), 24);
    }
}
