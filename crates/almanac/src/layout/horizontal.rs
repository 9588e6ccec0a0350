//! Horizontal packing layout.
//!
//! Every timed event gets its own slot on one X axis shared by all entity
//! lanes. Slots are ordered by start (ranges before points at equal start,
//! then id) and packed left to right by estimated card width, so idle time
//! costs no space. A range is widened to the right edge of the furthest slot
//! it temporally contains.
//!
//! Each entity with at least one timed event then gets a lane. Lanes are
//! ordered by case-insensitive entity name, so row order never moves them.
//! Inside a lane, events are stacked into
//! subrows by first-fit: an event goes into the earliest-created subrow whose
//! last event it does not overlap, or opens a new subrow. First-fit does not
//! minimise the subrow count; it keeps placement stable and predictable.

use std::collections::HashMap;

use log::{debug, info, trace};
use serde::Serialize;

use almanac_core::{
    color::{EntityColor, EntityPalette},
    event::{EventId, Instant, TimelineEvent},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    text::{card_text, truncate},
};

use crate::{
    AlmanacError,
    config::HorizontalConfig,
    layout::{
        grouping::EntityGroups,
        slots::{cumulative_offsets, span_slot},
    },
};

/// One slot of the packed axis, before range widening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotColumn {
    event: EventId,
    x: f32,
    width: f32,
}

impl SlotColumn {
    pub fn event(&self) -> EventId {
        self.event
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// Estimated card width of the slot's event.
    pub fn width(&self) -> f32 {
        self.width
    }
}

/// Final horizontal geometry of one event, shared by every lane it appears in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    event: EventId,
    slot: usize,
    /// Furthest slot covered by the card; equals `slot` for points.
    span_slot: usize,
    x: f32,
    width: f32,
    is_range: bool,
    /// Truncated description for the card body.
    summary: String,
}

impl Card {
    pub fn event(&self) -> EventId {
        self.event
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn span_slot(&self) -> usize {
        self.span_slot
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Right edge of the card.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn is_range(&self) -> bool {
        self.is_range
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// A card placed in a lane subrow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    event: EventId,
    subrow: usize,
    #[serde(flatten)]
    bounds: Bounds,
}

impl Placement {
    pub fn event(&self) -> EventId {
        self.event
    }

    pub fn subrow(&self) -> usize {
        self.subrow
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// One entity's lane: a header followed by subrows of non-overlapping cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    entity: Id,
    color: EntityColor,
    y: f32,
    height: f32,
    /// Cards per subrow, ordered by x.
    subrows: Vec<Vec<Placement>>,
}

impl Lane {
    pub fn entity(&self) -> Id {
        self.entity
    }

    pub fn color(&self) -> EntityColor {
        self.color
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn subrows(&self) -> &[Vec<Placement>] {
        &self.subrows
    }

    /// The subrow holding `event` in this lane.
    pub fn subrow_of(&self, event: EventId) -> Option<usize> {
        self.subrows
            .iter()
            .position(|subrow| subrow.iter().any(|placement| placement.event == event))
    }
}

/// The complete horizontal geometry table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalLayout {
    slots: Vec<SlotColumn>,
    /// Cards in slot order.
    cards: Vec<Card>,
    lanes: Vec<Lane>,
    width: f32,
    height: f32,
    #[serde(skip)]
    card_index: HashMap<EventId, usize>,
}

impl HorizontalLayout {
    pub fn slots(&self) -> &[SlotColumn] {
        &self.slots
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card for `event`, if the event is timed.
    pub fn card(&self, event: EventId) -> Option<&Card> {
        self.card_index.get(&event).map(|index| &self.cards[*index])
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, entity: Id) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.entity == entity)
    }

    /// Right edge of the last slot.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Bottom edge of the last lane.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Computes [`HorizontalLayout`]s.
#[derive(Debug, Clone)]
pub struct HorizontalEngine {
    config: HorizontalConfig,
    summary_chars: usize,
}

impl Default for HorizontalEngine {
    fn default() -> Self {
        Self::new(HorizontalConfig::default())
    }
}

impl HorizontalEngine {
    pub fn new(config: HorizontalConfig) -> Self {
        Self {
            config,
            summary_chars: 120,
        }
    }

    /// Sets the card body length, in characters.
    pub fn with_summary_chars(mut self, summary_chars: usize) -> Self {
        self.summary_chars = summary_chars;
        self
    }

    /// Lays out `events`.
    ///
    /// Events without a start are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AlmanacError::EmptyTimeline`] if no event has a start.
    pub fn layout(
        &self,
        events: &[TimelineEvent],
        palette: &EntityPalette,
    ) -> Result<HorizontalLayout, AlmanacError> {
        let mut timed: Vec<(&TimelineEvent, Instant)> = events
            .iter()
            .filter_map(|event| event.start().map(|start| (event, start)))
            .collect();
        if timed.is_empty() {
            return Err(AlmanacError::EmptyTimeline {
                events: events.len(),
            });
        }
        timed.sort_by(|(a, _), (b, _)| a.chronological_cmp(b));

        let starts: Vec<Instant> = timed.iter().map(|(_, start)| *start).collect();
        let widths: Vec<f32> = timed
            .iter()
            .map(|(event, _)| self.config.width().width_for(&card_text(event)))
            .collect();
        let offsets = cumulative_offsets(&widths, self.config.gap());
        debug!(slots = timed.len(); "Horizontal slots assigned");

        let slots: Vec<SlotColumn> = timed
            .iter()
            .zip(offsets.iter().zip(&widths))
            .map(|((event, _), (x, width))| SlotColumn {
                event: event.id(),
                x: *x,
                width: *width,
            })
            .collect();

        let cards: Vec<Card> = timed
            .iter()
            .enumerate()
            .map(|(slot, (event, _))| {
                let (span, width) = match event.end() {
                    Some(end) if event.is_range() => {
                        let span = span_slot(&starts, slot, end);
                        let right_edge = offsets[span] + widths[span];
                        (span, widths[slot].max(right_edge - offsets[slot]))
                    }
                    _ => (slot, widths[slot]),
                };
                Card {
                    event: event.id(),
                    slot,
                    span_slot: span,
                    x: offsets[slot],
                    width,
                    is_range: event.is_range(),
                    summary: truncate(event.description(), self.summary_chars, "..."),
                }
            })
            .collect();
        let card_index: HashMap<EventId, usize> = cards
            .iter()
            .enumerate()
            .map(|(index, card)| (card.event, index))
            .collect();

        let lanes = self.build_lanes(events, palette, &cards, &card_index);

        let width = offsets.last().zip(widths.last()).map_or(0.0, |(x, w)| x + w);
        let height = lanes.last().map_or(0.0, |lane| lane.y + lane.height);

        info!(
            slots = slots.len(),
            lanes = lanes.len(),
            width = width,
            height = height;
            "Horizontal layout computed"
        );

        Ok(HorizontalLayout {
            slots,
            cards,
            lanes,
            width,
            height,
            card_index,
        })
    }

    fn build_lanes(
        &self,
        events: &[TimelineEvent],
        palette: &EntityPalette,
        cards: &[Card],
        card_index: &HashMap<EventId, usize>,
    ) -> Vec<Lane> {
        let groups =
            EntityGroups::from_events(events.iter().filter(|event| event.start().is_some()));
        let mut stacked: Vec<(Id, Vec<Vec<&TimelineEvent>>)> = groups
            .iter()
            .map(|(entity, group)| (entity, stack_subrows(group)))
            .collect();
        stacked.sort_by_cached_key(|(entity, _)| (entity.sort_key(), entity.name()));

        let pitch = self.config.subrow_height() + self.config.subrow_gap();
        let heights: Vec<f32> = stacked
            .iter()
            .map(|(_, subrows)| self.config.lane_header() + subrows.len() as f32 * pitch)
            .collect();
        let lane_offsets = cumulative_offsets(&heights, self.config.lane_gap());

        stacked
            .into_iter()
            .zip(lane_offsets.into_iter().zip(heights))
            .map(|((entity, subrows), (y, height))| {
                debug!(entity:% = entity, subrows = subrows.len(); "Lane stacked");
                let subrows: Vec<Vec<Placement>> = subrows
                    .into_iter()
                    .enumerate()
                    .map(|(subrow, members)| {
                        let top = y + self.config.lane_header() + subrow as f32 * pitch;
                        members
                            .into_iter()
                            .filter_map(|event| card_index.get(&event.id()).map(|i| &cards[*i]))
                            .map(|card| {
                                trace!(event = card.event.ordinal(), subrow = subrow; "Card placed");
                                Placement {
                                    event: card.event,
                                    subrow,
                                    bounds: Bounds::new_from_top_left(
                                        Point::new(card.x, top),
                                        Size::new(card.width, self.config.card_height()),
                                    ),
                                }
                            })
                            .collect()
                    })
                    .collect();
                Lane {
                    entity,
                    color: palette.color(entity),
                    y,
                    height,
                    subrows,
                }
            })
            .collect()
    }
}

/// First-fit subrow stacking of one entity's events.
///
/// Untimed events are skipped. Events are visited in timeline order, so every
/// subrow is ordered by start and its last event has the latest end; checking
/// only that last event is enough to keep the whole subrow overlap-free.
pub(crate) fn stack_subrows<'a>(events: &[&'a TimelineEvent]) -> Vec<Vec<&'a TimelineEvent>> {
    let mut ordered: Vec<&'a TimelineEvent> = events
        .iter()
        .copied()
        .filter(|event| event.start().is_some())
        .collect();
    ordered.sort_by(|a, b| a.chronological_cmp(b));

    let mut subrows: Vec<Vec<&'a TimelineEvent>> = Vec::new();
    for event in ordered {
        let fit = subrows.iter_mut().find(|subrow| {
            subrow
                .last()
                .is_none_or(|last| !last.overlaps(event))
        });
        match fit {
            Some(subrow) => subrow.push(event),
            None => subrows.push(vec![event]),
        }
    }
    subrows
}
