//! Vertical packing layout.
//!
//! Slots are the distinct start instants of the visible events, so every
//! event sharing a start shares a row. Point events at one instant collapse
//! into a single stack block whose height drives the row height. Ranges live
//! in wrapper columns to the left of the stacks; columns are assigned by
//! greedy interval-graph coloring, which opens exactly as many columns as
//! there are ranges open at the busiest instant.
//!
//! ```text
//! x = 0                         wrapper area + gap
//! ┌──────────┐ ┌──────────┐     ┌────────────────────────────┐
//! │ range c0 │ │ range c1 │     │ stack: points at slot 0    │  row 0
//! │          │ └──────────┘     └────────────────────────────┘
//! │          │                  ┌────────────────────────────┐
//! └──────────┘                  │ stack: points at slot 1    │  row 1
//!                               └────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use log::{debug, info};
use serde::Serialize;

use almanac_core::{
    event::{EventId, Instant, TimelineEvent},
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::VerticalConfig,
    layout::{
        selection::EntitySelection,
        slots::{cumulative_offsets, span_slot},
    },
};

/// One slot row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    slot: usize,
    instant: Instant,
    y_start: f32,
    y_end: f32,
    height: f32,
}

impl Row {
    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn y_start(&self) -> f32 {
        self.y_start
    }

    pub fn y_end(&self) -> f32 {
        self.y_end
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// A ranged event placed in a wrapper column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBlock {
    event: EventId,
    column: usize,
    slot: usize,
    span_slot: usize,
    #[serde(flatten)]
    bounds: Bounds,
}

impl RangeBlock {
    pub fn event(&self) -> EventId {
        self.event
    }

    /// Wrapper column index.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn span_slot(&self) -> usize {
        self.span_slot
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// All point events sharing one start instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackBlock {
    instant: Instant,
    slot: usize,
    /// Member events, ordered by id.
    members: Vec<EventId>,
    #[serde(flatten)]
    bounds: Bounds,
}

impl StackBlock {
    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn members(&self) -> &[EventId] {
        &self.members
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// The complete vertical geometry table for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerticalLayout {
    rows: Vec<Row>,
    ranges: Vec<RangeBlock>,
    stacks: Vec<StackBlock>,
    /// Wrapper columns used for area sizing; at least 1.
    columns: usize,
    wrapper_area: f32,
    height: f32,
}

impl VerticalLayout {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Range blocks in `(start, end, id)` order.
    pub fn ranges(&self) -> &[RangeBlock] {
        &self.ranges
    }

    pub fn range(&self, event: EventId) -> Option<&RangeBlock> {
        self.ranges.iter().find(|block| block.event == event)
    }

    /// Stack blocks in slot order.
    pub fn stacks(&self) -> &[StackBlock] {
        &self.stacks
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn wrapper_area(&self) -> f32 {
        self.wrapper_area
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes [`VerticalLayout`]s.
#[derive(Debug, Clone, Default)]
pub struct VerticalEngine {
    config: VerticalConfig,
}

impl VerticalEngine {
    pub fn new(config: VerticalConfig) -> Self {
        Self { config }
    }

    /// Lays out the events admitted by `selection`.
    ///
    /// Every call recomputes slots, columns and stacks from the filtered
    /// events alone. Events without a start are skipped. Nothing visible
    /// yields an empty layout.
    pub fn layout(&self, events: &[TimelineEvent], selection: &EntitySelection) -> VerticalLayout {
        let visible: Vec<(&TimelineEvent, Instant)> = selection
            .filter(events)
            .into_iter()
            .filter_map(|event| event.start().map(|start| (event, start)))
            .collect();
        if visible.is_empty() {
            debug!(events = events.len(); "No visible timed events");
            return VerticalLayout::default();
        }

        let mut instants: Vec<Instant> = visible.iter().map(|(_, start)| *start).collect();
        instants.sort();
        instants.dedup();

        let mut ranges: Vec<&TimelineEvent> = Vec::new();
        let mut points: BTreeMap<usize, Vec<EventId>> = BTreeMap::new();
        for (event, start) in &visible {
            if event.is_range() {
                ranges.push(*event);
            } else {
                points
                    .entry(slot_of(&instants, *start))
                    .or_default()
                    .push(event.id());
            }
        }
        ranges.sort_by_key(|event| (event.start(), event.end(), event.id()));
        for members in points.values_mut() {
            members.sort();
        }

        let heights: Vec<f32> = (0..instants.len())
            .map(|slot| {
                let stacked = points
                    .get(&slot)
                    .map_or(0.0, |members| self.config.stack_height(members.len()));
                self.config.row_height().max(stacked)
            })
            .collect();
        let offsets = cumulative_offsets(&heights, self.config.row_gap());
        let rows: Vec<Row> = instants
            .iter()
            .zip(offsets.iter().zip(&heights))
            .enumerate()
            .map(|(slot, (instant, (y_start, height)))| Row {
                slot,
                instant: *instant,
                y_start: *y_start,
                y_end: y_start + height,
                height: *height,
            })
            .collect();

        let assignment = color_intervals(&ranges);
        let columns = assignment.iter().max().map_or(0, |last| last + 1);
        let area_columns = columns.max(1) as f32;
        let wrapper_area = area_columns * self.config.wrapper_width()
            + (area_columns - 1.0) * self.config.column_gap();
        debug!(slots = rows.len(), ranges = ranges.len(), columns = columns; "Vertical slots assigned");

        let range_blocks: Vec<RangeBlock> = ranges
            .iter()
            .zip(&assignment)
            .filter_map(|(event, column)| {
                let start = event.start()?;
                let end = event.effective_end()?;
                let slot = slot_of(&instants, start);
                let span = span_slot(&instants, slot, end);
                let y = rows[slot].y_start;
                let height = self.config.row_height().max(rows[span].y_end - y);
                let x = *column as f32 * (self.config.wrapper_width() + self.config.column_gap());
                Some(RangeBlock {
                    event: event.id(),
                    column: *column,
                    slot,
                    span_slot: span,
                    bounds: Bounds::new_from_top_left(
                        Point::new(x, y),
                        Size::new(self.config.wrapper_width(), height),
                    ),
                })
            })
            .collect();

        let max_subcolumns = self.config.max_subcolumns() as f32;
        let stack_width = max_subcolumns * self.config.subcolumn_width()
            + (max_subcolumns - 1.0).max(0.0) * self.config.column_gap();
        let stack_x = wrapper_area + self.config.column_gap();
        let stacks: Vec<StackBlock> = points
            .into_iter()
            .map(|(slot, members)| {
                let row = &rows[slot];
                StackBlock {
                    instant: row.instant,
                    slot,
                    members,
                    bounds: Bounds::new_from_top_left(
                        Point::new(stack_x, row.y_start),
                        Size::new(stack_width, row.height),
                    ),
                }
            })
            .collect();

        let height = rows
            .last()
            .map_or(0.0, |row| row.y_end + self.config.bottom_margin());

        info!(
            slots = rows.len(),
            ranges = range_blocks.len(),
            stacks = stacks.len(),
            columns = columns,
            height = height;
            "Vertical layout computed"
        );

        VerticalLayout {
            rows,
            ranges: range_blocks,
            stacks,
            columns: columns.max(1),
            wrapper_area,
            height,
        }
    }
}

/// Dense rank of `instant` among the sorted distinct `instants`.
fn slot_of(instants: &[Instant], instant: Instant) -> usize {
    instants.partition_point(|candidate| *candidate < instant)
}

/// Greedy interval-graph coloring of `ranges`, which must be sorted by start.
///
/// Each column tracks the latest end placed in it. A range takes the first
/// column whose end is strictly before its start, else opens a new column.
/// Returns the column of every range, in input order.
pub(crate) fn color_intervals(ranges: &[&TimelineEvent]) -> Vec<usize> {
    let mut column_ends: Vec<Instant> = Vec::new();
    ranges
        .iter()
        .filter_map(|event| event.interval())
        .map(|interval| {
            let free = column_ends
                .iter()
                .position(|end| *end < interval.start());
            match free {
                Some(column) => {
                    column_ends[column] = column_ends[column].max(interval.end());
                    column
                }
                None => {
                    column_ends.push(interval.end());
                    column_ends.len() - 1
                }
            }
        })
        .collect()
}
