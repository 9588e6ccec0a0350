//! Interval primitives shared by every layout strategy.
//!
//! Events are closed intervals `[start, effective_end]`. A point event (no
//! end) occupies the single instant `[start, start]`. Two intervals overlap
//! when they share at least one instant, so touching boundaries overlap.

use crate::event::{Instant, TimelineEvent};

/// A closed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Creates an interval. `end` earlier than `start` is clamped to `start`.
    pub fn new(start: Instant, end: Instant) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn start(self) -> Instant {
        self.start
    }

    pub fn end(self) -> Instant {
        self.end
    }

    /// Closed-interval overlap test. Shared boundaries count as overlap.
    pub fn overlaps(self, other: Interval) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Returns `true` if `instant` lies within `[start, end]`.
    pub fn contains(self, instant: Instant) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Closed-interval overlap: `a_start <= b_end && b_start <= a_end`.
pub fn overlaps(a_start: Instant, a_end: Instant, b_start: Instant, b_end: Instant) -> bool {
    a_start <= b_end && b_start <= a_end
}

impl TimelineEvent {
    /// Returns `true` if both start and end are present and differ.
    pub fn is_range(&self) -> bool {
        matches!((self.start(), self.end()), (Some(start), Some(end)) if start != end)
    }

    /// The end instant used for overlap math: the end if present, else the start.
    pub fn effective_end(&self) -> Option<Instant> {
        self.end().or(self.start())
    }

    /// The closed interval this event occupies, if it has a start.
    pub fn interval(&self) -> Option<Interval> {
        let start = self.start()?;
        Some(Interval::new(start, self.effective_end().unwrap_or(start)))
    }

    /// Returns `true` if both events have a start and their intervals overlap.
    pub fn overlaps(&self, other: &TimelineEvent) -> bool {
        match (self.interval(), other.interval()) {
            (Some(a), Some(b)) => a.overlaps(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::event::EventId;

    fn at(hour: u32, minute: u32) -> Instant {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_point_event_is_not_range() {
        let event = TimelineEvent::new(EventId::new(0), Some(at(9, 0)));
        assert!(!event.is_range());
        assert_eq!(event.effective_end(), Some(at(9, 0)));
    }

    #[test]
    fn test_range_event() {
        let event = TimelineEvent::new(EventId::new(0), Some(at(9, 0))).with_end(Some(at(11, 0)));
        assert!(event.is_range());
        assert_eq!(event.effective_end(), Some(at(11, 0)));
    }

    #[test]
    fn test_untimed_event_has_no_interval() {
        let event = TimelineEvent::new(EventId::new(0), None);
        assert_eq!(event.interval(), None);
        assert_eq!(event.effective_end(), None);
    }

    #[test]
    fn test_touching_boundaries_overlap() {
        let a = Interval::new(at(9, 0), at(10, 0));
        let b = Interval::new(at(10, 0), at(11, 0));
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
    }

    #[test]
    fn test_disjoint_intervals() {
        let a = Interval::new(at(9, 0), at(10, 0));
        let b = Interval::new(at(10, 1), at(11, 0));
        assert!(!a.overlaps(b));
    }

    #[test]
    fn test_point_inside_range_overlaps() {
        let point = TimelineEvent::new(EventId::new(0), Some(at(9, 0)));
        let range = TimelineEvent::new(EventId::new(1), Some(at(9, 0))).with_end(Some(at(11, 0)));
        assert!(point.overlaps(&range));
        assert!(range.overlaps(&point));
    }

    #[test]
    fn test_untimed_never_overlaps() {
        let untimed = TimelineEvent::new(EventId::new(0), None);
        let point = TimelineEvent::new(EventId::new(1), Some(at(9, 0)));
        assert!(!untimed.overlaps(&point));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = Interval::new(at(9, 0), at(11, 0));
        assert!(range.contains(at(9, 0)));
        assert!(range.contains(at(11, 0)));
        assert!(!range.contains(at(11, 1)));
    }

    #[test]
    fn test_inverted_interval_is_clamped() {
        let interval = Interval::new(at(11, 0), at(9, 0));
        assert_eq!(interval.end(), at(11, 0));
    }
}
