//! Slot arithmetic shared by both packing layouts.
//!
//! A slot is a rank-based position along a packed axis. Both layouts lay
//! slots out cumulatively and widen ranges to their span slot; only the
//! definition of a slot differs (one per event horizontally, one per distinct
//! start instant vertically).

use almanac_core::event::Instant;

/// Start offsets of consecutive extents separated by `gap`.
///
/// `offsets[0] == 0` and `offsets[i] = offsets[i - 1] + sizes[i - 1] + gap`.
pub(crate) fn cumulative_offsets(sizes: &[f32], gap: f32) -> Vec<f32> {
    sizes
        .iter()
        .scan(0.0f32, |cursor, size| {
            let offset = *cursor;
            *cursor += size + gap;
            Some(offset)
        })
        .collect()
}

/// The furthest slot whose start lies within `[slot_starts[own_slot], end]`.
///
/// `slot_starts` must be sorted ascending. Slots that share the range's own
/// start but precede it in slot order never pull the span slot backwards.
pub(crate) fn span_slot(slot_starts: &[Instant], own_slot: usize, end: Instant) -> usize {
    slot_starts
        .partition_point(|start| *start <= end)
        .saturating_sub(1)
        .max(own_slot)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32) -> Instant {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_cumulative_offsets() {
        assert_eq!(
            cumulative_offsets(&[180.0, 200.0, 320.0], 24.0),
            vec![0.0, 204.0, 428.0]
        );
        assert!(cumulative_offsets(&[], 24.0).is_empty());
    }

    #[test]
    fn test_span_slot_reaches_last_contained_start() {
        let starts = [at(9), at(9), at(10), at(11), at(13)];
        assert_eq!(span_slot(&starts, 0, at(11)), 3);
        assert_eq!(span_slot(&starts, 0, at(12)), 3);
        assert_eq!(span_slot(&starts, 0, at(13)), 4);
    }

    #[test]
    fn test_span_slot_never_before_own_slot() {
        let starts = [at(9), at(9), at(9)];
        assert_eq!(span_slot(&starts, 2, at(9)), 2);
        assert_eq!(span_slot(&starts, 0, at(9)), 2);
    }
}
