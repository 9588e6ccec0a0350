//! Label text and card size estimation.
//!
//! Layout never measures glyphs. Card widths come from a linear estimate on
//! the character count of the card text, clamped to a fixed band, which keeps
//! the engines deterministic and independent of installed fonts.

use serde::Deserialize;

use crate::event::TimelineEvent;

/// Date label for events whose start could not be resolved.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Time label for events whose start could not be resolved.
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Linear card-width estimate: `clamp(base + per_char * chars, min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidthEstimate {
    base: f32,
    per_char: f32,
    min: f32,
    max: f32,
}

impl Default for WidthEstimate {
    fn default() -> Self {
        Self {
            base: 140.0,
            per_char: 5.0,
            min: 180.0,
            max: 320.0,
        }
    }
}

impl WidthEstimate {
    /// Creates an estimate. `max` below `min` is raised to `min`.
    pub fn new(base: f32, per_char: f32, min: f32, max: f32) -> Self {
        Self {
            base,
            per_char,
            min,
            max: max.max(min),
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Estimated rendered width for `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_core::text::WidthEstimate;
    /// let estimate = WidthEstimate::default();
    /// assert_eq!(estimate.width_for(""), 180.0);
    /// assert_eq!(estimate.width_for(&"x".repeat(20)), 240.0);
    /// assert_eq!(estimate.width_for(&"x".repeat(500)), 320.0);
    /// ```
    pub fn width_for(&self, text: &str) -> f32 {
        let chars = text.chars().count() as f32;
        (self.base + self.per_char * chars).clamp(self.min, self.max.max(self.min))
    }
}

/// Shortens `text` to at most `max_chars` characters, ending in `ellipsis`.
///
/// Surrounding whitespace is trimmed first. Counting is by character, so
/// multi-byte text is never split inside a code point.
///
/// # Examples
///
/// ```
/// # use almanac_core::text::truncate;
/// assert_eq!(truncate("  short  ", 10, "..."), "short");
/// assert_eq!(truncate("abcdefghij", 5, "..."), "abcd...");
/// assert_eq!(truncate("abcdefghij", 5, "…"), "abcd…");
/// ```
pub fn truncate(text: &str, max_chars: usize, ellipsis: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}{ellipsis}")
}

/// `YYYY-MM-DD` of the event start, or [`UNKNOWN_DATE`].
pub fn date_label(event: &TimelineEvent) -> String {
    event
        .start()
        .map(|start| start.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// `HH:MM`, `HH:MM - HH:MM` for ranges, or [`UNKNOWN_TIME`].
pub fn time_label(event: &TimelineEvent) -> String {
    let Some(start) = event.start() else {
        return UNKNOWN_TIME.to_string();
    };
    match event.end() {
        Some(end) if end != start => {
            format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => start.format("%H:%M").to_string(),
    }
}

/// The text a card displays in its header and body; the input to width estimation.
pub fn card_text(event: &TimelineEvent) -> String {
    format!(
        "{} {} {}",
        date_label(event),
        time_label(event),
        event.description()
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::event::EventId;

    fn event_at(hour: u32, end_hour: Option<u32>) -> TimelineEvent {
        let day = NaiveDate::from_ymd_opt(2023, 11, 2).unwrap();
        TimelineEvent::new(EventId::new(3), day.and_hms_opt(hour, 0, 0))
            .with_end(end_hour.and_then(|h| day.and_hms_opt(h, 30, 0)))
            .with_description("Ferry departs")
    }

    #[test]
    fn test_width_is_clamped_low() {
        assert_approx_eq!(f32, WidthEstimate::default().width_for("abc"), 180.0);
    }

    #[test]
    fn test_width_linear_band() {
        // 140 + 5 * 30 = 290
        let text = "a".repeat(30);
        assert_approx_eq!(f32, WidthEstimate::default().width_for(&text), 290.0);
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let text = "é".repeat(20);
        assert_approx_eq!(f32, WidthEstimate::default().width_for(&text), 240.0);
    }

    #[test]
    fn test_inverted_band_is_repaired() {
        let estimate = WidthEstimate::new(0.0, 1.0, 200.0, 100.0);
        assert_approx_eq!(f32, estimate.max(), 200.0);
        assert_approx_eq!(f32, estimate.width_for("x"), 200.0);
    }

    #[test]
    fn test_truncate_exact_length_kept() {
        assert_eq!(truncate("abcde", 5, "..."), "abcde");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ééééé", 3, "…"), "éé…");
    }

    #[test]
    fn test_labels_for_point() {
        let event = event_at(9, None);
        assert_eq!(date_label(&event), "2023-11-02");
        assert_eq!(time_label(&event), "09:00");
    }

    #[test]
    fn test_labels_for_range() {
        let event = event_at(9, Some(11));
        assert_eq!(time_label(&event), "09:00 - 11:30");
        assert_eq!(card_text(&event), "2023-11-02 09:00 - 11:30 Ferry departs");
    }

    #[test]
    fn test_labels_for_untimed() {
        let event = TimelineEvent::new(EventId::new(0), None);
        assert_eq!(date_label(&event), UNKNOWN_DATE);
        assert_eq!(time_label(&event), UNKNOWN_TIME);
    }
}
