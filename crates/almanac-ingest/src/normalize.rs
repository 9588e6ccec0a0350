//! Row normalization: raw table rows into [`TimelineEvent`]s.
//!
//! Normalization is fail-fast for the table structure and lenient for row
//! content. A missing required column aborts before any row is read; a cell
//! that cannot be resolved degrades that one event (no start, no end, or a
//! naive source split) and is reported as a warning.

use chrono::{NaiveTime, TimeDelta};
use log::{debug, info};

use almanac_core::{
    event::{EventId, Instant, SourceRef, TimelineEvent},
    identifier::Id,
};

use crate::{
    config::{NormalizeConfig, OvernightPolicy},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, IngestError},
    list::{split_entities, split_sources},
    literal::{resolve_date, resolve_flag, resolve_time},
    table::{RawRow, RawTable},
};

/// Normalized events plus the row anomalies met on the way.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    events: Vec<TimelineEvent>,
    warnings: Vec<Diagnostic>,
}

impl Normalized {
    /// Events in source row order; `id` is the zero-based row ordinal.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Row anomalies, in row order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Number of events whose start could not be resolved.
    pub fn untimed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.start().is_none())
            .count()
    }

    pub fn into_parts(self) -> (Vec<TimelineEvent>, Vec<Diagnostic>) {
        (self.events, self.warnings)
    }
}

/// Normalizes every row of `table`.
///
/// # Errors
///
/// Returns an [`IngestError`] carrying a single [`ErrorCode::E001`]
/// diagnostic that names every missing required column.
///
/// # Examples
///
/// ```
/// use almanac_ingest::{NormalizeConfig, RawTable, normalize};
///
/// let table = RawTable::from_json(r#"[{
///     "Date": "2024-03-01", "Start time": "09:00", "End time": "11:30",
///     "Certain": "yes", "Entities": "Mayor | Council",
///     "Description": "Session", "Verified": "no"
/// }]"#).unwrap();
///
/// let normalized = normalize(&table, &NormalizeConfig::default()).unwrap();
/// let event = &normalized.events()[0];
/// assert!(event.is_range());
/// assert!(event.is_certain());
/// assert!(!event.is_verified());
/// assert_eq!(event.entities().len(), 2);
/// ```
pub fn normalize(table: &RawTable, config: &NormalizeConfig) -> Result<Normalized, IngestError> {
    check_columns(table, config)?;

    info!(rows = table.rows().len(); "Normalizing table");

    let read_sources = table.has_column(config.columns().sources());
    let mut collector = DiagnosticCollector::new();
    let events: Vec<TimelineEvent> = table
        .rows()
        .iter()
        .enumerate()
        .map(|(ordinal, row)| {
            normalize_row(ordinal, row, config, read_sources, &mut collector)
        })
        .collect();

    let warnings = collector.finish()?;
    let normalized = Normalized { events, warnings };

    info!(
        events = normalized.events.len(),
        untimed = normalized.untimed_count(),
        warnings = normalized.warnings.len();
        "Table normalized"
    );

    Ok(normalized)
}

fn check_columns(table: &RawTable, config: &NormalizeConfig) -> Result<(), IngestError> {
    let mut missing: Vec<&str> = config
        .columns()
        .required()
        .into_iter()
        .filter(|column| !table.has_column(column))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    missing.sort_unstable();
    let names = missing
        .iter()
        .map(|column| format!("`{column}`"))
        .collect::<Vec<_>>()
        .join(", ");

    Err(
        Diagnostic::error(format!("missing required columns: {names}"))
            .with_code(ErrorCode::E001)
            .with_help("rename the columns in the input or configure `[ingest.columns]`")
            .into(),
    )
}

fn normalize_row(
    ordinal: usize,
    row: &RawRow,
    config: &NormalizeConfig,
    read_sources: bool,
    collector: &mut DiagnosticCollector,
) -> TimelineEvent {
    let columns = config.columns();
    let row_number = ordinal + 1;

    let date = match resolve_date(row.get(columns.date())) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            collector.emit(
                Diagnostic::warning("missing date; the event is left out of the timeline")
                    .with_code(ErrorCode::E100)
                    .at_row(row_number)
                    .in_column(columns.date()),
            );
            None
        }
        Err(text) => {
            collector.emit(
                Diagnostic::warning(format!(
                    "unparseable date `{text}`; the event is left out of the timeline"
                ))
                .with_code(ErrorCode::E100)
                .at_row(row_number)
                .in_column(columns.date())
                .with_help("use YYYY-MM-DD, DD-MM-YYYY, DD/MM/YYYY or DD.MM.YYYY"),
            );
            None
        }
    };

    let start_time = time_or_warn(row, columns.start_time(), row_number, collector);
    let start: Option<Instant> = date.map(|date| date.and_time(start_time.unwrap_or(NaiveTime::MIN)));

    let end = match (date, start) {
        (Some(date), Some(start)) if !row.get(columns.end_time()).is_empty() => {
            time_or_warn(row, columns.end_time(), row_number, collector)
                .map(|time| resolve_end(start, date.and_time(time), config.overnight()))
        }
        _ => None,
    };

    let entities = split_entities(&row.get(columns.entities()).to_text());
    let entities: Vec<Id> = if entities.is_empty() {
        vec![Id::new(config.unknown_entity())]
    } else {
        entities.iter().map(|name| Id::new(name)).collect()
    };

    let sources = if read_sources {
        let list = split_sources(row.get(columns.sources()).to_text().trim());
        if list.fell_back {
            collector.emit(
                Diagnostic::warning("malformed quoted source list; split on `|` instead")
                    .with_code(ErrorCode::E102)
                    .at_row(row_number)
                    .in_column(columns.sources())
                    .with_help("close every quote and write a literal quote as `\"\"`"),
            );
        }
        list.items
            .iter()
            .map(|item| SourceRef::classify(item))
            .collect()
    } else {
        Vec::new()
    };

    let event = TimelineEvent::new(EventId::new(ordinal), start)
        .with_end(end)
        .with_description(row.get(columns.description()).to_text().trim())
        .with_entities(entities)
        .with_certain(resolve_flag(row.get(columns.certain()), config.affirmative()))
        .with_verified(resolve_flag(row.get(columns.verified()), config.affirmative()))
        .with_sources(sources);

    debug!(
        id = ordinal,
        timed = event.start().is_some(),
        range = event.is_range();
        "Normalized row"
    );

    event
}

fn time_or_warn(
    row: &RawRow,
    column: &str,
    row_number: usize,
    collector: &mut DiagnosticCollector,
) -> Option<NaiveTime> {
    match resolve_time(row.get(column)) {
        Ok(time) => time,
        Err(text) => {
            collector.emit(
                Diagnostic::warning(format!("unparseable time `{text}`; ignored"))
                    .with_code(ErrorCode::E101)
                    .at_row(row_number)
                    .in_column(column)
                    .with_help("use HH:MM, HH:MM:SS or H:MM AM/PM"),
            );
            None
        }
    }
}

/// Applies the overnight policy to an end that precedes its start.
fn resolve_end(start: Instant, end: Instant, policy: OvernightPolicy) -> Instant {
    match policy {
        OvernightPolicy::NextDay if end < start => end + TimeDelta::days(1),
        _ => end,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::table::Cell;

    fn full_row(date: &str, start: &str, end: &str) -> RawRow {
        RawRow::new()
            .with("Date", Cell::text(date))
            .with("Start time", Cell::text(start))
            .with("End time", Cell::text(end))
            .with("Certain", Cell::text("yes"))
            .with("Entities", Cell::text("Harbour | Ferry"))
            .with("Description", Cell::text("  Crossing  "))
            .with("Verified", Cell::Empty)
    }

    fn at(day: u32, hour: u32, minute: u32) -> Instant {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn run(rows: Vec<RawRow>) -> Normalized {
        normalize(&RawTable::from_rows(rows), &NormalizeConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let table = RawTable::from_rows(vec![RawRow::new().with("Date", Cell::text("2024-03-01"))]);

        let err = normalize(&table, &NormalizeConfig::default()).unwrap_err();

        assert_eq!(err.diagnostics().len(), 1);
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(
            diag.message(),
            "missing required columns: `Certain`, `Description`, `End time`, `Entities`, \
             `Start time`, `Verified`"
        );
    }

    #[test]
    fn test_sources_column_is_optional() {
        let normalized = run(vec![full_row("2024-03-01", "09:00", "")]);

        assert!(normalized.events()[0].sources().is_empty());
        assert!(normalized.warnings().is_empty());
    }

    #[test]
    fn test_row_fields() {
        let normalized = run(vec![full_row("2024-03-01", "09:00", "10:15")]);
        let event = &normalized.events()[0];

        assert_eq!(event.id(), EventId::new(0));
        assert_eq!(event.start(), Some(at(1, 9, 0)));
        assert_eq!(event.end(), Some(at(1, 10, 15)));
        assert_eq!(event.description(), "Crossing");
        assert_eq!(event.entities(), &[Id::new("Harbour"), Id::new("Ferry")]);
        assert!(event.is_certain());
        assert!(!event.is_verified());
    }

    #[test]
    fn test_date_only_start_is_midnight() {
        let normalized = run(vec![full_row("2024-03-02", "", "")]);

        assert_eq!(normalized.events()[0].start(), Some(at(2, 0, 0)));
        assert!(!normalized.events()[0].is_range());
    }

    #[test]
    fn test_overnight_end_moves_to_next_day() {
        let normalized = run(vec![full_row("2024-03-01", "22:00", "01:30")]);

        assert_eq!(normalized.events()[0].end(), Some(at(2, 1, 30)));
    }

    #[test]
    fn test_overnight_keep_drops_backwards_end() {
        let config = NormalizeConfig::default().with_overnight(OvernightPolicy::Keep);
        let table = RawTable::from_rows(vec![full_row("2024-03-01", "22:00", "01:30")]);

        let normalized = normalize(&table, &config).unwrap();

        assert_eq!(normalized.events()[0].end(), None);
    }

    #[test]
    fn test_end_equal_to_start_is_point() {
        let normalized = run(vec![full_row("2024-03-01", "09:00", "09:00")]);

        assert_eq!(normalized.events()[0].end(), None);
        assert!(!normalized.events()[0].is_range());
    }

    #[test]
    fn test_unparseable_date_keeps_row() {
        let normalized = run(vec![
            full_row("sometime", "09:00", "10:00"),
            full_row("2024-03-01", "09:00", ""),
        ]);

        assert_eq!(normalized.events().len(), 2);
        assert_eq!(normalized.events()[0].start(), None);
        assert_eq!(normalized.events()[0].end(), None);
        assert_eq!(normalized.untimed_count(), 1);
        assert_eq!(normalized.warnings().len(), 1);
        assert_eq!(normalized.warnings()[0].code(), Some(ErrorCode::E100));
        assert_eq!(normalized.warnings()[0].row(), Some(1));
    }

    #[test]
    fn test_unparseable_start_time_falls_back_to_date() {
        let normalized = run(vec![full_row("2024-03-01", "quarter past", "")]);

        assert_eq!(normalized.events()[0].start(), Some(at(1, 0, 0)));
        assert_eq!(normalized.warnings()[0].code(), Some(ErrorCode::E101));
        assert_eq!(normalized.warnings()[0].column(), Some("Start time"));
    }

    #[test]
    fn test_unparseable_end_time_drops_end() {
        let normalized = run(vec![full_row("2024-03-01", "09:00", "late")]);

        assert_eq!(normalized.events()[0].end(), None);
        assert_eq!(normalized.warnings()[0].column(), Some("End time"));
    }

    #[test]
    fn test_blank_entities_become_unknown() {
        let row = full_row("2024-03-01", "09:00", "").with("Entities", Cell::text(" | "));

        let normalized = run(vec![row]);

        assert_eq!(normalized.events()[0].entities(), &[Id::new("Unknown")]);
    }

    #[test]
    fn test_sources_are_classified() {
        let row = full_row("2024-03-01", "09:00", "")
            .with("Sources", Cell::text(r#"www.example.org | "Box 7 | folder 2""#));

        let normalized = run(vec![row]);
        let sources = normalized.events()[0].sources();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].href(), Some("https://www.example.org"));
        assert_eq!(sources[1].text(), "Box 7 | folder 2");
        assert!(!sources[1].is_link());
    }

    #[test]
    fn test_malformed_sources_warn() {
        let row = full_row("2024-03-01", "09:00", "")
            .with("Sources", Cell::text(r#""unterminated | x"#));

        let normalized = run(vec![row]);

        assert_eq!(normalized.events()[0].sources().len(), 2);
        assert_eq!(normalized.warnings()[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_ids_follow_row_order() {
        let normalized = run(vec![
            full_row("2024-03-03", "09:00", ""),
            full_row("2024-03-01", "09:00", ""),
        ]);

        let ids: Vec<usize> = normalized
            .events()
            .iter()
            .map(|event| event.id().ordinal())
            .collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
