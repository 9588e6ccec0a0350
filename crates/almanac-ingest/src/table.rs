//! The raw table model.
//!
//! A [`RawTable`] is what a spreadsheet reader hands over: a header and rows
//! of loosely typed [`Cell`]s. Cells keep whatever representation the reader
//! produced (text, numbers, native dates), and the literal parsers resolve
//! them into semantic values later.
//!
//! Tables are usually read from JSON in one of two shapes:
//!
//! ```json
//! [{"Date": "2024-03-01", "Entities": "Mayor | Council"}, ...]
//! ```
//!
//! or
//!
//! ```json
//! {"columns": ["Date", "Entities"], "rows": [["2024-03-01", "Mayor | Council"]]}
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Diagnostic, ErrorCode, IngestError};

/// A single loosely typed table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Absent, `null`, or blank text.
    #[default]
    Empty,
    Text(String),
    /// A numeric cell. Date and time columns read these as spreadsheet serials.
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// Builds a text cell, mapping blank text to [`Cell::Empty`].
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The cell rendered as text, for list and description columns.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::DateTime(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            Self::Time(time) => time.format("%H:%M:%S").to_string(),
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(number) => number.as_f64().map_or(Self::Empty, Self::Number),
            Value::String(text) => Self::text(text),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

/// One table row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: IndexMap<String, Cell>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, replacing any previous cell in the same column.
    pub fn with(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.cells.insert(column.into(), cell);
        self
    }

    /// The cell in `column`, or [`Cell::Empty`] if the row has none.
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, cell)| (column.into(), cell))
                .collect(),
        }
    }
}

/// A header plus rows, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

/// The JSON shapes a table may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum TableShape {
    Records(Vec<IndexMap<String, Value>>),
    Grid {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

impl RawTable {
    /// Creates a table. Columns that appear in rows but not in the header
    /// are not added to the header.
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Creates a table whose header is the union of the row columns, in
    /// first-seen order.
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let columns: IndexSet<String> = rows
            .iter()
            .flat_map(|row| row.columns().map(str::to_string))
            .collect();
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Reads a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] with code [`ErrorCode::E002`] when the text
    /// is not valid JSON or matches neither accepted shape.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac_ingest::table::{Cell, RawTable};
    /// let table = RawTable::from_json(
    ///     r#"{"columns": ["Date", "Description"], "rows": [["2024-03-01", null]]}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(table.columns(), ["Date", "Description"]);
    /// assert_eq!(table.rows()[0].get("Description"), &Cell::Empty);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        let shape: TableShape = serde_json::from_str(json).map_err(|err| {
            Diagnostic::error(format!("input is not a readable table: {err}"))
                .with_code(ErrorCode::E002)
                .with_help(
                    "provide an array of row objects or {\"columns\": [...], \"rows\": [[...]]}",
                )
        })?;

        Ok(match shape {
            TableShape::Records(records) => Self::from_rows(
                records
                    .into_iter()
                    .map(|record| {
                        record
                            .into_iter()
                            .map(|(column, value)| (column, Cell::from_json(value)))
                            .collect()
                    })
                    .collect(),
            ),
            TableShape::Grid { columns, rows } => {
                let rows = rows
                    .into_iter()
                    .map(|values| {
                        // Short rows are padded with empty cells; extra values are ignored.
                        let mut values = values.into_iter();
                        columns
                            .iter()
                            .map(|column| {
                                let cell = values.next().map_or(Cell::Empty, Cell::from_json);
                                (column.clone(), cell)
                            })
                            .collect()
                    })
                    .collect();
                Self::new(columns, rows)
            }
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}
