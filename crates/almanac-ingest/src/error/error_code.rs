//! Error codes for ingestion diagnostics.
//!
//! Codes are organized by phase:
//! - `E0xx` - Table structure errors
//! - `E1xx` - Row anomalies

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Table Structure Errors (E0xx)
    // =========================================================================
    /// Missing required column.
    ///
    /// One or more of the columns the normalizer reads is absent from the
    /// table header. All missing names are reported together.
    E001,

    /// Malformed table.
    ///
    /// The input could not be read as a table: it is neither an array of
    /// row objects nor a `{"columns": [...], "rows": [...]}` grid.
    E002,

    // =========================================================================
    // Row Anomalies (E1xx)
    // =========================================================================
    /// Unparseable date.
    ///
    /// The date cell could not be resolved; the event has no start and is
    /// left out of every layout.
    E100,

    /// Unparseable time.
    ///
    /// A start or end time cell could not be resolved; the event falls back
    /// to a date-only start, or to no end.
    E101,

    /// Malformed source list.
    ///
    /// The quoted source list could not be parsed (for example an
    /// unterminated quote) and was split naively on the delimiter instead.
    E102,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Table structure errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            // Row anomalies
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Table structure errors
            ErrorCode::E001 => "missing required column",
            ErrorCode::E002 => "malformed table",
            // Row anomalies
            ErrorCode::E100 => "unparseable date",
            ErrorCode::E101 => "unparseable time",
            ErrorCode::E102 => "malformed source list",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
