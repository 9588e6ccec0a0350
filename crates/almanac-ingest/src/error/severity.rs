//! Severity levels for diagnostics.

use std::fmt;

/// The severity level of a diagnostic.
///
/// - [`Severity::Error`] aborts ingestion before any row is normalized
/// - [`Severity::Warning`] marks a row-level anomaly; the row is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The table cannot be ingested.
    Error,

    /// A row was ingested with a fallback value.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
