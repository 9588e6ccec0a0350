//! The core diagnostic type for ingestion.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the row and column it concerns, and help text.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// A diagnostic message located in the source table.
///
/// Rows are numbered from 1 in the order they appear in the table, which is
/// how a spreadsheet user counts them. Table-level diagnostics carry no row.
///
/// # Example
///
/// ```text
/// warning[E101]: unparseable time `25:99` (row 3, column `End time`)
///   help: use HH:MM, HH:MM:SS or H:MM AM/PM
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    row: Option<usize>,
    column: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use almanac_ingest::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("missing required columns: `Date`")
    ///     .with_code(ErrorCode::E001)
    ///     .with_help("rename the column or configure `ingest.columns.date`");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the 1-based row number, if any.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Get the column name, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the 1-based row number.
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Set the column name.
    pub fn in_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            row: None,
            column: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message (row 3, column `Date`)"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        match (self.row, &self.column) {
            (Some(row), Some(column)) => write!(f, " (row {row}, column `{column}`)"),
            (Some(row), None) => write!(f, " (row {row})"),
            (None, Some(column)) => write!(f, " (column `{column}`)"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.row().is_none());
        assert!(diag.column().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning("unparseable time")
            .at_row(7)
            .in_column("Start time");

        assert_eq!(diag.row(), Some(7));
        assert_eq!(diag.column(), Some("Start time"));
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("malformed table").with_code(ErrorCode::E002);

        assert_eq!(diag.to_string(), "error[E002]: malformed table");
    }

    #[test]
    fn test_diagnostic_display_row_only() {
        let diag = Diagnostic::warning("malformed source list")
            .with_code(ErrorCode::E102)
            .at_row(2);

        assert_eq!(
            diag.to_string(),
            "warning[E102]: malformed source list (row 2)"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::new(Severity::Warning, "odd cell");

        assert_eq!(diag.to_string(), "warning: odd cell");
    }
}
