//! Error adapter for converting AlmanacError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When an [`almanac_ingest::IngestError`] carries multiple diagnostics, each
//! diagnostic is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity};

use almanac::AlmanacError;
use almanac_ingest::{Diagnostic, Severity};

/// Adapter for a single ingest diagnostic.
///
/// Table diagnostics point at rows and columns rather than byte spans, so
/// the location is part of the rendered message instead of a label.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())?;
        match (self.diag.row(), self.diag.column()) {
            (Some(row), Some(column)) => write!(f, " (row {row}, column `{column}`)"),
            (Some(row), None) => write!(f, " (row {row})"),
            (None, Some(column)) => write!(f, " (column `{column}`)"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for non-diagnostic [`AlmanacError`] variants.
///
/// This adapter handles errors that don't carry table diagnostics, such as
/// I/O errors, configuration errors, empty timelines and export errors.
pub struct ErrorAdapter<'a>(pub &'a AlmanacError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AlmanacError::Io(_) => "almanac::io",
            AlmanacError::Ingest(_) => "almanac::ingest",
            AlmanacError::EmptyTimeline { .. } => "almanac::empty_timeline",
            AlmanacError::Config(_) => "almanac::config",
            AlmanacError::Export(_) => "almanac::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            AlmanacError::EmptyTimeline { .. } => Some(Box::new(
                "check the date column; rows with unreadable dates are listed as warnings",
            )),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A table diagnostic with a code and row location.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`AlmanacError`] into a list of reportable errors.
///
/// For [`AlmanacError::Ingest`], this returns one [`Reportable`] for each
/// diagnostic in the error. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &AlmanacError) -> Vec<Reportable<'_>> {
    match err {
        AlmanacError::Ingest(ingest_err) => ingest_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use almanac_ingest::{ErrorCode, IngestError};

    use super::*;

    #[test]
    fn test_single_diagnostic() {
        let diag = Diagnostic::error("missing required columns: `Date`")
            .with_code(ErrorCode::E001)
            .with_help("rename the columns");
        let err = AlmanacError::from(IngestError::from(diag));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "missing required columns: `Date`");
                assert_eq!(d.code().unwrap().to_string(), "E001");
                assert_eq!(d.help().unwrap().to_string(), "rename the columns");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("table is not readable").with_code(ErrorCode::E002),
            Diagnostic::warning("unparseable date")
                .with_code(ErrorCode::E100)
                .at_row(4)
                .in_column("Date"),
        ];
        let err = AlmanacError::from(IngestError::from(diags));

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[1].to_string(),
            "unparseable date (row 4, column `Date`)"
        );
        assert_eq!(reportables[1].severity(), Some(MietteSeverity::Warning));
    }

    #[test]
    fn test_non_diagnostic_error() {
        let err = AlmanacError::EmptyTimeline { events: 3 };

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "almanac::empty_timeline");
                assert!(e.help().is_some());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }
}
