//! Collector for accumulating diagnostics during normalization.
//!
//! The [`DiagnosticCollector`] lets the normalizer keep going after a row
//! anomaly and report every anomaly at the end instead of stopping at the
//! first one.

use log::warn;

use crate::error::{Diagnostic, IngestError};

/// A collector for accumulating diagnostics during a processing phase.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// Warnings are logged as they are emitted so a run with a verbose log
    /// shows each anomaly next to the row being processed.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        } else {
            warn!(
                code = diagnostic.code().map(|code| code.as_str()).unwrap_or("-"),
                row = diagnostic.row().unwrap_or_default();
                "{}", diagnostic.message()
            );
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(IngestError)` with all diagnostics.
    /// - If there are no errors, returns the warnings in emission order.
    pub fn finish(self) -> Result<Vec<Diagnostic>, IngestError> {
        if self.has_errors {
            Err(IngestError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().unwrap().is_empty());
    }

    #[test]
    fn test_collector_emit_error_finish_err() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("test error"));

        assert!(collector.finish().is_err());
    }

    #[test]
    fn test_collector_keeps_warnings() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1").with_code(ErrorCode::E100));
        collector.emit(Diagnostic::warning("warning 2").with_code(ErrorCode::E101));

        let warnings = collector.finish().unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[1].code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_collector_error_carries_warnings() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("warning 1"));
        collector.emit(Diagnostic::error("error 1").with_code(ErrorCode::E001));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert_eq!(err.diagnostics()[1].message(), "error 1");
    }
}
