//! The error type returned when a table cannot be ingested.

use thiserror::Error;

use crate::error::Diagnostic;

/// Error type for the ingestion lifecycle.
///
/// Wraps one or more diagnostics. Only table-level problems produce an
/// `IngestError`; row anomalies are returned as warnings next to the events.
#[derive(Debug, Error)]
#[error("{}", summarize(diagnostics))]
pub struct IngestError {
    diagnostics: Vec<Diagnostic>,
}

impl IngestError {
    /// Create a new ingest error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (+{} more)", rest.len()),
    }
}

impl From<Diagnostic> for IngestError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for IngestError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}
