//! Error types for Almanac operations.
//!
//! This module provides the main error type [`AlmanacError`] which wraps
//! the error conditions that can occur while building a timeline.

use std::io;

use thiserror::Error;

use almanac_ingest::IngestError;

/// The main error type for Almanac operations.
///
/// # Diagnostic Variants
///
/// The `Ingest` variant carries the structured diagnostics produced while
/// reading the table, so callers can report every problem with its code.
#[derive(Debug, Error)]
pub enum AlmanacError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Ingest(#[from] IngestError),

    /// The table was read, but no event has a usable start.
    #[error("none of the {events} events has a resolvable start; nothing to lay out")]
    EmptyTimeline { events: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for AlmanacError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
