//! Diagnostics for table ingestion.
//!
//! Ingestion distinguishes two failure classes:
//! - structural problems with the table itself (a required column is absent,
//!   the input is not a table at all). These are errors and abort before any
//!   row is normalized.
//! - row-level anomalies (an unparseable date or time, a malformed source
//!   list). These are warnings: the row is kept and the anomaly is reported
//!   alongside the normalized events.
//!
//! # Example
//!
//! ```
//! # use almanac_ingest::error::{Diagnostic, ErrorCode};
//! let diag = Diagnostic::warning("unparseable date `31/31/2020`")
//!     .with_code(ErrorCode::E100)
//!     .at_row(4)
//!     .in_column("Date")
//!     .with_help("use YYYY-MM-DD");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "warning[E100]: unparseable date `31/31/2020` (row 4, column `Date`)"
//! );
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod ingest_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use ingest_error::IngestError;
pub use severity::Severity;
