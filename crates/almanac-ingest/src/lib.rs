//! # Almanac Ingest
//!
//! Turns a loosely typed table of rows into normalized timeline events.
//!
//! ## Usage
//!
//! ```
//! # use almanac_ingest::{normalize, IngestError, NormalizeConfig, RawTable};
//! fn main() -> Result<(), IngestError> {
//!     let table = RawTable::from_json(r#"{
//!         "columns": ["Date", "Start time", "End time", "Certain",
//!                     "Entities", "Description", "Verified"],
//!         "rows": [["2024-03-01", "09:00", null, "yes", "Mayor", "Opening", "yes"]]
//!     }"#)?;
//!
//!     let normalized = normalize(&table, &NormalizeConfig::default())?;
//!     assert_eq!(normalized.events().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod list;
mod literal;
mod normalize;
pub mod table;

pub use config::{ColumnNames, NormalizeConfig, OvernightPolicy};
pub use error::{Diagnostic, ErrorCode, IngestError, Severity};
pub use normalize::{Normalized, normalize};
pub use table::{Cell, RawRow, RawTable};
