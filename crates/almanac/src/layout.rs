//! Layout engines for timeline events.
//!
//! Two independent packing strategies run over the same normalized events and
//! share the interval and slot primitives. Neither keeps state between calls;
//! every layout is a fresh computation over an immutable event slice.
//!
//! # Pipeline Position
//!
//! ```text
//! RawTable
//!     ↓ normalize
//! Vec<TimelineEvent>
//!     ↓ layout (this module)
//! HorizontalLayout / VerticalLayout
//!     ↓ export
//! JSON payload
//! ```
//!
//! # Submodules
//!
//! - [`grouping`] - Events per entity and the entity catalogue
//! - [`horizontal`] - Packed shared X axis with per-entity lanes of subrows
//! - [`selection`] - Entity subsets for filtered re-layout
//! - [`vertical`] - Packed Y axis of start instants, wrapper columns and stacks

pub mod grouping;
pub mod horizontal;
pub mod selection;
mod slots;
pub mod vertical;

pub use grouping::{EntityEntry, EntityGroups};
pub use horizontal::{HorizontalEngine, HorizontalLayout};
pub use selection::EntitySelection;
pub use vertical::{VerticalEngine, VerticalLayout};
