//! Almanac Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! Almanac timeline pipeline. It includes:
//!
//! - **Identifiers**: String-interned entity names ([`identifier::Id`])
//! - **Events**: The immutable [`event::TimelineEvent`] model
//! - **Intervals**: Range, effective-end and overlap primitives ([`interval`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Text**: Label and card-size helpers ([`text`] module)
//! - **Colors**: Deterministic entity palettes ([`color`] module)

pub mod color;
pub mod event;
pub mod geometry;
pub mod identifier;
pub mod interval;
pub mod text;
