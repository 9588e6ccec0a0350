//! Geometric primitives for timeline layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the timeline. Packed axes are not
//! time-scaled: an X or Y offset is a rank-based position, not a duration.

use serde::{Serialize, Serializer, ser::SerializeStruct};

/// A 2D point in layout space.
///
/// # Examples
///
/// ```
/// # use almanac_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
///
/// Serializes as `{x, y, width, height}` with `x`/`y` the top-left corner,
/// which is the shape a presentation layer positions absolutely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }
}

impl Serialize for Bounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Bounds", 4)?;
        state.serialize_field("x", &self.min_x)?;
        state.serialize_field("y", &self.min_y)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn corner_and_size_strategy() -> impl Strategy<Value = (Point, Size)> {
        (0.0f32..5000.0, 0.0f32..5000.0, 0.0f32..400.0, 0.0f32..400.0)
            .prop_map(|(x, y, w, h)| (Point::new(x, y), Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// The size a box is built from is the size it reports.
    fn check_size_round_trips(corner: Point, size: Size) -> Result<(), TestCaseError> {
        let bounds = Bounds::new_from_top_left(corner, size);

        prop_assert!(approx_eq!(f32, bounds.width(), size.width(), epsilon = 1e-3));
        prop_assert!(approx_eq!(f32, bounds.height(), size.height(), epsilon = 1e-3));
        prop_assert!(bounds.min_x() <= bounds.max_x());
        prop_assert!(bounds.min_y() <= bounds.max_y());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn size_round_trips((corner, size) in corner_and_size_strategy()) {
            check_size_round_trips(corner, size)?;
        }
    }
}
