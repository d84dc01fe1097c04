//! Geometric primitives for container layout.
//!
//! This module provides the value types every layout operation reads and
//! writes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Non-negative width and height
//! - [`Bounds`] - An axis-aligned rectangle stored as its upper-left and lower-right corners
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
//! A node's bounds are always expressed in the coordinate space of its parent
//! container, so a child at `(30, 30)` sits 30 units right of and below the
//! container's own upper-left corner.
//!
//! [`Bounds`] is an immutable value. Every "mutation" returns a new rectangle,
//! and callers replace the stored value wholesale.

use thiserror::Error;

/// Errors raised when constructing geometry from raw coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("lower-right corner ({x}, {y}) lies left of or above the upper-left corner")]
    InvertedCorners { x: f32, y: f32 },

    #[error("coordinate is not a finite number")]
    NonFinite,
}

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let p = Point::new(30.0, 110.0).add_point(Point::new(1.0, 1.0));
/// assert_eq!(p.x(), 31.0);
/// assert_eq!(p.y(), 111.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
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

    /// Returns a copy of this point with a different x-coordinate
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// Returns a copy of this point with a different y-coordinate
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a rectangle.
///
/// Negative inputs are clamped to zero, so a `Size` can always be turned into
/// well-formed [`Bounds`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
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

/// An axis-aligned rectangle defined by its upper-left and lower-right corners.
///
/// Width and height are derived (`lower_right - upper_left`) and are never
/// negative.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
/// let moved = bounds.move_to(Point::new(30.0, 30.0));
///
/// assert_eq!(moved.lower_right(), Point::new(130.0, 80.0));
/// assert_eq!(moved.to_size(), bounds.to_size());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    upper_left: Point,
    lower_right: Point,
}

impl Bounds {
    /// Creates bounds from explicit corners.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvertedCorners`] when the lower-right corner
    /// lies left of or above the upper-left one, and
    /// [`GeometryError::NonFinite`] for NaN or infinite coordinates.
    pub fn new(upper_left: Point, lower_right: Point) -> Result<Self, GeometryError> {
        if !upper_left.is_finite() || !lower_right.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if lower_right.x < upper_left.x || lower_right.y < upper_left.y {
            return Err(GeometryError::InvertedCorners {
                x: lower_right.x,
                y: lower_right.y,
            });
        }
        Ok(Self {
            upper_left,
            lower_right,
        })
    }

    /// Creates bounds whose upper-left corner is `top_left` and whose extent is `size`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            upper_left: top_left,
            lower_right: Point::new(top_left.x + size.width, top_left.y + size.height),
        }
    }

    /// Returns the upper-left corner
    pub fn upper_left(self) -> Point {
        self.upper_left
    }

    /// Returns the lower-right corner
    pub fn lower_right(self) -> Point {
        self.lower_right
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.upper_left.x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.upper_left.y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.lower_right.x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.lower_right.y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.lower_right.x - self.upper_left.x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.lower_right.y - self.upper_left.y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Translates both corners so the upper-left lands on `upper_left`.
    ///
    /// The size is preserved.
    pub fn move_to(self, upper_left: Point) -> Self {
        Self::new_from_top_left(upper_left, self.to_size())
    }

    /// Returns a copy with a new right edge.
    ///
    /// The edge is clamped so the width never becomes negative.
    pub fn with_max_x(self, max_x: f32) -> Self {
        Self {
            lower_right: self.lower_right.with_x(max_x.max(self.upper_left.x)),
            ..self
        }
    }

    /// Returns a copy with a new bottom edge.
    ///
    /// The edge is clamped so the height never becomes negative.
    pub fn with_max_y(self, max_y: f32) -> Self {
        Self {
            lower_right: self.lower_right.with_y(max_y.max(self.upper_left.y)),
            ..self
        }
    }
}
