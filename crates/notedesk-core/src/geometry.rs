#![forbid(unsafe_code)]

//! Geometric primitives in logical (CSS) pixels.

use core::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position on the desk, relative to the desk container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Snap each axis independently to the nearest multiple of `grid`.
    ///
    /// A non-positive or non-finite grid leaves the point unchanged.
    #[must_use]
    pub fn snapped(self, grid: f64) -> Self {
        Self {
            x: snap_to_grid(self.x, grid),
            y: snap_to_grid(self.y, grid),
        }
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Round half toward positive infinity, matching browser `Math.round`.
///
/// `f64::round` rounds half away from zero, which would move a card dragged
/// to `-13.0` on a 26px grid one cell further left than the browser does.
///
/// Computed from the distance to the floor rather than `(value + 0.5).floor()`,
/// which rounds `0.49999999999999994` up because the sum itself rounds to `1.0`.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Snap a single coordinate to the nearest multiple of `grid`.
#[inline]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if !(grid.is_finite() && grid > 0.0) {
        return value;
    }
    round_half_up(value / grid) * grid
}

/// An axis-aligned rectangle in logical pixels.
///
/// Host measurements (`getBoundingClientRect`) arrive in this shape, relative
/// to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

}
