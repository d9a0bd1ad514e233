//! Planar coordinate type.
//!
//! Synthetic grids live in a local metric plane (x east, y north, metres), so
//! distances are plain Euclidean.  `f64` is used throughout because edge
//! lengths feed directly into the freespeed formula, where the 0.1 s margin
//! would be swamped by single-precision rounding on long links.

/// A point in the local metric plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_m(self, other: Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
