//! Fixed-precision 2-D points
//!
//! Coordinates are rounded to 3 decimals on construction so that value
//! equality stays stable under floating-point noise. The total order (x then
//! y) exists only for deterministic de-duplication in keyed containers.

use std::cmp::Ordering;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::round_coord;

/// An immutable 2-D coordinate, rounded to the fixed precision
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: round_coord(x),
            y: round_coord(y),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// A copy displaced by (dx, dy), re-rounded
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.to_vec() - other.to_vec()).length()
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// Integer key of the rounded coordinates, for exact comparisons
    fn key(&self) -> (i64, i64) {
        ((self.x * 1000.0).round() as i64, (self.y * 1000.0).round() as i64)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
