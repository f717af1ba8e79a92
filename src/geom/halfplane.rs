//! Half-planes: a boundary line plus the side predicate
//!
//! The side is which sign of `a·x + b·y + c` counts as "inside". Obstacle
//! edges are stored as the half-planes that exclude the obstacle's interior.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Line, Point};

/// Which sign of the line's implicit equation is inside the half-plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// `a·x + b·y + c >= 0`
    Geq,
    /// `a·x + b·y + c <= 0`
    Leq,
}

impl Side {
    #[inline]
    fn test(self, value: f64) -> bool {
        match self {
            Side::Geq => value >= 0.0,
            Side::Leq => value <= 0.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Side::Geq => Side::Leq,
            Side::Leq => Side::Geq,
        }
    }
}

/// One side of an infinite line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfPlane {
    line: Line,
    side: Side,
}

impl HalfPlane {
    pub fn new(line: Line, side: Side) -> Self {
        Self { line, side }
    }

    /// The half-plane bounded by `line` that contains `point`
    ///
    /// A point exactly on the line lands on the `Geq` side.
    pub fn containing(line: Line, point: Point) -> Self {
        let (a, b, c) = line.coefficients();
        let side = if a * point.x() + b * point.y() + c < 0.0 {
            Side::Leq
        } else {
            Side::Geq
        };
        Self { line, side }
    }

    /// The half-plane bounded by `line` on the opposite side of `point`
    pub fn excluding(line: Line, point: Point) -> Self {
        let with_point = Self::containing(line, point);
        Self {
            line,
            side: with_point.side.flipped(),
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether `point` lies in this half-plane (boundary included)
    pub fn contains(&self, point: &Point) -> bool {
        let (a, b, c) = self.line.coefficients();
        self.side.test(a * point.x() + b * point.y() + c)
    }

    /// Inclination of the boundary line relative to the x axis
    pub fn inclination(&self) -> f64 {
        self.line.inclination()
    }

    /// Intersection of this boundary line with another half-plane's boundary
    pub fn boundary_intersection(&self, other: &HalfPlane) -> Option<Point> {
        self.line.intersection(other.line())
    }
}

impl fmt::Display for HalfPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, c) = self.line.coefficients();
        let sign = match self.side {
            Side::Geq => ">=",
            Side::Leq => "<=",
        };
        write!(f, "{}x + {}y + {} {} 0", a, b, c, sign)
    }
}
