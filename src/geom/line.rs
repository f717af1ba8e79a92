//! Implicit lines `ax + by + c = 0`
//!
//! Lines are value objects: coefficients are rounded to the fixed precision
//! on construction, and equality/hashing go through the rounded values so a
//! keyed container can de-duplicate coincident edge lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{normalize_angle, round_coord};

use super::Point;

/// Slope/intercept form of a line, with an explicit variant for vertical
/// lines (infinite slope) so no division by zero can occur downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlopeIntercept {
    /// Vertical line `x = x0`
    Vertical { x: f64 },
    /// `y = m·x + q`
    Sloped { m: f64, q: f64 },
}

/// A line `a·x + b·y + c = 0`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self {
            a: round_coord(a),
            b: round_coord(b),
            c: round_coord(c),
        }
    }

    /// The line with direction coefficients (a, b) passing through `point`
    ///
    /// The coefficients are rounded before deriving `c`, so the stored line
    /// passes through the point as evaluated with the stored values.
    pub fn through(a: f64, b: f64, point: Point) -> Self {
        let a = round_coord(a);
        let b = round_coord(b);
        let c = -a * point.x() - b * point.y();
        Self::new(a, b, c)
    }

    /// The line through `point` inclined at `angle` to the x axis
    ///
    /// The angle is normalized into [0, 2π) first, then the axis-aligned
    /// cases are matched exactly; anything else goes through the tangent.
    pub fn from_point_and_inclination(point: Point, angle: f64) -> Self {
        use std::f64::consts::{FRAC_PI_2, PI};
        const AXIS_EPS: f64 = 1e-9;

        let angle = normalize_angle(angle);
        let is_near = |target: f64| (angle - target).abs() < AXIS_EPS;

        // vertical line
        if is_near(FRAC_PI_2) || is_near(3.0 * FRAC_PI_2) {
            Self::through(1.0, 0.0, point)
        // horizontal line
        } else if angle < AXIS_EPS || is_near(PI) || is_near(2.0 * PI) {
            Self::through(0.0, 1.0, point)
        // any other inclination
        } else {
            Self::through(angle.tan(), -1.0, point)
        }
    }

    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn slope_intercept(&self) -> SlopeIntercept {
        if self.b == 0.0 {
            SlopeIntercept::Vertical { x: -self.c / self.a }
        } else {
            SlopeIntercept::Sloped {
                m: -self.a / self.b,
                q: -self.c / self.b,
            }
        }
    }

    /// Inclination relative to the x axis, in (-π/2, π/2]
    pub fn inclination(&self) -> f64 {
        match self.slope_intercept() {
            SlopeIntercept::Vertical { .. } => std::f64::consts::FRAC_PI_2,
            SlopeIntercept::Sloped { m, .. } => m.atan(),
        }
    }

    /// Perpendicular distance from a point to this line
    pub fn distance_to(&self, point: &Point) -> f64 {
        let num = (self.a * point.x() + self.b * point.y() + self.c).abs();
        let den = (self.a * self.a + self.b * self.b).sqrt();
        num / den
    }

    /// Intersection with another line
    ///
    /// `None` when the slopes are equal: parallel lines, including the
    /// coincident case, which is deliberately not distinguished.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        use SlopeIntercept::*;
        match (self.slope_intercept(), other.slope_intercept()) {
            (Vertical { .. }, Vertical { .. }) => None,
            (Vertical { x }, Sloped { m, q }) | (Sloped { m, q }, Vertical { x }) => {
                Some(Point::new(x, m * x + q))
            }
            (Sloped { m: m1, q: q1 }, Sloped { m: m2, q: q2 }) => {
                if m1 == m2 {
                    return None;
                }
                let x = (q2 - q1) / (m1 - m2);
                Some(Point::new(x, m1 * x + q1))
            }
        }
    }

    /// Integer key of the rounded coefficients, for exact comparisons
    fn key(&self) -> (i64, i64, i64) {
        (
            (self.a * 1000.0).round() as i64,
            (self.b * 1000.0).round() as i64,
            (self.c * 1000.0).round() as i64,
        )
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Line {}

impl std::hash::Hash for Line {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x + {}y + {} = 0", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_vertical_line_slope_sentinel() {
        let line = Line::new(1.0, 0.0, -90.0);
        match line.slope_intercept() {
            SlopeIntercept::Vertical { x } => assert_eq!(x, 90.0),
            other => panic!("expected vertical, got {other:?}"),
        }
        assert_eq!(line.inclination(), FRAC_PI_2);
    }

    #[test]
    fn test_horizontal_line_slope() {
        let line = Line::new(0.0, 1.0, -80.0);
        assert_eq!(
            line.slope_intercept(),
            SlopeIntercept::Sloped { m: -0.0, q: 80.0 }
        );
        assert_eq!(line.inclination(), 0.0);
    }

    #[test]
    fn test_from_point_and_inclination_axes() {
        let p = Point::new(100.0, 100.0);
        assert_eq!(
            Line::from_point_and_inclination(p, FRAC_PI_2).coefficients(),
            (1.0, 0.0, -100.0)
        );
        assert_eq!(
            Line::from_point_and_inclination(p, 0.0).coefficients(),
            (0.0, 1.0, -100.0)
        );
        // negative angles normalize before the axis match
        assert_eq!(
            Line::from_point_and_inclination(p, -FRAC_PI_2).coefficients(),
            (1.0, 0.0, -100.0)
        );
        assert_eq!(
            Line::from_point_and_inclination(p, PI).coefficients(),
            (0.0, 1.0, -100.0)
        );
    }

    #[test]
    fn test_from_point_and_inclination_diagonal() {
        // 45 degrees through the origin: x - y = 0
        let line = Line::from_point_and_inclination(Point::new(0.0, 0.0), FRAC_PI_4);
        assert_eq!(line.coefficients(), (1.0, -1.0, 0.0));
        assert!((line.inclination() - FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_point() {
        let line = Line::new(1.0, 0.0, -90.0); // x = 90
        assert!((line.distance_to(&Point::new(80.0, 100.0)) - 10.0).abs() < 1e-9);
        assert!((line.distance_to(&Point::new(90.0, -5.0))).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_lines_no_intersection() {
        let l1 = Line::new(1.0, 0.0, -90.0);
        let l2 = Line::new(1.0, 0.0, -110.0);
        assert_eq!(l1.intersection(&l2), None);
        // coincident lines are also "parallel"
        assert_eq!(l1.intersection(&l1), None);

        let h1 = Line::new(0.0, 1.0, -80.0);
        let h2 = Line::new(0.0, 1.0, -120.0);
        assert_eq!(h1.intersection(&h2), None);
    }

    #[test]
    fn test_intersection_vertical_and_horizontal() {
        let v = Line::new(1.0, 0.0, -90.0); // x = 90
        let h = Line::new(0.0, 1.0, -80.0); // y = 80
        assert_eq!(v.intersection(&h), Some(Point::new(90.0, 80.0)));
        assert_eq!(h.intersection(&v), Some(Point::new(90.0, 80.0)));
    }

    #[test]
    fn test_intersection_general() {
        // y = x and y = -x + 2 meet at (1, 1)
        let l1 = Line::new(1.0, -1.0, 0.0);
        let l2 = Line::new(1.0, 1.0, -2.0);
        assert_eq!(l1.intersection(&l2), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_value_equality_and_dedup() {
        let a = Line::new(1.0, 0.0, -90.0001);
        let b = Line::new(1.0, 0.0, -90.0);
        assert_eq!(a, b);

        let mut seen = std::collections::HashSet::new();
        seen.insert(a);
        assert!(!seen.insert(b));
    }
}
