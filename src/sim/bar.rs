//! Oriented rectangular obstacles (paddles, walls, nets)
//!
//! A bar is never stored as a polygon. Its sole collision representation is
//! the four half-planes that exclude its interior, one per edge, recomputed
//! from center + dimensions + inclination on every move so they can never go
//! stale. Corners are derived on demand as boundary intersections.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::consts::{NET_THICKNESS, PADDLE_HEIGHT, PADDLE_WIDTH, WALL_THICKNESS};
use crate::geom::{HalfPlane, Line, Point};
use crate::normalize_angle;

/// Paddle movement command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

/// What the obstacle does on contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BarKind {
    /// Boundary surface, always reflects
    Wall,
    /// Goal line behind a player: contact scores, the ball passes through
    Net,
    /// Player bat, reflects like a wall and can be moved
    Paddle { move_unit: f64 },
}

/// An oriented rectangle: center, edge length (`size`), other edge length
/// (`thickness`), inclination in [0, 2π)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    id: i32,
    kind: BarKind,
    x: f64,
    y: f64,
    size: f64,
    thickness: f64,
    inclination: f64,
    color: String,
    /// The four half-planes excluding the interior, refreshed by
    /// `set_position`
    bouncing_half_planes: Vec<HalfPlane>,
}

impl Bar {
    pub fn new(
        kind: BarKind,
        id: i32,
        x: f64,
        y: f64,
        size: f64,
        thickness: f64,
        inclination: f64,
        color: &str,
    ) -> Self {
        let mut bar = Self {
            id,
            kind,
            x,
            y,
            size,
            thickness,
            inclination: normalize_angle(inclination),
            color: color.to_string(),
            bouncing_half_planes: Vec::with_capacity(4),
        };
        bar.update_bouncing_half_planes();
        bar
    }

    /// A horizontal boundary wall centered at (x, y)
    pub fn wall(x: f64, y: f64, length: f64) -> Self {
        Self::new(BarKind::Wall, -1, x, y, length, WALL_THICKNESS, 0.0, "gray")
    }

    /// A vertical goal line behind a player
    pub fn net(x: f64, y: f64, length: f64, id: i32) -> Self {
        Self::new(BarKind::Net, id, x, y, length, NET_THICKNESS, FRAC_PI_2, "white")
    }

    /// A vertical player paddle, positioned later via `set_position`
    pub fn paddle(player_id: i32, move_unit: f64) -> Self {
        Self::new(
            BarKind::Paddle { move_unit },
            player_id,
            0.0,
            0.0,
            PADDLE_HEIGHT,
            PADDLE_WIDTH,
            FRAC_PI_2,
            "blue",
        )
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &BarKind {
        &self.kind
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn xpos(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn ypos(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[inline]
    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Reposition the center and rebuild the four bounding half-planes
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.update_bouncing_half_planes();
    }

    /// All four bounding half-planes for the current pose
    pub fn half_planes(&self) -> &[HalfPlane] {
        &self.bouncing_half_planes
    }

    /// The subset of bounding half-planes containing `point`
    ///
    /// 0 matches: the point is inside the rectangle. 1: outside one edge.
    /// 2: outside two adjacent edges (near a corner). More than 2 is
    /// geometrically impossible and left to the caller to reject.
    pub fn bouncing_half_planes_containing(&self, point: &Point) -> Vec<HalfPlane> {
        self.bouncing_half_planes
            .iter()
            .filter(|hp| hp.contains(point))
            .copied()
            .collect()
    }

    /// The rectangle's corner points, derived from adjacent boundary
    /// intersections (never cached)
    pub fn corners(&self) -> Vec<Point> {
        let (first_pair, second_pair) = self.bouncing_half_planes.split_at(2);
        let mut corners = Vec::with_capacity(4);
        for a in first_pair {
            for b in second_pair {
                if let Some(p) = a.boundary_intersection(b) {
                    corners.push(p);
                }
            }
        }
        corners
    }

    fn update_bouncing_half_planes(&mut self) {
        self.bouncing_half_planes.clear();
        let center = self.center();
        let pairs = [
            (self.inclination, self.thickness),
            (self.inclination - FRAC_PI_2, self.size),
        ];
        for (angle, dimension) in pairs {
            for line in self.edge_lines(angle, dimension) {
                self.bouncing_half_planes
                    .push(HalfPlane::excluding(line, center));
            }
        }
    }

    /// The one or two distinct lines carrying the pair of edges inclined at
    /// `angle`, `dimension` apart (one line if the rectangle is degenerate)
    fn edge_lines(&self, angle: f64, dimension: f64) -> Vec<Line> {
        let mut lines = Vec::with_capacity(2);
        for extreme in self.central_extremes(angle, dimension) {
            let line = Line::from_point_and_inclination(extreme, angle);
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
        lines
    }

    /// Midpoints of the two edges inclined at `angle`: the center offset by
    /// ±dimension/2 along the perpendicular of that inclination
    fn central_extremes(&self, angle: f64, dimension: f64) -> [Point; 2] {
        let half = dimension / 2.0;
        [
            Point::new(self.x - half * angle.sin(), self.y + half * angle.cos()),
            Point::new(self.x + half * angle.sin(), self.y - half * angle.cos()),
        ]
    }

    /// Move a paddle one step, clamped so it stays between the two walls.
    /// Non-paddle bars ignore movement commands.
    pub fn move_by(&mut self, direction: Direction, walls: &[Bar]) {
        let BarKind::Paddle { move_unit } = self.kind else {
            return;
        };
        let wall_margin = walls
            .first()
            .map(|w| w.thickness() / 2.0)
            .unwrap_or_default();
        let max_wall_y = walls.iter().map(Bar::ypos).fold(f64::MIN, f64::max);
        let half_height = self.size / 2.0;
        let new_y = match direction {
            Direction::Up => self.y - move_unit.min(self.y - half_height - wall_margin),
            Direction::Down => {
                self.y + move_unit.min(max_wall_y - wall_margin - self.y - half_height)
            }
        };
        self.set_position(self.x, new_y);
    }
}
