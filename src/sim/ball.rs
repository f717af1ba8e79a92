//! Ball kinematics and lifecycle
//!
//! One ball per match. It is inert until kickoff, travels in a straight line
//! at constant speed, and goes inert again when it passes a net. The
//! simulation loop owns the mutation interface; obstacles only read it while
//! resolving collisions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BALL_RADIUS, UNITS_PER_TICK};
use crate::geom::{HalfPlane, Point};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    in_play: bool,
    radius: f64,
    position: Point,
    /// Propagation angle in radians
    angle: f64,
    /// In networked play, the region of the court where the peer's data is
    /// authoritative for the ball
    remote_region: Option<HalfPlane>,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    pub fn new() -> Self {
        Self {
            in_play: false,
            radius: BALL_RADIUS,
            position: Point::new(0.0, 0.0),
            angle: 0.0,
            remote_region: None,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn set_remote_region(&mut self, region: Option<HalfPlane>) {
        self.remote_region = region;
    }

    /// Whether the peer currently owns the ball's trajectory
    pub fn is_remotely_controlled(&self) -> bool {
        self.remote_region
            .as_ref()
            .is_some_and(|region| region.contains(&self.position))
    }

    #[inline]
    pub fn is_in_play(&self) -> bool {
        self.in_play
    }

    pub fn set_out_of_bound(&mut self) {
        self.in_play = false;
    }

    /// Displacement of one kinematic step at the given speed scalar
    pub fn step_delta(&self, speed: f64) -> DVec2 {
        let step = UNITS_PER_TICK * speed;
        DVec2::new(step * self.angle.cos(), step * self.angle.sin())
    }

    /// Advance one step, optionally overwriting the propagation angle first.
    /// Does nothing while the ball is not in play.
    pub fn advance(&mut self, speed: f64, angle: Option<f64>) {
        if !self.in_play {
            return;
        }
        if let Some(angle) = angle {
            self.angle = angle;
        }
        let delta = self.step_delta(speed);
        self.position = self.position.translate(delta.x, delta.y);
    }

    /// Bouncing is moving with the angle overwritten
    pub fn bounce(&mut self, new_angle: f64, speed: f64) {
        self.advance(speed, Some(new_angle));
    }

    /// Put the ball in play at `point`. Idempotent: a ball already in play
    /// stays where it is.
    pub fn kickoff(&mut self, point: Point) {
        if self.in_play {
            return;
        }
        self.in_play = true;
        self.position = point;
    }
}
