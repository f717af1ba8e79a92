//! Plane Pong - a half-plane collision engine for a ball-and-paddle game
//!
//! Core modules:
//! - `geom`: Pure geometry (points, implicit lines, half-planes)
//! - `sim`: Deterministic simulation (obstacles, ball kinematics, collision
//!   resolution, per-tick orchestration)
//!
//! Every obstacle is an oriented rectangle represented by the four half-planes
//! that exclude its interior; the resolver classifies the ball against that
//! set (edge, corner, or embedded) and computes the reflection.

pub mod geom;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Distance covered per tick at speed 1.0 (units per tick)
    pub const UNITS_PER_TICK: f64 = 12.0;

    /// Playfield dimensions
    pub const CANVAS_WIDTH: f64 = 1000.0;
    pub const CANVAS_HEIGHT: f64 = 700.0;
    /// Distance from each paddle to its own net
    pub const DISTANCE_BAR_BOUND: f64 = 40.0;
    /// Paddle displacement per move command
    pub const BAR_MOVE_UNIT: f64 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 20.0;

    /// Paddle defaults (vertical bars)
    pub const PADDLE_HEIGHT: f64 = 100.0;
    pub const PADDLE_WIDTH: f64 = 20.0;

    /// Wall/net defaults
    pub const WALL_THICKNESS: f64 = 30.0;
    pub const NET_THICKNESS: f64 = 20.0;

    /// First score that ends the match
    pub const WINNING_SCORE: u32 = 5;

    /// Additive nudge applied to near-grazing reflection angles.
    /// Empirical stabilizer against the ball oscillating on one edge;
    /// tunable, but changing it changes bounce trajectories.
    pub const GRAZING_NUDGE: f64 = std::f64::consts::PI / 10.0;

    /// Cap on the corrective back-stepping loops (embedded-ball recovery
    /// and post-bounce push-out). Exceeding it is a fatal invariant error.
    pub const MAX_RECOVERY_STEPS: u32 = 256;

    /// Decimal digits kept on coordinates and line coefficients
    pub const COORD_DECIMALS: i32 = 3;
}

/// Normalize an angle into [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    angle.rem_euclid(TAU)
}

/// Round to the fixed coordinate precision (3 decimals)
///
/// Applied to every stored coordinate and line coefficient so that value
/// equality (used to de-duplicate edge lines) is stable under float noise.
#[inline]
pub fn round_coord(v: f64) -> f64 {
    let scale = 10f64.powi(consts::COORD_DECIMALS);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((normalize_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(1.23456), 1.235);
        assert_eq!(round_coord(100.0), 100.0);
    }
}
