//! Collision resolution between the ball and a bar
//!
//! The tricky part of the engine: classify the ball against a bar's four
//! bounding half-planes (embedded / one edge / corner), recover from
//! physically impossible states, and compute the reflection angle.
//!
//! Every corrective loop here is counted. An unbounded walk would have to
//! be assumed to terminate; exceeding the cap is surfaced as a fatal
//! invariant error instead.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::consts::{GRAZING_NUDGE, MAX_RECOVERY_STEPS};
use crate::geom::{HalfPlane, Line, Point};

use super::ball::Ball;
use super::bar::{Bar, BarKind};

/// What a bar reports for one resolver query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// The ball reflected; apply this as its new propagation angle
    Bounce { angle: f64 },
    /// The ball touched a net. Its angle is untouched and it keeps going
    /// through the goal line; the caller handles scoring.
    Goal,
}

/// Fatal geometric invariant violations
///
/// None of these are expected runtime conditions: they mean the geometric
/// model or the calling sequence is inconsistent, and retrying cannot help.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A point matched more than two bounding half-planes of one rectangle
    TooManyEdges {
        bar_id: i32,
        ball_pos: Point,
        ball_angle: f64,
    },
    /// A corrective back-stepping loop failed to free the ball within the cap
    ContainmentExceeded {
        bar_id: i32,
        ball_pos: Point,
        ball_angle: f64,
    },
    /// The ball ended up outside the sane playfield envelope
    BallEscaped { ball_pos: Point },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::TooManyEdges {
                bar_id,
                ball_pos,
                ball_angle,
            } => write!(
                f,
                "ball at {ball_pos} (angle {ball_angle}) faces more than two edges of bar {bar_id}"
            ),
            SimError::ContainmentExceeded {
                bar_id,
                ball_pos,
                ball_angle,
            } => write!(
                f,
                "ball at {ball_pos} (angle {ball_angle}) could not be freed from bar {bar_id} \
                 within {MAX_RECOVERY_STEPS} steps"
            ),
            SimError::BallEscaped { ball_pos } => {
                write!(f, "ball escaped the playfield at {ball_pos}")
            }
        }
    }
}

impl std::error::Error for SimError {}

impl Bar {
    /// Classify the ball against this bar and report the contact, if any
    ///
    /// May move the ball: an embedded ball is stepped backward until it faces
    /// at least one edge, and a bounce off a wall or paddle pushes the ball
    /// fully outside the crossed edge. Nets never push the ball back.
    pub fn bouncing_angle(
        &self,
        ball: &mut Ball,
        speed: f64,
    ) -> Result<Option<Contact>, SimError> {
        let entry_angle = ball.angle();
        let mut containing = self.bouncing_half_planes_containing(&ball.position());
        log::trace!(
            "bar {}: ball at {} faces {} half-plane(s)",
            self.id(),
            ball.position(),
            containing.len()
        );

        // Embedded ball (the bar moved into it, or float drift): step it
        // backward until at least one bounding half-plane contains it.
        let mut steps = 0;
        while containing.is_empty() {
            if steps >= MAX_RECOVERY_STEPS {
                return Err(SimError::ContainmentExceeded {
                    bar_id: self.id(),
                    ball_pos: ball.position(),
                    ball_angle: ball.angle(),
                });
            }
            ball.advance(speed, Some(entry_angle - PI));
            containing = self.bouncing_half_planes_containing(&ball.position());
            steps += 1;
        }

        let crossed: Vec<HalfPlane> = match containing.as_slice() {
            // Facing one edge: bounce when the next step would cross it, or
            // when the ball already touches it regardless of direction (the
            // bar may have moved into the ball).
            [edge] => {
                let line = *edge.line();
                let distance = line.distance_to(&ball.position());
                let delta = ball.step_delta(speed);
                let future = ball.position().translate(delta.x, delta.y);
                let crossing = edge.contains(&ball.position()) && !edge.contains(&future);
                if crossing || distance <= ball.radius() {
                    self.push_ball_outside(ball, &line, speed)?;
                    vec![*edge]
                } else {
                    Vec::new()
                }
            }
            // Facing two adjacent edges: a corner hit, triggered only when
            // the center is within one radius of the corner point.
            [first, second] => match first.boundary_intersection(second) {
                Some(corner) if corner.distance(&ball.position()) < ball.radius() => {
                    containing.clone()
                }
                _ => Vec::new(),
            },
            _ => {
                return Err(SimError::TooManyEdges {
                    bar_id: self.id(),
                    ball_pos: ball.position(),
                    ball_angle: ball.angle(),
                });
            }
        };

        Ok(self.contact_for(&crossed, entry_angle))
    }

    /// Step the ball backward along its reversed angle until the crossed
    /// edge is farther away than one radius. Nets let the ball through.
    fn push_ball_outside(
        &self,
        ball: &mut Ball,
        edge_line: &Line,
        speed: f64,
    ) -> Result<(), SimError> {
        if matches!(self.kind(), BarKind::Net) {
            return Ok(());
        }
        let reversed = ball.angle() - PI;
        for _ in 0..MAX_RECOVERY_STEPS {
            if edge_line.distance_to(&ball.position()) > ball.radius() {
                return Ok(());
            }
            ball.advance(speed, Some(reversed));
            log::trace!(
                "bar {}: pushed ball back to {} (angle {})",
                self.id(),
                ball.position(),
                ball.angle()
            );
        }
        Err(SimError::ContainmentExceeded {
            bar_id: self.id(),
            ball_pos: ball.position(),
            ball_angle: ball.angle(),
        })
    }

    /// Per-kind contact policy for the crossed edges found by the resolver
    fn contact_for(&self, crossed: &[HalfPlane], entry_angle: f64) -> Option<Contact> {
        let new_angle = match crossed {
            [] => return None,
            [edge] => reflect_off_edge(entry_angle, edge.inclination()),
            // a corner strike is point-like: perfect reversal
            _ => entry_angle + PI,
        };
        match self.kind() {
            BarKind::Net => Some(Contact::Goal),
            BarKind::Wall | BarKind::Paddle { .. } => Some(Contact::Bounce { angle: new_angle }),
        }
    }
}

/// Mirror reflection of `incoming` about an edge inclined at
/// `edge_inclination`, expressed in the edge's own frame
///
/// Angles landing in an odd π/2 sector within `GRAZING_NUDGE` of the sector
/// floor get nudged up by the same amount; without this a near-grazing
/// bounce re-triggers the edge condition on the next tick and the ball
/// oscillates against the same edge.
pub(crate) fn reflect_off_edge(incoming: f64, edge_inclination: f64) -> f64 {
    let angle_wrt_edge = incoming + edge_inclination;
    let mut new_angle = -angle_wrt_edge - edge_inclination;
    let sector = (new_angle / FRAC_PI_2) as i64;
    if sector.rem_euclid(2) == 1 && new_angle.rem_euclid(FRAC_PI_2) < GRAZING_NUDGE {
        new_angle += GRAZING_NUDGE;
    }
    new_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use std::f64::consts::FRAC_PI_2;

    fn vertical_bar() -> Bar {
        Bar::new(
            BarKind::Paddle { move_unit: 40.0 },
            1,
            100.0,
            100.0,
            40.0,
            20.0,
            FRAC_PI_2,
            "red",
        )
    }

    fn ball_at(x: f64, y: f64, angle: f64) -> Ball {
        let mut ball = Ball::new();
        ball.kickoff(Point::new(x, y));
        ball.set_angle(angle);
        ball
    }

    #[test]
    fn test_faraway_ball_no_bounce() {
        let bar = vertical_bar();
        let mut ball = ball_at(60.0, 100.0, 0.0);
        assert_eq!(bar.bouncing_angle(&mut ball, 1.0), Ok(None));
    }

    #[test]
    fn test_ball_above_corner_no_bounce() {
        let bar = vertical_bar();
        let mut ball = ball_at(80.0, 150.0, 0.0);
        assert_eq!(bar.bouncing_angle(&mut ball, 1.0), Ok(None));
    }

    #[test]
    fn test_slow_ball_no_bounce() {
        // one twelfth of a step will not reach the edge, and the ball is
        // more than a radius away
        let bar = vertical_bar();
        let mut ball = ball_at(68.9, 100.0, 0.0);
        assert_eq!(bar.bouncing_angle(&mut ball, 1.0 / 12.0), Ok(None));
    }

    #[test]
    fn test_just_outside_top_edge_no_bounce() {
        let bar = vertical_bar();
        let mut ball = ball_at(100.0, 141.0, 0.0);
        assert_eq!(bar.bouncing_angle(&mut ball, 1.0), Ok(None));
    }

    #[test]
    fn test_bounce_from_left_reverses_to_pi() {
        let bar = vertical_bar();
        let mut ball = ball_at(80.0, 100.0, 0.0);
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        match contact {
            Some(Contact::Bounce { angle }) => assert!((angle.abs() - PI).abs() < 1e-9),
            other => panic!("expected bounce, got {other:?}"),
        }
        // the push-back left the ball clear of the edge
        let left_edge = Line::new(1.0, 0.0, -90.0);
        assert!(left_edge.distance_to(&ball.position()) > ball.radius());
    }

    #[test]
    fn test_bounce_from_top_gets_grazing_nudge() {
        let bar = vertical_bar();
        let mut ball = ball_at(100.0, 125.0, -FRAC_PI_2);
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        match contact {
            Some(Contact::Bounce { angle }) => {
                assert!((angle.abs() - (FRAC_PI_2 + GRAZING_NUDGE)).abs() < 1e-9);
            }
            other => panic!("expected bounce, got {other:?}"),
        }
    }

    #[test]
    fn test_corner_hit_is_perfect_reversal() {
        let bar = vertical_bar();
        let incoming = PI / 6.0;
        let mut ball = ball_at(80.0, 75.0, incoming);
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        match contact {
            Some(Contact::Bounce { angle }) => {
                assert!((angle.sin() + incoming.sin()).abs() < 1e-9);
                assert!((angle.cos() + incoming.cos()).abs() < 1e-9);
            }
            other => panic!("expected bounce, got {other:?}"),
        }
    }

    #[test]
    fn test_two_edges_near_corner_reversal() {
        let bar = vertical_bar();
        let incoming = PI / 6.0;
        let mut ball = ball_at(85.0, 125.0, incoming);
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        assert_eq!(
            contact,
            Some(Contact::Bounce {
                angle: incoming + PI
            })
        );
    }

    #[test]
    fn test_embedded_ball_recovers_without_error() {
        let bar = vertical_bar();
        // inside the rectangle: zero matching half-planes
        let mut ball = ball_at(95.0, 100.0, 0.0);
        assert!(bar.bouncing_half_planes_containing(&ball.position()).is_empty());
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        // the ball was walked back out and the left edge reflected it
        assert!(matches!(contact, Some(Contact::Bounce { .. })));
        assert!(!bar.bouncing_half_planes_containing(&ball.position()).is_empty());
    }

    #[test]
    fn test_embedded_inert_ball_hits_recovery_cap() {
        let bar = vertical_bar();
        // an inert ball cannot move, so the recovery loop must give up loudly
        let mut ball = Ball::new();
        ball.set_position(100.0, 100.0);
        match bar.bouncing_angle(&mut ball, 1.0) {
            Err(SimError::ContainmentExceeded { bar_id, .. }) => assert_eq!(bar_id, 1),
            other => panic!("expected containment error, got {other:?}"),
        }
    }

    #[test]
    fn test_net_contact_scores_without_deflection() {
        let net = Bar::net(0.0, 350.0, 640.0, 1);
        let incoming = PI;
        let mut ball = ball_at(-15.0, 350.0, incoming);
        let before = ball.position();
        let contact = net.bouncing_angle(&mut ball, 1.0).unwrap();
        assert_eq!(contact, Some(Contact::Goal));
        // no deflection and no push-back
        assert_eq!(ball.angle(), incoming);
        assert_eq!(ball.position(), before);
    }

    #[test]
    fn test_requery_after_bounce_reports_no_crossing() {
        let bar = vertical_bar();
        let mut ball = ball_at(80.0, 100.0, 0.0);
        let contact = bar.bouncing_angle(&mut ball, 1.0).unwrap();
        let Some(Contact::Bounce { angle }) = contact else {
            panic!("expected bounce");
        };
        ball.set_angle(angle);
        // same tick's position: the crossing no longer triggers
        assert_eq!(bar.bouncing_angle(&mut ball, 1.0), Ok(None));
    }

    #[test]
    fn test_reflect_off_edge_vertical() {
        // head-on against a vertical edge: straight back
        let angle = reflect_off_edge(0.0, FRAC_PI_2);
        assert!((angle.abs() - PI).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_off_edge_horizontal_mirror() {
        // 30 degrees onto a horizontal edge mirrors the vertical component
        let angle = reflect_off_edge(PI / 6.0, 0.0);
        assert!((angle.sin() - (-(PI / 6.0).sin())).abs() < 1e-9);
        assert!((angle.cos() - (PI / 6.0).cos()).abs() < 1e-9);
    }

    #[test]
    fn test_grazing_nudge_threshold() {
        // exactly at the sector floor: nudged
        let nudged = reflect_off_edge(-FRAC_PI_2, 0.0);
        assert!((nudged - (FRAC_PI_2 + GRAZING_NUDGE)).abs() < 1e-9);
        // well inside the sector: untouched
        let clean = reflect_off_edge(-FRAC_PI_2 - 0.5, 0.0);
        assert!((clean - (FRAC_PI_2 + 0.5)).abs() < 1e-9);
    }
}
