//! Computer-controlled paddle
//!
//! A deliberately weak strategy: wait out a short cooldown, ignore the ball
//! while it is far away, otherwise step toward the ball's y coordinate.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bar::{Bar, Direction};

/// Ticks a bot must wait between moves
const MOVE_COOLDOWN_TICKS: u64 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    /// Index of the paddle this bot drives
    paddle_index: usize,
    last_move_tick: u64,
}

impl Bot {
    pub fn new(paddle_index: usize) -> Self {
        Self {
            paddle_index,
            last_move_tick: 0,
        }
    }

    pub fn paddle_index(&self) -> usize {
        self.paddle_index
    }

    /// Decide this tick's move, if any
    pub fn decide(
        &mut self,
        paddle: &Bar,
        ball: &Ball,
        canvas_width: f64,
        tick: u64,
    ) -> Option<Direction> {
        if tick.saturating_sub(self.last_move_tick) < MOVE_COOLDOWN_TICKS {
            return None;
        }
        let ball_distance = paddle.center().distance(&ball.position());
        if ball_distance > canvas_width / 3.0 {
            return None;
        }
        let half_height = paddle.size() / 2.0;
        let direction = if paddle.ypos() - half_height > ball.position().y() {
            Some(Direction::Up)
        } else if paddle.ypos() + half_height < ball.position().y() {
            Some(Direction::Down)
        } else {
            None
        };
        if direction.is_some() {
            self.last_move_tick = tick;
        }
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn setup() -> (Bar, Ball) {
        let mut paddle = Bar::paddle(1, 40.0);
        paddle.set_position(40.0, 350.0);
        let mut ball = Ball::new();
        ball.kickoff(Point::new(100.0, 500.0));
        (paddle, ball)
    }

    #[test]
    fn test_bot_chases_ball() {
        let (paddle, ball) = setup();
        let mut bot = Bot::new(0);
        assert_eq!(bot.decide(&paddle, &ball, 1000.0, 10), Some(Direction::Down));
    }

    #[test]
    fn test_bot_respects_cooldown() {
        let (paddle, ball) = setup();
        let mut bot = Bot::new(0);
        assert!(bot.decide(&paddle, &ball, 1000.0, 10).is_some());
        assert_eq!(bot.decide(&paddle, &ball, 1000.0, 11), None);
        assert!(bot.decide(&paddle, &ball, 1000.0, 13).is_some());
    }

    #[test]
    fn test_bot_ignores_distant_ball() {
        let (paddle, mut ball) = setup();
        ball.set_position(900.0, 350.0);
        let mut bot = Bot::new(0);
        assert_eq!(bot.decide(&paddle, &ball, 1000.0, 10), None);
    }

    #[test]
    fn test_bot_idles_when_aligned() {
        let (paddle, mut ball) = setup();
        ball.set_position(100.0, 350.0);
        let mut bot = Bot::new(0);
        assert_eq!(bot.decide(&paddle, &ball, 1000.0, 10), None);
    }
}
