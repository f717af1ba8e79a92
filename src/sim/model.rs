//! Match orchestration
//!
//! Owns the ball and every obstacle, and runs the per-tick collision pass in
//! the fixed order the engine requires: paddles and walls first (bounce),
//! nets afterward (scoring), then the playfield envelope check. The engine
//! is single-threaded; hosts must not swap in network-derived state mid-tick.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::UNITS_PER_TICK;
use crate::geom::{HalfPlane, Line, Point};
use crate::settings::Settings;

use super::ball::Ball;
use super::bar::{Bar, Direction};
use super::bot::Bot;
use super::collision::{Contact, SimError};

/// Who controls a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    /// Driven by local input through `move_paddle`
    Local,
    /// Driven by a network peer through `move_remote_paddle_to`
    Remote,
    /// Driven by the built-in bot
    Bot,
}

/// What happened during one tick, for the host to render or transmit
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Kickoff { angle: f64 },
    Bounce { bar_id: i32 },
    Goal { net_id: i32, scorers: Vec<usize> },
    GameOver { winner: usize },
}

pub struct Model {
    canvas_width: f64,
    canvas_height: f64,
    winning_score: u32,
    ball_start: Point,
    ball: Ball,
    walls: Vec<Bar>,
    nets: Vec<Bar>,
    paddles: Vec<Bar>,
    bots: Vec<Bot>,
    score: Vec<u32>,
    /// Paddle index of the last player who hit the ball
    last_hitter: Option<usize>,
    game_running: bool,
    seed: u64,
    rng: Pcg32,
    tick: u64,
}

impl Model {
    /// Build a match: one ball, two boundary walls, one net and one paddle
    /// per player. Two players only for now; the geometry generalizes but
    /// the initial placement does not.
    pub fn new(settings: &Settings, players: &[PlayerSlot], seed: u64) -> Self {
        let width = settings.canvas_width;
        let height = settings.canvas_height;

        let mut ball = Ball::new();
        let ball_start = Point::new(width / 2.0, settings.distance_bar_bound * 8.0);
        ball.set_position(ball_start.x(), ball_start.y());

        let walls = vec![
            Bar::wall(width / 2.0, 0.0, width),
            Bar::wall(width / 2.0, height, width),
        ];
        let net_length = height - walls[0].thickness() * 2.0;
        let nets = vec![
            Bar::net(0.0, height / 2.0, net_length, 1),
            Bar::net(width, height / 2.0, net_length, 2),
        ];

        let mut paddles = Vec::with_capacity(players.len());
        let mut bots = Vec::new();
        for (index, slot) in players.iter().enumerate() {
            let mut paddle = Bar::paddle(index as i32 + 1, settings.bar_move_unit);
            let x = if index == 0 {
                settings.distance_bar_bound
            } else {
                width - settings.distance_bar_bound
            };
            paddle.set_position(x, height / 2.0);
            match slot {
                PlayerSlot::Remote => {
                    paddle.set_color("red");
                    // hand ball authority to the peer on their half of the
                    // court
                    let halfcourt = Line::new(1.0, 0.0, -width / 2.0);
                    let region = HalfPlane::containing(halfcourt, paddle.center());
                    ball.set_remote_region(Some(region));
                }
                PlayerSlot::Bot => bots.push(Bot::new(index)),
                PlayerSlot::Local => {}
            }
            paddles.push(paddle);
        }

        let score = vec![0; paddles.len()];
        Self {
            canvas_width: width,
            canvas_height: height,
            winning_score: settings.winning_score,
            ball_start,
            ball,
            walls,
            nets,
            paddles,
            bots,
            score,
            last_hitter: None,
            game_running: true,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
        }
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Host-side mutation hook, for applying network-derived ball state
    /// between ticks
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn walls(&self) -> &[Bar] {
        &self.walls
    }

    pub fn nets(&self) -> &[Bar] {
        &self.nets
    }

    pub fn paddles(&self) -> &[Bar] {
        &self.paddles
    }

    pub fn score(&self) -> &[u32] {
        &self.score
    }

    pub fn is_running(&self) -> bool {
        self.game_running
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Reset score and positions for a rematch
    pub fn restart(&mut self) {
        for paddle in &mut self.paddles {
            let x = paddle.xpos();
            paddle.set_position(x, self.canvas_height / 2.0);
        }
        self.score.fill(0);
        self.last_hitter = None;
        self.ball.set_out_of_bound();
        self.ball.set_position(self.ball_start.x(), self.ball_start.y());
        self.game_running = true;
    }

    /// Put the ball in play at the start point, optionally forcing the angle
    pub fn kickoff_ball(&mut self, angle: Option<f64>) {
        self.last_hitter = None;
        if let Some(angle) = angle {
            self.ball.set_angle(angle);
        }
        self.ball.kickoff(self.ball_start);
        log::info!(
            "kickoff at {} with angle {}",
            self.ball.position(),
            self.ball.angle()
        );
    }

    /// Random kickoff direction, within a reasonable cone
    fn random_kickoff_angle(&mut self) -> f64 {
        self.rng.random::<f64>() * PI / 6.0 + PI / 6.0
    }

    /// Move a locally-controlled paddle one step and re-check the ball (the
    /// paddle may have moved into it)
    pub fn move_paddle(
        &mut self,
        player_index: usize,
        direction: Direction,
        speed: f64,
    ) -> Result<Vec<GameEvent>, SimError> {
        self.paddles[player_index].move_by(direction, &self.walls);
        self.check_ball(speed)
    }

    /// Apply a network peer's paddle position
    pub fn move_remote_paddle_to(&mut self, player_index: usize, x: f64, y: f64) {
        self.paddles[player_index].set_position(x, y);
    }

    /// Whether the ball is close enough to half-court to be handed over
    /// between peers
    fn ball_near_halfcourt(&self, speed: f64) -> bool {
        let band = UNITS_PER_TICK * speed;
        (self.ball.position().x() - self.canvas_width / 2.0).abs() <= band
    }

    /// Advance the match by one tick
    pub fn update(&mut self, speed: f64) -> Result<Vec<GameEvent>, SimError> {
        if !self.game_running {
            return Ok(Vec::new());
        }
        self.tick += 1;
        let mut events = Vec::new();

        if !self.ball.is_in_play() {
            let angle = self.random_kickoff_angle();
            self.kickoff_ball(Some(angle));
            events.push(GameEvent::Kickoff { angle });
        }

        // the peer advances the ball while it is on their side; near
        // half-court both sides step it so the handover has no dead tick
        if !self.ball.is_remotely_controlled() || self.ball_near_halfcourt(speed) {
            self.ball.advance(speed, None);
        }

        events.extend(self.check_ball(speed)?);

        let mut moves = Vec::new();
        for bot in &mut self.bots {
            let paddle = &self.paddles[bot.paddle_index()];
            if let Some(direction) = bot.decide(paddle, &self.ball, self.canvas_width, self.tick) {
                moves.push((bot.paddle_index(), direction));
            }
        }
        for (index, direction) in moves {
            events.extend(self.move_paddle(index, direction, speed)?);
        }

        Ok(events)
    }

    /// One collision pass: bounce (paddles, then walls), scoring (nets),
    /// then the envelope check
    pub fn check_ball(&mut self, speed: f64) -> Result<Vec<GameEvent>, SimError> {
        if !self.ball.is_in_play() {
            return Ok(Vec::new());
        }
        let mut events = Vec::new();

        'bounce: {
            for (index, paddle) in self.paddles.iter().enumerate() {
                if let Some(Contact::Bounce { angle }) =
                    paddle.bouncing_angle(&mut self.ball, speed)?
                {
                    log::debug!(
                        "ball at {} bouncing off paddle {} to angle {}",
                        self.ball.position(),
                        paddle.id(),
                        angle
                    );
                    self.ball.bounce(angle, speed);
                    self.last_hitter = Some(index);
                    events.push(GameEvent::Bounce { bar_id: paddle.id() });
                    break 'bounce;
                }
            }
            for wall in &self.walls {
                if let Some(Contact::Bounce { angle }) =
                    wall.bouncing_angle(&mut self.ball, speed)?
                {
                    log::debug!(
                        "ball at {} bouncing off wall to angle {}",
                        self.ball.position(),
                        angle
                    );
                    self.ball.bounce(angle, speed);
                    events.push(GameEvent::Bounce { bar_id: wall.id() });
                    break 'bounce;
                }
            }
        }

        let mut goals = Vec::new();
        for net in &self.nets {
            if let Some(Contact::Goal) = net.bouncing_angle(&mut self.ball, speed)? {
                goals.push(net.id());
            }
        }
        for net_id in goals {
            log::info!("ball touched net {net_id}: updating score");
            let scorers = self.scoring_indices(net_id);
            for &scorer in &scorers {
                events.extend(self.add_point(scorer));
            }
            events.push(GameEvent::Goal { net_id, scorers });
            self.ball.set_out_of_bound();
        }

        // a ball far outside the playfield means the resolver failed to
        // contain it
        let pos = self.ball.position();
        let margin = self.ball.radius() * 2.0;
        if pos.x() < -margin
            || pos.x() > self.canvas_width + margin
            || pos.y() < 0.0
            || pos.y() > self.canvas_height
        {
            self.ball.set_out_of_bound();
            return Err(SimError::BallEscaped { ball_pos: pos });
        }

        Ok(events)
    }

    /// Which players score when the ball passes `net_id`: the last hitter,
    /// unless it was their own net (then every other player scores)
    fn scoring_indices(&self, net_id: i32) -> Vec<usize> {
        let Some(hitter) = self.last_hitter else {
            return Vec::new();
        };
        let owner = (net_id - 1) as usize;
        if hitter != owner {
            vec![hitter]
        } else {
            (0..self.paddles.len()).filter(|&i| i != hitter).collect()
        }
    }

    fn add_point(&mut self, player_index: usize) -> Option<GameEvent> {
        if player_index >= self.score.len() {
            return None;
        }
        self.score[player_index] += 1;
        if self.score[player_index] >= self.winning_score && self.game_running {
            self.game_running = false;
            log::info!("player {} wins {:?}", player_index + 1, self.score);
            return Some(GameEvent::GameOver {
                winner: player_index,
            });
        }
        None
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("tick", &self.tick)
            .field("score", &self.score)
            .field("running", &self.game_running)
            .field("ball", &self.ball)
            .finish_non_exhaustive()
    }
}
