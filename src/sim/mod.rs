//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One synchronous pass per tick, no internal suspension points
//! - Seeded RNG only
//! - Fixed obstacle iteration order (paddles and walls before nets)
//! - No rendering or platform dependencies

pub mod ball;
pub mod bar;
pub mod bot;
pub mod collision;
pub mod model;

pub use ball::Ball;
pub use bar::{Bar, BarKind, Direction};
pub use bot::Bot;
pub use collision::{Contact, SimError};
pub use model::{GameEvent, Model, PlayerSlot};
