//! Match settings
//!
//! Tunables a host may want to vary between matches, persisted as JSON.
//! Geometry constants that collision behavior depends on (ball radius, the
//! units-per-tick scale, the grazing nudge) stay in `consts` instead.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Playfield width/height in world units
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Distance between each paddle and its own net
    pub distance_bar_bound: f64,
    /// Paddle displacement per move command
    pub bar_move_unit: f64,
    /// First score that ends the match
    pub winning_score: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            distance_bar_bound: DISTANCE_BAR_BOUND,
            bar_move_unit: BAR_MOVE_UNIT,
            winning_score: WINNING_SCORE,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            winning_score: 11,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.canvas_width, 1000.0);
        assert_eq!(settings.canvas_height, 700.0);
        assert_eq!(settings.winning_score, 5);
    }
}
