//! Session statistics
//!
//! High score lives for the lifetime of the process; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::SHIP_LIMIT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Ships remaining in reserve
    pub ships_left: u32,
    /// Current session score
    pub score: u64,
    /// Best score seen since the process started
    pub high_score: u64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    pub fn new() -> Self {
        Self {
            ships_left: SHIP_LIMIT,
            score: 0,
            high_score: 0,
        }
    }

    /// Reset per-session values; high score survives
    pub fn reset_stats(&mut self) {
        self.ships_left = SHIP_LIMIT;
        self.score = 0;
    }

    /// Add points and raise the high score if it was beaten.
    /// Returns true when the high score changed.
    pub fn add_score(&mut self, points: u64) -> bool {
        self.score = self.score.saturating_add(points);
        self.check_high_score()
    }

    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Consume one reserve ship. Returns false when none were left.
    pub fn lose_ship(&mut self) -> bool {
        if self.ships_left == 0 {
            return false;
        }
        self.ships_left -= 1;
        true
    }
}
