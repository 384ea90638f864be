//! The persisted game model.
//!
//! `GameState` holds everything a save file needs to resume a run. It is
//! mutated by the collision resolver, the platform generator, and the rule
//! methods below; nothing in here knows about rendering.

use crate::config::GameConfig;
use crate::platform::Platform;
use crate::stick::Stick;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub cherries_collected: u32,
    pub is_revived: bool,
    pub is_falling: bool,
    /// Spawn order is significant: collision takes the first match.
    pub platforms: Vec<Platform>,
    pub stick: Stick,
    /// Horizontal offset of the character from the field origin.
    pub origin_x: f32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            cherries_collected: 0,
            is_revived: false,
            is_falling: false,
            platforms: Vec::new(),
            stick: Stick::default(),
            origin_x: config.start_origin_x,
        }
    }

    pub fn reset_game(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// One tick of stick growth. Does nothing once the character is falling.
    pub fn extend(&mut self, config: &GameConfig) -> bool {
        if self.is_falling {
            return false;
        }
        self.stick
            .grow(config.stick_increment, config.stick_max_length)
    }

    /// Spend cherries on a revival. Score loses the penalty but stays >= 0.
    pub fn revive(&mut self, config: &GameConfig) -> bool {
        if self.is_revived || self.cherries_collected < config.revive_cost {
            return false;
        }
        self.is_revived = true;
        self.cherries_collected -= config.revive_cost;
        self.score = self.score.saturating_sub(config.revive_penalty);
        log::info!(
            "Revived: {} cherries left, score {}",
            self.cherries_collected,
            self.score
        );
        true
    }

    /// Point the collision resolver probes: stick tip at ground height.
    pub fn character_probe(&self, config: &GameConfig) -> Vec2 {
        Vec2::new(self.origin_x + self.stick.length, config.ground_y())
    }

    pub(crate) fn award(&mut self, reward: u32) {
        self.score = self.score.saturating_add(reward);
        self.cherries_collected = self.cherries_collected.saturating_add(1);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
