//! Pure state transitions for a play session.
//!
//! Front ends translate whatever input they have into `GameAction`s and call
//! `Session::tick` once per fixed step. The session owns the model and adds the
//! run-level rules around it: scoring reactions consume the platform and
//! retract the stick, landings count toward levels, and the best score is
//! tracked across restarts.

use crate::collision::{check_collision, Collision};
use crate::config::GameConfig;
use crate::generator::PlatformGenerator;
use crate::snapshot::Snapshot;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Start,
    Restart,
    Flip,
    NudgeLeft,
    NudgeRight,
    PowerUp,
}

pub struct Session {
    pub config: GameConfig,
    pub state: GameState,
    generator: PlatformGenerator,
    pub flipped: bool,
    pub level: u32,
    pub landings: u32,
    pub best_score: u32,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let generator = PlatformGenerator::from_config(&config);
        Self::with_generator(config, generator)
    }

    pub fn with_generator(config: GameConfig, generator: PlatformGenerator) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            generator,
            flipped: false,
            level: 1,
            landings: 0,
            best_score: 0,
        }
    }

    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::Start | GameAction::Restart => self.start(),
            GameAction::Flip => {
                if !self.state.is_falling {
                    self.flipped = !self.flipped;
                }
            }
            GameAction::NudgeLeft => self.nudge(-self.config.nudge_step),
            GameAction::NudgeRight => self.nudge(self.config.nudge_step),
            GameAction::PowerUp => {
                if !self.state.revive(&self.config) {
                    log::debug!(
                        "Power-up unavailable ({} cherries, revived={})",
                        self.state.cherries_collected,
                        self.state.is_revived
                    );
                }
            }
        }
    }

    /// Fresh run with the opening set of platforms.
    pub fn start(&mut self) {
        self.state.reset_game(&self.config);
        self.flipped = false;
        self.level = 1;
        self.landings = 0;
        for _ in 0..self.config.opening_platforms {
            self.generator.generate(&mut self.state);
        }
        log::info!("Run started with {} platforms", self.state.platforms.len());
    }

    /// Replace the model with a restored one, keeping session-level records.
    pub fn restore(&mut self, state: GameState) {
        self.state = state;
        self.record_score();
    }

    /// One fixed simulation step: grow the stick, then resolve collisions.
    pub fn tick(&mut self) -> Option<Collision> {
        if self.state.is_falling {
            return None;
        }
        self.state.extend(&self.config);
        let collision = check_collision(&mut self.state, &self.config)?;
        if collision.reaction.is_reward() {
            self.follow_up(collision);
        }
        self.record_score();
        Some(collision)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn follow_up(&mut self, collision: Collision) {
        self.state.platforms.remove(collision.index);
        self.state.stick.retract();
        self.generator.generate(&mut self.state);
        self.landings += 1;
        if self.config.level_up_every > 0 && self.landings % self.config.level_up_every == 0 {
            self.level += 1;
            let bonus = self.level * 2;
            self.state.cherries_collected = self.state.cherries_collected.saturating_add(bonus);
            log::info!("Level {} reached, {} bonus cherries", self.level, bonus);
        }
    }

    fn nudge(&mut self, dx: f32) {
        if self.state.is_falling {
            return;
        }
        self.state.origin_x = (self.state.origin_x + dx).clamp(0.0, self.config.field_width);
    }

    fn record_score(&mut self) {
        if self.state.score > self.best_score {
            self.best_score = self.state.score;
        }
    }
}
