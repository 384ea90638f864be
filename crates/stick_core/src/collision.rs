//! Collision and outcome resolution for the stick tip.
//!
//! Each fixed step the character's probe point (origin plus stick length, at
//! ground height) is tested against the platforms in spawn order. The **first**
//! platform whose bounds contain the point wins; later platforms are not looked
//! at that step, even if they overlap the first one. That ordering is a known
//! quirk of the game rules and is kept as-is.
//!
//! Reactions are selected by platform kind (see `Platform::reaction`):
//!  - revived pillar landing and cherry pickups pay `landing_reward` plus a cherry
//!  - an unprotected pillar contact sets the falling flag until the next reset

use crate::config::GameConfig;
use crate::platform::{PlatformKind, Reaction};
use crate::state::GameState;
use glam::Vec2;

/// Axis-aligned box stored as inclusive min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Which platform was hit and what it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub index: usize,
    pub kind: PlatformKind,
    pub reaction: Reaction,
}

/// Resolve one step. Returns `None` when nothing overlaps the probe or the
/// character is already falling.
pub fn check_collision(state: &mut GameState, config: &GameConfig) -> Option<Collision> {
    if state.is_falling {
        return None;
    }

    let probe = state.character_probe(config);
    let (index, platform) = state
        .platforms
        .iter()
        .enumerate()
        .find(|(_, platform)| platform.contains(probe))?;

    let collision = Collision {
        index,
        kind: platform.kind,
        reaction: platform.reaction(state.is_revived),
    };
    apply_reaction(state, collision.reaction, config);
    Some(collision)
}

fn apply_reaction(state: &mut GameState, reaction: Reaction, config: &GameConfig) {
    match reaction {
        Reaction::Land | Reaction::Collect => {
            state.award(config.landing_reward);
            log::debug!(
                "{:?}: score {}, cherries {}",
                reaction,
                state.score,
                state.cherries_collected
            );
        }
        Reaction::Fall => {
            state.is_falling = true;
            log::info!(
                "Fell at x={:.1} with score {}",
                state.origin_x + state.stick.length,
                state.score
            );
        }
    }
}
