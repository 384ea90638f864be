use crate::collision::Aabb;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Regular landing platform.
    Pillar,
    /// Bonus pickup that always pays out.
    Cherry,
}

impl PlatformKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pillar => "pillar",
            Self::Cherry => "cherry",
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What touching a platform does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reaction {
    /// Revived landing on a pillar: score and a cherry.
    Land,
    /// Cherry pickup: score and a cherry.
    Collect,
    /// Unprotected pillar contact: the character drops.
    Fall,
}

impl Reaction {
    pub fn is_reward(self) -> bool {
        matches!(self, Self::Land | Self::Collect)
    }
}

/// A platform in world space. `position` is the top-left corner (y grows
/// downward, so the top edge is the walking surface).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub kind: PlatformKind,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub fn new(kind: PlatformKind, position: Vec2, width: f32, height: f32) -> Self {
        Self {
            kind,
            position,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_min_size(self.position, Vec2::new(self.width, self.height))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().contains_point(point)
    }

    pub fn right_edge(&self) -> f32 {
        self.position.x + self.width
    }

    /// Kind-specific reaction to the character arriving on this platform.
    pub fn reaction(&self, revived: bool) -> Reaction {
        match (self.kind, revived) {
            (PlatformKind::Pillar, true) => Reaction::Land,
            (PlatformKind::Pillar, false) => Reaction::Fall,
            (PlatformKind::Cherry, _) => Reaction::Collect,
        }
    }
}
