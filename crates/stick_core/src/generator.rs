use crate::config::GameConfig;
use crate::platform::{Platform, PlatformKind};
use crate::state::GameState;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random platform placement inside the play field.
///
/// Kind is a fair coin flip. Pillars draw their width from the configured
/// range; cherries use a fixed width. Every platform sits on the ground line
/// and is placed so it fits horizontally inside the field.
pub struct PlatformGenerator {
    rng: StdRng,
    field_width: f32,
    ground_y: f32,
    platform_height: f32,
    pillar_min_width: f32,
    pillar_max_width: f32,
    cherry_width: f32,
}

impl PlatformGenerator {
    /// Panics if the field cannot hold the widest platform or the width range
    /// is empty. Config validation rejects both before a generator is built.
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(config, seed),
            None => Self::from_entropy(config),
        }
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        assert!(
            config.pillar_min_width > 0.0 && config.pillar_min_width <= config.pillar_max_width,
            "pillar width range [{}, {}] is empty",
            config.pillar_min_width,
            config.pillar_max_width
        );
        assert!(config.cherry_width > 0.0, "cherry width must be positive");
        assert!(
            config.field_width >= config.widest_platform(),
            "field width {} cannot hold a platform {} wide",
            config.field_width,
            config.widest_platform()
        );
        Self {
            rng,
            field_width: config.field_width,
            ground_y: config.ground_y(),
            platform_height: config.platform_height,
            pillar_min_width: config.pillar_min_width,
            pillar_max_width: config.pillar_max_width,
            cherry_width: config.cherry_width,
        }
    }

    /// Roll a platform and append it to the state's spawn order.
    pub fn generate(&mut self, state: &mut GameState) -> Platform {
        let platform = self.roll();
        log::debug!(
            "Spawned {} spanning x={:.1}..{:.1}",
            platform.kind,
            platform.position.x,
            platform.right_edge()
        );
        state.platforms.push(platform);
        platform
    }

    /// Roll a platform without touching any state.
    pub fn roll(&mut self) -> Platform {
        let kind = if self.rng.gen_bool(0.5) {
            PlatformKind::Pillar
        } else {
            PlatformKind::Cherry
        };
        let width = match kind {
            PlatformKind::Pillar => self
                .rng
                .gen_range(self.pillar_min_width..=self.pillar_max_width),
            PlatformKind::Cherry => self.cherry_width,
        };
        let max_x = (self.field_width - width).max(0.0);
        let x = self.rng.gen_range(0.0..=max_x);
        Platform::new(
            kind,
            Vec2::new(x, self.ground_y),
            width,
            self.platform_height,
        )
    }
}
