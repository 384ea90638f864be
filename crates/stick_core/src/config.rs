//! Gameplay configuration: play-field dimensions and rule constants.
//!
//! The model never looks at a view to learn how big the field is; everything
//! it needs arrives through `GameConfig`. The JSON file is optional field by
//! field, so an empty object `{}` yields the reference game.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_field_width")]
    pub field_width: f32,
    #[serde(default = "default_field_height")]
    pub field_height: f32,
    #[serde(default = "default_platform_height")]
    pub platform_height: f32,
    #[serde(default = "default_pillar_min_width")]
    pub pillar_min_width: f32,
    #[serde(default = "default_pillar_max_width")]
    pub pillar_max_width: f32,
    #[serde(default = "default_cherry_width")]
    pub cherry_width: f32,
    #[serde(default = "default_stick_increment")]
    pub stick_increment: f32,
    #[serde(default = "default_stick_max_length")]
    pub stick_max_length: f32,
    #[serde(default = "default_landing_reward")]
    pub landing_reward: u32,
    #[serde(default = "default_revive_cost")]
    pub revive_cost: u32,
    #[serde(default = "default_revive_penalty")]
    pub revive_penalty: u32,
    #[serde(default)]
    pub start_origin_x: f32,
    #[serde(default = "default_nudge_step")]
    pub nudge_step: f32,
    #[serde(default = "default_opening_platforms")]
    pub opening_platforms: usize,
    #[serde(default = "default_level_up_every")]
    pub level_up_every: u32,
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    #[serde(default = "default_progress_path")]
    pub progress_path: PathBuf,
    /// Fixed RNG seed for platform generation. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: default_field_width(),
            field_height: default_field_height(),
            platform_height: default_platform_height(),
            pillar_min_width: default_pillar_min_width(),
            pillar_max_width: default_pillar_max_width(),
            cherry_width: default_cherry_width(),
            stick_increment: default_stick_increment(),
            stick_max_length: default_stick_max_length(),
            landing_reward: default_landing_reward(),
            revive_cost: default_revive_cost(),
            revive_penalty: default_revive_penalty(),
            start_origin_x: 0.0,
            nudge_step: default_nudge_step(),
            opening_platforms: default_opening_platforms(),
            level_up_every: default_level_up_every(),
            save_path: default_save_path(),
            progress_path: default_progress_path(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Y coordinate of the platform tops, which is where the character walks.
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.platform_height
    }

    /// Widest platform the generator can produce.
    pub fn widest_platform(&self) -> f32 {
        self.pillar_max_width.max(self.cherry_width)
    }
}

pub fn load_game_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_game_config(&config)?;
    Ok(config)
}

pub fn validate_game_config(config: &GameConfig) -> Result<(), String> {
    if config.field_width <= 0.0 || config.field_height <= 0.0 {
        return Err("Config validation failed: field_width and field_height must be > 0".to_string());
    }
    if config.platform_height <= 0.0 || config.platform_height > config.field_height {
        return Err(format!(
            "Config validation failed: platform_height must be in (0, {}]",
            config.field_height
        ));
    }
    if config.pillar_min_width <= 0.0 || config.cherry_width <= 0.0 {
        return Err("Config validation failed: platform widths must be > 0".to_string());
    }
    if config.pillar_min_width > config.pillar_max_width {
        return Err(format!(
            "Config validation failed: pillar width range [{}, {}] is inverted",
            config.pillar_min_width, config.pillar_max_width
        ));
    }
    if config.widest_platform() > config.field_width {
        return Err(format!(
            "Config validation failed: field_width {} cannot hold a platform {} wide",
            config.field_width,
            config.widest_platform()
        ));
    }
    if config.stick_increment <= 0.0 || config.stick_max_length <= 0.0 {
        return Err(
            "Config validation failed: stick_increment and stick_max_length must be > 0"
                .to_string(),
        );
    }
    if config.start_origin_x < 0.0 || config.start_origin_x > config.field_width {
        return Err("Config validation failed: start_origin_x lies outside the field".to_string());
    }
    if config.level_up_every == 0 {
        return Err("Config validation failed: level_up_every must be > 0".to_string());
    }
    Ok(())
}

const fn default_field_width() -> f32 {
    400.0
}

const fn default_field_height() -> f32 {
    250.0
}

const fn default_platform_height() -> f32 {
    20.0
}

const fn default_pillar_min_width() -> f32 {
    50.0
}

const fn default_pillar_max_width() -> f32 {
    150.0
}

const fn default_cherry_width() -> f32 {
    20.0
}

const fn default_stick_increment() -> f32 {
    2.0
}

const fn default_stick_max_length() -> f32 {
    200.0
}

const fn default_landing_reward() -> u32 {
    50
}

const fn default_revive_cost() -> u32 {
    5
}

const fn default_revive_penalty() -> u32 {
    50
}

const fn default_nudge_step() -> f32 {
    10.0
}

const fn default_opening_platforms() -> usize {
    5
}

const fn default_level_up_every() -> u32 {
    5
}

fn default_save_path() -> PathBuf {
    PathBuf::from("stick_hero_save.json")
}

fn default_progress_path() -> PathBuf {
    PathBuf::from("stick_hero_progress.json")
}
