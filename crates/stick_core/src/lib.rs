pub mod collision;
pub mod config;
pub mod generator;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod stick;
pub mod time;

pub use collision::{check_collision, Aabb, Collision};
pub use config::{load_game_config_from_path, GameConfig};
pub use generator::PlatformGenerator;
pub use input::{Command, InputState, Key};
pub use persistence::{load_state, save_state, Progress, SaveError};
pub use platform::{Platform, PlatformKind, Reaction};
pub use session::{GameAction, Session};
pub use snapshot::Snapshot;
pub use state::GameState;
pub use stick::Stick;
pub use time::TimeState;
