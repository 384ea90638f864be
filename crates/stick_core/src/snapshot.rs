use crate::platform::PlatformKind;
use crate::session::Session;
use serde::Serialize;

/// Read-only view of one platform, in spawn order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformView {
    pub kind: PlatformKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer needs for one frame. Captured between ticks, so the
/// view never holds a reference into live game state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub platforms: Vec<PlatformView>,
    pub score: u32,
    pub cherries: u32,
    pub is_falling: bool,
    pub is_revived: bool,
    pub stick_length: f32,
    pub character_x: f32,
    pub ground_y: f32,
    pub flipped: bool,
    pub level: u32,
    pub best_score: u32,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let state = &session.state;
        Self {
            platforms: state
                .platforms
                .iter()
                .map(|p| PlatformView {
                    kind: p.kind,
                    x: p.position.x,
                    y: p.position.y,
                    width: p.width,
                    height: p.height,
                })
                .collect(),
            score: state.score,
            cherries: state.cherries_collected,
            is_falling: state.is_falling,
            is_revived: state.is_revived,
            stick_length: state.stick.length,
            character_x: state.origin_x,
            ground_y: session.config.ground_y(),
            flipped: session.flipped,
            level: session.level,
            best_score: session.best_score,
        }
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "score {} | cherries {} | level {} | best {} | stick {:.0} | {}",
            self.score,
            self.cherries,
            self.level,
            self.best_score,
            self.stick_length,
            if self.is_falling { "FALLING" } else { "standing" }
        )
    }
}
