//! HUD values for external display

use serde::Serialize;

use crate::sim::GameState;

/// Snapshot of everything the page shows next to the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub lives: u8,
    pub score: u64,
    /// River speed with one decimal
    pub speed: String,
    /// Remaining jump charges, or the recharge countdown as `M:SS`
    pub jumps: String,
}

impl Hud {
    pub fn from_state(state: &GameState, now_ms: f64) -> Self {
        let jumps = match state.charges.seconds_left(now_ms) {
            Some(secs) if secs > 0 => format_countdown(secs),
            _ => state.charges.remaining().to_string(),
        };
        Self {
            lives: state.lives,
            score: state.score,
            speed: format!("{:.1}", state.speed()),
            jumps,
        }
    }
}

/// `M:SS`
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
