//! River Run - a canoe arcade game on a scrolling river
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, difficulty)
//! - `session`: Menu / playing / game-over controller, one frame at a time
//! - `renderer`: Drawing surface abstraction and scene composition
//! - `assets`: Sprite manifest and best-effort preloading
//! - `platform`: Browser/native platform abstraction (keys, clock)
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use hud::Hud;
pub use session::{FrameOutcome, KeyResponse, Session};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Drawing surface dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Session limits
    pub const MAX_LIVES: u8 = 3;
    pub const MAX_JUMPS: u8 = 3;
    /// Full recharge delay once every jump charge is spent
    pub const JUMP_COOLDOWN_SECS: u32 = 180;

    /// Player baseline box (collision and draw scale 1.0)
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 110.0;
    /// Spawn point distance from the bottom edge, before clamping
    pub const PLAYER_START_BOTTOM_OFFSET: f32 = 100.0;
    /// Pixels per frame on each axis
    pub const PLAYER_MAX_SPEED: f32 = 5.0;
    /// Player hitbox shrink on every side
    pub const HITBOX_INSET: f32 = 10.0;

    /// Jump / dip / spin animation lengths in frames
    pub const JUMP_DURATION_FRAMES: u32 = 120;
    pub const DIP_DURATION_FRAMES: u32 = 60;
    pub const SPIN_DURATION_FRAMES: u32 = 45;
    pub const POST_SPIN_INVULNERABILITY_FRAMES: u32 = 30;

    /// Stamina pool for diving
    pub const MAX_STAMINA: f32 = 150.0;
    pub const STAMINA_DRAIN_RATE: f32 = 1.5;
    pub const STAMINA_CHARGE_RATE: f32 = 1.0;
    /// Stamina bar turns red at or below this
    pub const STAMINA_LOW: f32 = 30.0;

    /// River speed (pixels per frame)
    pub const BASE_RIVER_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_STEP_INTERVAL_MS: f64 = 15_000.0;
    pub const WATERFALL_BOOST_SPEED: f32 = 2.0;
    pub const WATERFALL_BOOST_FRAMES: u32 = 180;

    /// Spawning
    pub const SPAWN_BASE_CHANCE: f32 = 0.01;
    pub const SPAWN_CHANCE_PER_SPEED: f32 = 0.005;
    pub const WATERFALL_COOLDOWN_MS: f64 = 5_000.0;
    pub const SPAWN_MARGIN: f32 = 20.0;
    pub const SPAWN_ATTEMPTS: u32 = 10;

    /// Scoring
    pub const STARFISH_BONUS: u64 = 50;
    pub const DISTANCE_PER_SPEED: f32 = 0.1;

    /// Background wave lines
    pub const WATER_LINE_SPACING: f32 = 50.0;
    pub const WATER_LINE_SPEED_FACTOR: f32 = 0.7;
}
