//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only through explicit `now_ms` arguments
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod charges;
pub mod collision;
pub mod difficulty;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use charges::JumpCharges;
pub use collision::{Outcome, Rect, Stance, resolve};
pub use difficulty::Difficulty;
pub use input::{Action, InputState};
pub use obstacle::{Contact, KindDescriptor, Layer, Obstacle, ObstacleKind, RenderBox};
pub use player::{ActionMode, Player};
pub use spawn::Spawner;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{advance_background, begin_frame, end_frame, tick};
