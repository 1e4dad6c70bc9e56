//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (injected clock)
//! - Input events (key names to logical actions)

pub mod input;
pub mod time;

pub use input::{KeyCommand, command_for_key};
pub use time::{Clock, ManualClock};
