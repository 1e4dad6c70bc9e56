//! Keyboard mapping from DOM key names to game commands

use crate::sim::Action;

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Held control for the player
    Control(Action),
    /// Leave the game-over screen
    Confirm,
}

/// Map a `KeyboardEvent.key` value. Unknown keys map to `None`.
pub fn command_for_key(key: &str) -> Option<KeyCommand> {
    let action = match key {
        "ArrowLeft" | "a" | "A" => Action::MoveLeft,
        "ArrowRight" | "d" | "D" => Action::MoveRight,
        "ArrowUp" | "w" | "W" => Action::MoveUp,
        "ArrowDown" | "s" | "S" => Action::MoveDown,
        "Shift" | "e" | "E" => Action::Jump,
        " " => Action::Dive,
        "Enter" | "Escape" => return Some(KeyCommand::Confirm),
        _ => return None,
    };
    Some(KeyCommand::Control(action))
}
