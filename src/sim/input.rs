//! Logical control state, written by key events and read once per frame

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,
    Dive,
}

/// Current pressed state of every action
///
/// `jump` is a latch: set on press, cleared on release or when a jump fires,
/// so one press cannot trigger on consecutive frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub dive: bool,
}

impl InputState {
    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveLeft => self.left = pressed,
            Action::MoveRight => self.right = pressed,
            Action::MoveUp => self.up = pressed,
            Action::MoveDown => self.down = pressed,
            Action::Jump => self.jump = pressed,
            Action::Dive => self.dive = pressed,
        }
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    /// -1 (left), 1 (right) or 0; left wins when both are held
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    /// -1 (up), 1 (down) or 0; up wins when both are held
    pub fn vertical(&self) -> f32 {
        if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        }
    }

    /// Clear the jump latch after it has fired
    pub fn consume_jump(&mut self) {
        self.jump = false;
    }
}
