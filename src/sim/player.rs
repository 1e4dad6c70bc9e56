//! The player's canoe

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::charges::JumpCharges;
use super::collision::{Rect, Stance};
use super::input::InputState;
use crate::tuning::PlayerTuning;

/// Mutually exclusive maneuvers; each carries its own progress
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ActionMode {
    #[default]
    Idle,
    /// Airborne; progress runs 0 -> 1 over the jump duration
    Jumping { progress: f32 },
    /// Ducked under the surface; progress runs 0 -> 1 over the dip duration
    Dipping { progress: f32 },
    /// Damage spin; all control is locked until `timer` hits zero
    Rotating { timer: u32, angle: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Baseline size, used for collision and as the draw scale reference
    pub size: Vec2,
    pub vel: Vec2,
    pub mode: ActionMode,
    /// Diving posture (dive held with stamina left)
    pub flipped: bool,
    pub stamina: f32,
    /// Current upward draw/hitbox offset while jumping
    pub jump_offset: f32,
    pub invulnerable: bool,
    pub invulnerability_timer: u32,
    /// Drives the blink while invulnerable
    pub flicker: u32,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, canvas: Vec2) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        let mut player = Self {
            pos: Vec2::new(
                canvas.x / 2.0 - size.x / 2.0,
                canvas.y - tuning.start_bottom_offset,
            ),
            size,
            vel: Vec2::ZERO,
            mode: ActionMode::Idle,
            flipped: false,
            stamina: tuning.max_stamina,
            jump_offset: 0.0,
            invulnerable: false,
            invulnerability_timer: 0,
            flicker: 0,
        };
        player.clamp_to(canvas);
        player
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.mode, ActionMode::Jumping { .. })
    }

    pub fn is_dipping(&self) -> bool {
        matches!(self.mode, ActionMode::Dipping { .. })
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.mode, ActionMode::Rotating { .. })
    }

    /// Spin angle for drawing (zero outside a spin)
    pub fn rotation(&self) -> f32 {
        match self.mode {
            ActionMode::Rotating { angle, .. } => angle,
            _ => 0.0,
        }
    }

    pub fn stance(&self) -> Stance {
        Stance {
            rotating: self.is_rotating(),
            invulnerable: self.invulnerable,
            jumping: self.is_jumping(),
            dipping: self.is_dipping(),
            flipped: self.flipped,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Collision box: inset on every side, lifted by the jump
    pub fn hitbox(&self, inset: f32) -> Rect {
        let mut rect = self.rect().inset(inset);
        rect.pos.y -= self.jump_offset;
        rect
    }

    /// Sprite scale: grows through a jump, shrinks through a dip
    pub fn draw_scale(&self, tuning: &PlayerTuning) -> f32 {
        match self.mode {
            ActionMode::Jumping { progress } => {
                1.0 + maneuver_curve(progress) * (tuning.jump_scale_factor - 1.0)
            }
            ActionMode::Dipping { progress } => {
                1.0 - maneuver_curve(progress) * (1.0 - tuning.dip_scale_factor)
            }
            _ => 1.0,
        }
    }

    /// Hidden on alternate pairs of frames while invulnerable
    pub fn is_visible(&self) -> bool {
        !self.invulnerable || self.flicker % 4 < 2
    }

    /// Forced dip (riding a waterfall)
    pub fn start_dip(&mut self) {
        self.mode = ActionMode::Dipping { progress: 0.0 };
    }

    /// Enter the damage spin; invulnerability lasts through it
    pub fn take_hit(&mut self, tuning: &PlayerTuning) {
        self.mode = ActionMode::Rotating {
            timer: tuning.spin_duration_frames,
            angle: 0.0,
        };
        self.invulnerable = true;
    }

    /// Advance one frame
    pub fn update(
        &mut self,
        input: &mut InputState,
        charges: &mut JumpCharges,
        now_ms: f64,
        tuning: &PlayerTuning,
        canvas: Vec2,
    ) {
        if let ActionMode::Rotating { timer, angle } = &mut self.mode {
            *timer = timer.saturating_sub(1);
            *angle += TAU / tuning.spin_duration_frames.max(1) as f32;
            self.flicker += 1;
            if *timer == 0 {
                self.mode = ActionMode::Idle;
                self.invulnerability_timer = tuning.post_spin_invulnerability_frames;
            }
            return;
        }

        if input.jump && !self.is_jumping() && !self.flipped && charges.try_consume(now_ms) {
            self.mode = ActionMode::Jumping { progress: 0.0 };
            input.consume_jump();
        }

        self.advance_maneuver(tuning);

        let maneuvering = self.is_jumping() || self.is_dipping();

        self.vel.y = if maneuvering {
            0.0
        } else {
            input.vertical() * tuning.max_speed
        };
        self.vel.x = input.horizontal() * tuning.max_speed;
        self.pos += self.vel;

        if input.dive && self.stamina > 0.0 && !maneuvering {
            self.stamina = (self.stamina - tuning.stamina_drain_rate).max(0.0);
            self.flipped = true;
        } else {
            self.stamina = (self.stamina + tuning.stamina_charge_rate).min(tuning.max_stamina);
            self.flipped = false;
        }

        if self.invulnerable {
            self.invulnerability_timer = self.invulnerability_timer.saturating_sub(1);
            self.flicker += 1;
            if self.invulnerability_timer == 0 {
                self.invulnerable = false;
                self.flicker = 0;
            }
        }

        self.clamp_to(canvas);
    }

    fn advance_maneuver(&mut self, tuning: &PlayerTuning) {
        match &mut self.mode {
            ActionMode::Jumping { progress } => {
                *progress += 1.0 / tuning.jump_duration_frames.max(1) as f32;
                if *progress >= 1.0 {
                    self.mode = ActionMode::Idle;
                } else {
                    self.jump_offset =
                        maneuver_curve(*progress) * self.size.y * tuning.jump_height_multiplier;
                }
            }
            ActionMode::Dipping { progress } => {
                *progress += 1.0 / tuning.dip_duration_frames.max(1) as f32;
                if *progress >= 1.0 {
                    self.mode = ActionMode::Idle;
                }
            }
            _ => {}
        }
        if !self.is_jumping() {
            self.jump_offset = 0.0;
        }
    }

    fn clamp_to(&mut self, canvas: Vec2) {
        self.pos.x = self.pos.x.min(canvas.x - self.size.x).max(0.0);
        self.pos.y = self.pos.y.min(canvas.y - self.size.y).max(0.0);
    }
}

/// Half-sine over a maneuver, peaking at mid-duration
fn maneuver_curve(progress: f32) -> f32 {
    (progress * PI).sin()
}
