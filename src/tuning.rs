//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override a subset of them
//! with a JSON document. Missing fields keep their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player movement, animation and stamina parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub start_bottom_offset: f32,
    pub max_speed: f32,
    pub jump_duration_frames: u32,
    /// Peak jump offset as a fraction of player height
    pub jump_height_multiplier: f32,
    /// Draw scale at the top of a jump
    pub jump_scale_factor: f32,
    pub dip_duration_frames: u32,
    /// Draw scale at the bottom of a dip
    pub dip_scale_factor: f32,
    pub spin_duration_frames: u32,
    pub post_spin_invulnerability_frames: u32,
    pub max_stamina: f32,
    pub stamina_drain_rate: f32,
    pub stamina_charge_rate: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            start_bottom_offset: PLAYER_START_BOTTOM_OFFSET,
            max_speed: PLAYER_MAX_SPEED,
            jump_duration_frames: JUMP_DURATION_FRAMES,
            jump_height_multiplier: 0.5,
            jump_scale_factor: 1.5,
            dip_duration_frames: DIP_DURATION_FRAMES,
            dip_scale_factor: 0.8,
            spin_duration_frames: SPIN_DURATION_FRAMES,
            post_spin_invulnerability_frames: POST_SPIN_INVULNERABILITY_FRAMES,
            max_stamina: MAX_STAMINA,
            stamina_drain_rate: STAMINA_DRAIN_RATE,
            stamina_charge_rate: STAMINA_CHARGE_RATE,
        }
    }
}

/// Obstacle spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Per-frame spawn chance at speed 0
    pub base_chance: f32,
    /// Extra per-frame spawn chance per unit of river speed
    pub chance_per_speed: f32,
    /// Type roll thresholds, checked in priority order
    pub waterfall_below: f32,
    pub starfish_below: f32,
    pub lowbridge_below: f32,
    pub whirlpool_below: f32,
    pub waterfall_cooldown_ms: f64,
    /// Clearance kept around every obstacle at spawn time
    pub margin: f32,
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_chance: SPAWN_BASE_CHANCE,
            chance_per_speed: SPAWN_CHANCE_PER_SPEED,
            waterfall_below: 0.08,
            starfish_below: 0.03,
            lowbridge_below: 0.06,
            whirlpool_below: 0.09,
            waterfall_cooldown_ms: WATERFALL_COOLDOWN_MS,
            margin: SPAWN_MARGIN,
            max_attempts: SPAWN_ATTEMPTS,
        }
    }
}

/// River speed progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    pub base_speed: f32,
    pub speed_step: f32,
    pub step_interval_ms: f64,
    pub waterfall_boost: f32,
    pub waterfall_boost_frames: u32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_RIVER_SPEED,
            speed_step: SPEED_STEP,
            step_interval_ms: SPEED_STEP_INTERVAL_MS,
            waterfall_boost: WATERFALL_BOOST_SPEED,
            waterfall_boost_frames: WATERFALL_BOOST_FRAMES,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub max_lives: u8,
    pub max_jumps: u8,
    pub jump_cooldown_secs: u32,
    pub hitbox_inset: f32,
    pub starfish_bonus: u64,
    pub distance_per_speed: f32,
    pub player: PlayerTuning,
    pub spawn: SpawnTuning,
    pub difficulty: DifficultyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            max_lives: MAX_LIVES,
            max_jumps: MAX_JUMPS,
            jump_cooldown_secs: JUMP_COOLDOWN_SECS,
            hitbox_inset: HITBOX_INSET,
            starfish_bonus: STARFISH_BONUS,
            distance_per_speed: DISTANCE_PER_SPEED,
            player: PlayerTuning::default(),
            spawn: SpawnTuning::default(),
            difficulty: DifficultyTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, keeping defaults if the document is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.max_lives, 3);
        assert_eq!(t.max_jumps, 3);
        assert_eq!(t.jump_cooldown_secs, 180);
        assert_eq!(t.difficulty.base_speed, 3.0);
        assert_eq!(t.difficulty.step_interval_ms, 15_000.0);
        assert_eq!(t.spawn.max_attempts, 10);
        assert_eq!(t.spawn.margin, 20.0);
        assert_eq!(t.player.max_stamina, 150.0);
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "max_lives": 5, "player": { "max_speed": 7.5 } }"#)
            .unwrap();
        assert_eq!(t.max_lives, 5);
        assert_eq!(t.player.max_speed, 7.5);
        // Untouched fields keep defaults
        assert_eq!(t.player.jump_duration_frames, JUMP_DURATION_FRAMES);
        assert_eq!(t.spawn, SpawnTuning::default());
    }

    #[test]
    fn test_malformed_falls_back() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert_eq!(Tuning::from_json_or_default("{ not json"), Tuning::default());
    }
}
