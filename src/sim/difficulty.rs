//! River speed: stepped by elapsed session time, plus a temporary waterfall boost

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Speed applied this frame (pixels per frame)
    pub speed: f32,
    /// Frames of boost left
    pub boost_frames: u32,
}

impl Difficulty {
    pub fn new(tuning: &DifficultyTuning) -> Self {
        Self {
            speed: tuning.base_speed,
            boost_frames: 0,
        }
    }

    /// Unboosted speed after `elapsed_ms` of play
    pub fn base_speed_at(elapsed_ms: f64, tuning: &DifficultyTuning) -> f32 {
        let steps = (elapsed_ms.max(0.0) / tuning.step_interval_ms).floor() as f32;
        tuning.base_speed + steps * tuning.speed_step
    }

    /// Recompute this frame's speed and burn one boost frame
    pub fn update(&mut self, elapsed_ms: f64, tuning: &DifficultyTuning) -> f32 {
        let mut speed = Self::base_speed_at(elapsed_ms, tuning);
        if self.boost_frames > 0 {
            speed += tuning.waterfall_boost;
            self.boost_frames -= 1;
        }
        self.speed = speed;
        speed
    }

    /// Restart the boost window
    pub fn boost(&mut self, frames: u32) {
        self.boost_frames = frames;
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_frames > 0
    }
}
