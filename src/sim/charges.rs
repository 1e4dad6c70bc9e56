//! Jump charge pool with a full-recharge cooldown

use serde::{Deserialize, Serialize};

/// A capped pool of jumps; once empty it refills after a real-time cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpCharges {
    remaining: u8,
    max: u8,
    cooldown_secs: u32,
    /// Clock reading (ms) when the pool ran dry
    cooldown_started_ms: Option<f64>,
}

impl JumpCharges {
    pub fn new(max: u8, cooldown_secs: u32) -> Self {
        Self {
            remaining: max,
            max,
            cooldown_secs,
            cooldown_started_ms: None,
        }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_started_ms.is_some()
    }

    /// Spend one charge. Emptying the pool starts the cooldown.
    pub fn try_consume(&mut self, now_ms: f64) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.cooldown_started_ms = Some(now_ms);
        }
        true
    }

    /// Whole seconds left on the cooldown, `None` if not cooling down.
    /// Zero means the cooldown has run out but `refresh` has not seen it yet.
    pub fn seconds_left(&self, now_ms: f64) -> Option<u32> {
        let started = self.cooldown_started_ms?;
        let elapsed_secs = ((now_ms - started).max(0.0) / 1000.0).floor() as u32;
        Some(self.cooldown_secs.saturating_sub(elapsed_secs))
    }

    /// Refill the pool if the cooldown has run out. Returns true on refill.
    pub fn refresh(&mut self, now_ms: f64) -> bool {
        if self.seconds_left(now_ms) == Some(0) {
            self.remaining = self.max;
            self.cooldown_started_ms = None;
            return true;
        }
        false
    }
}
