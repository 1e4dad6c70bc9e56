//! Probabilistic obstacle spawning with non-overlapping placement

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacle::{Footprint, Obstacle, ObstacleKind};
use crate::tuning::SpawnTuning;

/// Weighted pool for ordinary obstacles
const COMMON_POOL: [ObstacleKind; 8] = [
    ObstacleKind::Log,
    ObstacleKind::Log,
    ObstacleKind::Log,
    ObstacleKind::Log,
    ObstacleKind::Rock,
    ObstacleKind::Rock,
    ObstacleKind::Fish,
    ObstacleKind::Fisherman,
];

/// Spawner bookkeeping that outlives a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Clock reading (ms) of the last waterfall pick
    pub last_waterfall_ms: Option<f64>,
}

impl Spawner {
    /// Per-frame spawn probability at the given river speed
    pub fn chance(speed: f32, tuning: &SpawnTuning) -> f32 {
        tuning.base_chance + speed * tuning.chance_per_speed
    }

    pub fn waterfall_ready(&self, now_ms: f64, tuning: &SpawnTuning) -> bool {
        match self.last_waterfall_ms {
            Some(last) => now_ms - last > tuning.waterfall_cooldown_ms,
            None => true,
        }
    }

    /// Pick a type from one uniform `roll` in priority order. The common pool
    /// draws its own index from `rng`.
    pub fn choose_kind<R: Rng>(
        &mut self,
        rng: &mut R,
        roll: f32,
        now_ms: f64,
        tuning: &SpawnTuning,
    ) -> ObstacleKind {
        if self.waterfall_ready(now_ms, tuning) && roll < tuning.waterfall_below {
            self.last_waterfall_ms = Some(now_ms);
            ObstacleKind::Waterfall
        } else if roll < tuning.starfish_below {
            ObstacleKind::Starfish
        } else if roll < tuning.lowbridge_below {
            ObstacleKind::LowBridge
        } else if roll < tuning.whirlpool_below {
            ObstacleKind::Whirlpool
        } else {
            COMMON_POOL[rng.random_range(0..COMMON_POOL.len())]
        }
    }

    /// Roll the spawn chance and, on success, try to place a new obstacle.
    /// Returns the kind and collision box, or `None` if nothing spawned.
    pub fn try_spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        existing: &[Obstacle],
        speed: f32,
        now_ms: f64,
        canvas_width: f32,
        tuning: &SpawnTuning,
    ) -> Option<(ObstacleKind, Rect)> {
        if rng.random::<f32>() >= Self::chance(speed, tuning) {
            return None;
        }
        let roll = rng.random::<f32>();
        let kind = self.choose_kind(rng, roll, now_ms, tuning);
        let size = footprint_size(kind, rng, canvas_width);
        place(kind, size, rng, existing, canvas_width, tuning).map(|rect| (kind, rect))
    }
}

/// Logical size for a new obstacle of `kind`
pub fn footprint_size<R: Rng>(kind: ObstacleKind, rng: &mut R, canvas_width: f32) -> Vec2 {
    match kind.descriptor().footprint {
        Footprint::Fixed { w, h } => Vec2::new(w, h),
        Footprint::Scaled { w, h, min, max } => Vec2::new(w, h) * rng.random_range(min..max),
        Footprint::FullWidth { h } => Vec2::new(canvas_width, h),
    }
}

/// Find a spot just above the canvas that keeps `margin` clear of every
/// existing obstacle. Gives up after `max_attempts` candidates.
pub fn place<R: Rng>(
    kind: ObstacleKind,
    size: Vec2,
    rng: &mut R,
    existing: &[Obstacle],
    canvas_width: f32,
    tuning: &SpawnTuning,
) -> Option<Rect> {
    for _ in 0..tuning.max_attempts {
        let x = if kind.is_pinned() {
            0.0
        } else {
            rng.random::<f32>() * (canvas_width - size.x).max(0.0)
        };
        let candidate = Rect::new(x, -size.y, size.x, size.y);
        if !crowds(&candidate, existing, tuning.margin) {
            return Some(candidate);
        }
    }
    None
}

/// Expanded-box overlap against every existing obstacle
fn crowds(candidate: &Rect, existing: &[Obstacle], margin: f32) -> bool {
    let padded = candidate.expand(margin);
    existing
        .iter()
        .any(|ob| padded.overlaps(&ob.rect.expand(margin)))
}
