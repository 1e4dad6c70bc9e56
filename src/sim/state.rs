//! Game state and core simulation types
//!
//! Everything a session mutates lives here, so a run can be replayed from a
//! seed, a tuning sheet, clock readings and inputs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::charges::JumpCharges;
use super::collision::Rect;
use super::difficulty::Difficulty;
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use super::spawn::Spawner;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; world frozen until acknowledged
    GameOver,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { kind: ObstacleKind },
    JumpsRecharged,
    StarfishCollected { healed: bool },
    WaterfallRidden,
    Evaded { kind: ObstacleKind },
    Damaged { kind: ObstacleKind, lives_left: u8 },
    GameOver { score: u64 },
}

/// Complete world state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub lives: u8,
    /// Whole part of `distance`
    pub score: u64,
    pub distance: f64,
    /// Clock reading (ms) when the run started
    pub started_ms: f64,
    /// Frames simulated so far
    pub frame: u64,
    pub difficulty: Difficulty,
    pub charges: JumpCharges,
    pub spawner: Spawner,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Background wave scroll, wraps at the line spacing
    pub water_offset: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run
    pub fn new(seed: u64, tuning: Tuning, now_ms: f64) -> Self {
        let canvas = tuning.canvas_size();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            lives: tuning.max_lives,
            score: 0,
            distance: 0.0,
            started_ms: now_ms,
            frame: 0,
            difficulty: Difficulty::new(&tuning.difficulty),
            charges: JumpCharges::new(tuning.max_jumps, tuning.jump_cooldown_secs),
            spawner: Spawner::default(),
            player: Player::new(&tuning.player, canvas),
            obstacles: Vec::new(),
            water_offset: 0.0,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn canvas(&self) -> Vec2 {
        self.tuning.canvas_size()
    }

    pub fn speed(&self) -> f32 {
        self.difficulty.speed
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.started_ms
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add an obstacle at `rect`, returning its ID
    pub fn push_obstacle(&mut self, kind: ObstacleKind, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        let width = self.tuning.canvas_width;
        self.obstacles.push(Obstacle::new(id, kind, rect, width));
        id
    }

    /// Credit distance and re-derive the score from it
    pub fn add_distance(&mut self, amount: f64) {
        self.distance += amount;
        self.score = self.distance.floor().max(0.0) as u64;
    }
}
