//! Collision detection and resolution
//!
//! Detection is a strict axis-aligned box test. Resolution maps an obstacle's
//! contact policy and the player's current stance to a single outcome; the
//! tick applies that outcome to the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::{Contact, ObstacleKind};

/// Axis-aligned rectangle in canvas pixel space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Proper intersection on both axes; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Grow by `margin` on every side
    pub fn expand(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Rect {
        self.expand(-margin)
    }

    /// Same-centre rectangle of a different size
    pub fn centered_resize(&self, size: Vec2) -> Rect {
        Rect {
            pos: self.center() - size * 0.5,
            size,
        }
    }
}

/// The parts of the player's state that decide how a contact resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stance {
    pub rotating: bool,
    pub invulnerable: bool,
    pub jumping: bool,
    pub dipping: bool,
    /// Diving posture (dive held with stamina)
    pub flipped: bool,
}

/// What a single contact does to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pickup consumed: heal or bonus, obstacle removed
    Collect,
    /// No effect at all, obstacle stays
    Ignore,
    /// Dodged by the player's maneuver, obstacle stays
    Evade,
    /// Rode the rapids: speed boost and forced dip, obstacle stays
    Boost,
    /// Lose a life and spin, obstacle removed
    Damage,
}

/// Resolve a contact. First matching rule wins.
pub fn resolve(kind: ObstacleKind, stance: &Stance) -> Outcome {
    let contact = kind.descriptor().contact;

    if contact == Contact::Pickup {
        return Outcome::Collect;
    }
    if stance.rotating || stance.invulnerable {
        return Outcome::Ignore;
    }
    // A maneuver already in progress carries the player past anything
    if stance.jumping || stance.dipping {
        return Outcome::Ignore;
    }
    match contact {
        Contact::Rapids => return Outcome::Boost,
        Contact::DiveUnder if stance.flipped => return Outcome::Evade,
        _ => {}
    }
    if stance.jumping && contact.jumpable() {
        return Outcome::Evade;
    }
    Outcome::Damage
}
