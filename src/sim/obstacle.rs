//! River obstacles and their per-type descriptor table

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Log,
    Rock,
    Fish,
    Fisherman,
    Whirlpool,
    Waterfall,
    LowBridge,
    Starfish,
}

/// Logical (collision) size of a freshly spawned obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    Fixed { w: f32, h: f32 },
    /// Both dimensions scaled by one factor drawn from `[min, max)`
    Scaled { w: f32, h: f32, min: f32, max: f32 },
    /// Spans the whole canvas, pinned to x = 0
    FullWidth { h: f32 },
}

/// Where the sprite is drawn relative to the collision box
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderBox {
    Logical,
    /// Oversized sprite sharing the collision box centre
    Centered { w: f32, h: f32 },
    FullWidth,
}

/// Draw order relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    BelowPlayer,
    AbovePlayer,
}

/// How the obstacle reacts to touching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Consumed on touch in any player state
    Pickup,
    /// Always ridden through: boosts the river and forces a dip
    Rapids,
    /// Passable only in the diving posture
    DiveUnder,
    /// Plain hazard
    Hazard { jumpable: bool },
}

impl Contact {
    /// Whether a jump carries the player over it
    pub fn jumpable(&self) -> bool {
        matches!(self, Contact::Hazard { jumpable: true })
    }
}

/// Everything type-specific about an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDescriptor {
    /// Sprite key and placeholder label
    pub name: &'static str,
    pub footprint: Footprint,
    pub render: RenderBox,
    pub layer: Layer,
    pub contact: Contact,
    /// Fill used when the sprite is missing
    pub placeholder_color: &'static str,
}

const LOG: KindDescriptor = KindDescriptor {
    name: "log",
    footprint: Footprint::Scaled { w: 120.0, h: 61.0, min: 0.8, max: 1.5 },
    render: RenderBox::Logical,
    layer: Layer::BelowPlayer,
    contact: Contact::Hazard { jumpable: true },
    placeholder_color: "gray",
};

const ROCK: KindDescriptor = KindDescriptor {
    name: "rock",
    footprint: Footprint::Fixed { w: 40.0, h: 40.0 },
    render: RenderBox::Logical,
    layer: Layer::BelowPlayer,
    contact: Contact::Hazard { jumpable: true },
    placeholder_color: "gray",
};

const FISH: KindDescriptor = KindDescriptor {
    name: "fish",
    footprint: Footprint::Fixed { w: 80.0, h: 38.0 },
    render: RenderBox::Logical,
    layer: Layer::BelowPlayer,
    contact: Contact::Hazard { jumpable: true },
    placeholder_color: "gray",
};

const FISHERMAN: KindDescriptor = KindDescriptor {
    name: "fisherman",
    footprint: Footprint::Fixed { w: 51.0, h: 115.0 },
    render: RenderBox::Logical,
    layer: Layer::BelowPlayer,
    contact: Contact::Hazard { jumpable: true },
    placeholder_color: "gray",
};

const WHIRLPOOL: KindDescriptor = KindDescriptor {
    name: "whirlpool",
    footprint: Footprint::Fixed { w: 100.0, h: 100.0 },
    render: RenderBox::Centered { w: 483.0, h: 250.0 },
    layer: Layer::BelowPlayer,
    contact: Contact::Hazard { jumpable: false },
    placeholder_color: "rgba(255, 0, 0, 0.4)",
};

const WATERFALL: KindDescriptor = KindDescriptor {
    name: "waterfall",
    footprint: Footprint::FullWidth { h: 97.0 },
    render: RenderBox::FullWidth,
    layer: Layer::BelowPlayer,
    contact: Contact::Rapids,
    placeholder_color: "gray",
};

const LOW_BRIDGE: KindDescriptor = KindDescriptor {
    name: "lowbridge",
    footprint: Footprint::FullWidth { h: 80.0 },
    render: RenderBox::FullWidth,
    layer: Layer::AbovePlayer,
    contact: Contact::DiveUnder,
    placeholder_color: "brown",
};

const STARFISH: KindDescriptor = KindDescriptor {
    name: "starfish",
    footprint: Footprint::Fixed { w: 60.0, h: 60.0 },
    render: RenderBox::Logical,
    layer: Layer::BelowPlayer,
    contact: Contact::Pickup,
    placeholder_color: "yellow",
};

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 8] = [
        ObstacleKind::Log,
        ObstacleKind::Rock,
        ObstacleKind::Fish,
        ObstacleKind::Fisherman,
        ObstacleKind::Whirlpool,
        ObstacleKind::Waterfall,
        ObstacleKind::LowBridge,
        ObstacleKind::Starfish,
    ];

    pub fn descriptor(self) -> &'static KindDescriptor {
        match self {
            ObstacleKind::Log => &LOG,
            ObstacleKind::Rock => &ROCK,
            ObstacleKind::Fish => &FISH,
            ObstacleKind::Fisherman => &FISHERMAN,
            ObstacleKind::Whirlpool => &WHIRLPOOL,
            ObstacleKind::Waterfall => &WATERFALL,
            ObstacleKind::LowBridge => &LOW_BRIDGE,
            ObstacleKind::Starfish => &STARFISH,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Full-width types are pinned to the left edge
    pub fn is_pinned(self) -> bool {
        matches!(self.descriptor().footprint, Footprint::FullWidth { .. })
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Collision box
    pub rect: Rect,
    /// Sprite box (may be larger than the collision box)
    pub render_rect: Rect,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, rect: Rect, canvas_width: f32) -> Self {
        let render_rect = match kind.descriptor().render {
            RenderBox::Logical => rect,
            RenderBox::Centered { w, h } => rect.centered_resize(Vec2::new(w, h)),
            RenderBox::FullWidth => Rect::new(0.0, rect.top(), canvas_width, rect.size.y),
        };
        Self {
            id,
            kind,
            rect,
            render_rect,
        }
    }

    pub fn descriptor(&self) -> &'static KindDescriptor {
        self.kind.descriptor()
    }

    /// Drift downstream by `dy` pixels
    pub fn scroll(&mut self, dy: f32) {
        self.rect.pos.y += dy;
        self.render_rect.pos.y += dy;
    }

    /// True once the top edge has left the bottom of the canvas
    pub fn is_past(&self, canvas_height: f32) -> bool {
        self.rect.top() >= canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whirlpool_renders_centered() {
        let rect = Rect::new(200.0, -100.0, 100.0, 100.0);
        let ob = Obstacle::new(1, ObstacleKind::Whirlpool, rect, 800.0);
        assert_eq!(ob.render_rect.size, Vec2::new(483.0, 250.0));
        assert_eq!(ob.render_rect.center(), rect.center());
    }

    #[test]
    fn test_scroll_moves_both_boxes() {
        let rect = Rect::new(0.0, -80.0, 800.0, 80.0);
        let mut ob = Obstacle::new(1, ObstacleKind::LowBridge, rect, 800.0);
        ob.scroll(3.5);
        assert_eq!(ob.rect.top(), -76.5);
        assert_eq!(ob.render_rect.top(), -76.5);
        assert_eq!(ob.render_rect.size.x, 800.0);
    }

    #[test]
    fn test_past_bottom_edge() {
        let mut ob = Obstacle::new(1, ObstacleKind::Rock, Rect::new(10.0, 590.0, 40.0, 40.0), 800.0);
        assert!(!ob.is_past(600.0));
        ob.scroll(10.0);
        assert!(ob.is_past(600.0));
    }

    #[test]
    fn test_descriptor_policies() {
        assert!(ObstacleKind::Waterfall.is_pinned());
        assert!(ObstacleKind::LowBridge.is_pinned());
        assert!(!ObstacleKind::Log.is_pinned());
        assert_eq!(ObstacleKind::LowBridge.descriptor().layer, Layer::AbovePlayer);
        assert!(!ObstacleKind::Whirlpool.descriptor().contact.jumpable());
        assert!(!ObstacleKind::LowBridge.descriptor().contact.jumpable());
        assert!(ObstacleKind::Fisherman.descriptor().contact.jumpable());
        // Sprite keys are unique
        let mut names: Vec<_> = ObstacleKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ObstacleKind::ALL.len());
    }
}
