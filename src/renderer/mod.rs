//! 2D rendering
//!
//! The scene is drawn through the `Surface` trait so the same drawing code
//! runs against a browser canvas and against a recording surface in tests.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

use glam::Vec2;

use crate::sim::Rect;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;
pub use scene::{draw_game_over, draw_obstacles, draw_player, draw_river};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// CSS font shorthand
    pub font: &'static str,
    pub color: &'static str,
    pub align: TextAlign,
}

/// Cubic bezier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    pub from: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

/// Immediate-mode drawing target
///
/// Colors are CSS color strings. `save`/`restore` bracket transform changes.
pub trait Surface {
    type Image;

    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str);
    fn stroke_curve(&mut self, curve: &Curve, color: &str, width: f32);
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, by: Vec2);
    fn rotate(&mut self, radians: f32);
}
