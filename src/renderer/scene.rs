//! Scene drawing: river, obstacles, player and overlays

use glam::Vec2;

use super::{Curve, Surface, TextAlign, TextStyle};
use crate::assets::{PLAYER_FLIPPED_SPRITE, PLAYER_SPRITE, Sprites};
use crate::consts::{STAMINA_LOW, WATER_LINE_SPACING};
use crate::sim::{GameState, Layer, Obstacle, Player, Rect};
use crate::tuning::PlayerTuning;

pub const RIVER_COLOR: &str = "#005f88";
pub const WAVE_COLOR_LIGHT: &str = "rgba(255, 255, 255, 0.3)";
pub const WAVE_COLOR_BLUE: &str = "rgba(0, 179, 255, 0.4)";

const STAMINA_BAR_HEIGHT: f32 = 5.0;
/// Gap between the bar and the top of the canoe
const STAMINA_BAR_GAP: f32 = 10.0;
const WAVE_BEND: f32 = 5.0;

const LABEL_STYLE: TextStyle = TextStyle {
    font: "12px Arial",
    color: "white",
    align: TextAlign::Left,
};

/// Flat water plus two families of scrolling wave lines
pub fn draw_river<S: Surface>(surface: &mut S, state: &GameState) {
    let canvas = state.canvas();
    surface.fill_rect(Rect::new(0.0, 0.0, canvas.x, canvas.y), RIVER_COLOR);

    let half = WATER_LINE_SPACING / 2.0;
    let mut y = -WATER_LINE_SPACING;
    while y < canvas.y + WATER_LINE_SPACING {
        let base = y + state.water_offset;
        surface.stroke_curve(&wave(canvas.x, base, WAVE_BEND), WAVE_COLOR_LIGHT, 1.0);
        surface.stroke_curve(&wave(canvas.x, base + half, -WAVE_BEND), WAVE_COLOR_BLUE, 1.0);
        y += WATER_LINE_SPACING;
    }
}

fn wave(width: f32, y: f32, bend: f32) -> Curve {
    Curve {
        from: Vec2::new(0.0, y),
        ctrl1: Vec2::new(width / 4.0, y + bend),
        ctrl2: Vec2::new(width * 3.0 / 4.0, y - bend),
        to: Vec2::new(width, y),
    }
}

/// Draw every live obstacle on `layer`, in spawn order
pub fn draw_obstacles<S: Surface>(
    surface: &mut S,
    state: &GameState,
    sprites: &Sprites<S::Image>,
    layer: Layer,
) {
    for ob in state.obstacles.iter().filter(|o| o.descriptor().layer == layer) {
        draw_obstacle(surface, ob, sprites);
    }
}

fn draw_obstacle<S: Surface>(surface: &mut S, ob: &Obstacle, sprites: &Sprites<S::Image>) {
    match sprites.get(ob.kind.name()) {
        Some(image) => surface.draw_image(image, ob.render_rect),
        None => {
            surface.fill_rect(ob.rect, ob.descriptor().placeholder_color);
            let at = Vec2::new(ob.rect.left() + 5.0, ob.rect.top() + ob.rect.size.y / 2.0);
            surface.fill_text(ob.kind.name(), at, &LABEL_STYLE);
        }
    }
}

/// Canoe sprite with its stamina bar, or a plain box when the sprite is missing
pub fn draw_player<S: Surface>(surface: &mut S, state: &GameState, sprites: &Sprites<S::Image>) {
    let player = &state.player;
    let tuning = &state.tuning.player;
    let name = if player.flipped {
        PLAYER_FLIPPED_SPRITE
    } else {
        PLAYER_SPRITE
    };

    let Some(image) = sprites.get(name) else {
        let color = if player.flipped { "gray" } else { "red" };
        surface.fill_rect(player.rect(), color);
        return;
    };

    surface.save();
    if player.is_rotating() {
        // Spin about the centre; the bar turns with the canoe
        let half = player.size / 2.0;
        surface.translate(player.pos + half - Vec2::new(0.0, player.jump_offset));
        surface.rotate(player.rotation());
        if player.is_visible() {
            surface.draw_image(image, Rect { pos: -half, size: player.size });
        }
        let bar_origin = Vec2::new(-half.x, -half.y - STAMINA_BAR_GAP);
        draw_stamina_bar(surface, player, tuning, bar_origin);
        surface.restore();
        return;
    }

    if player.is_visible() {
        surface.draw_image(image, scaled_sprite_rect(player, tuning));
    }
    let bar_origin = Vec2::new(
        player.pos.x,
        player.pos.y - STAMINA_BAR_GAP - player.jump_offset,
    );
    draw_stamina_bar(surface, player, tuning, bar_origin);
    surface.restore();
}

/// Sprite box scaled about the bottom centre of the canoe
pub fn scaled_sprite_rect(player: &Player, tuning: &PlayerTuning) -> Rect {
    let scale = player.draw_scale(tuning);
    let size = player.size * scale;
    Rect {
        pos: Vec2::new(
            player.pos.x - (size.x - player.size.x) / 2.0,
            player.pos.y - (size.y - player.size.y),
        ),
        size,
    }
}

fn draw_stamina_bar<S: Surface>(
    surface: &mut S,
    player: &Player,
    tuning: &PlayerTuning,
    origin: Vec2,
) {
    let width = player.size.x;
    let frame = Rect {
        pos: origin,
        size: Vec2::new(width, STAMINA_BAR_HEIGHT),
    };
    let fill = Rect {
        pos: origin,
        size: Vec2::new(width * player.stamina / tuning.max_stamina, STAMINA_BAR_HEIGHT),
    };
    let color = if player.stamina > STAMINA_LOW { "lime" } else { "red" };

    surface.fill_rect(frame, "rgba(0, 0, 0, 0.7)");
    surface.fill_rect(fill, color);
    surface.stroke_rect(frame, "white");
}

/// Dimmed screen with the end-of-run prompt
pub fn draw_game_over<S: Surface>(surface: &mut S, canvas: Vec2) {
    surface.fill_rect(Rect::new(0.0, 0.0, canvas.x, canvas.y), "rgba(0, 0, 0, 0.7)");
    let center = canvas / 2.0;
    surface.fill_text(
        "GAME OVER!",
        center - Vec2::new(0.0, 20.0),
        &TextStyle {
            font: "40px Arial Black",
            color: "white",
            align: TextAlign::Center,
        },
    );
    surface.fill_text(
        "Press ENTER for Menu",
        center + Vec2::new(0.0, 30.0),
        &TextStyle {
            font: "20px Arial",
            color: "white",
            align: TextAlign::Center,
        },
    );
}

#[cfg(test)]
pub(crate) mod recording {
    //! Surface that records calls instead of drawing

    use glam::Vec2;

    use crate::renderer::{Curve, Surface, TextStyle};
    use crate::sim::Rect;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        FillRect(Rect, String),
        StrokeRect(Rect, String),
        Curve(Curve, String),
        Image(&'static str, Rect),
        Text(String, Vec2, TextStyle),
        Save,
        Restore,
        Translate(Vec2),
        Rotate(f32),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        /// Names of drawn images, in order
        pub fn images(&self) -> Vec<&'static str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Image(name, _) => Some(*name),
                    _ => None,
                })
                .collect()
        }

        pub fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(text, _, _) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        /// Images are identified by their sprite name
        type Image = &'static str;

        fn fill_rect(&mut self, rect: Rect, color: &str) {
            self.calls.push(Call::FillRect(rect, color.to_string()));
        }

        fn stroke_rect(&mut self, rect: Rect, color: &str) {
            self.calls.push(Call::StrokeRect(rect, color.to_string()));
        }

        fn stroke_curve(&mut self, curve: &Curve, color: &str, _width: f32) {
            self.calls.push(Call::Curve(*curve, color.to_string()));
        }

        fn draw_image(&mut self, image: &Self::Image, rect: Rect) {
            self.calls.push(Call::Image(image, rect));
        }

        fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
            self.calls.push(Call::Text(text.to_string(), at, *style));
        }

        fn save(&mut self) {
            self.calls.push(Call::Save);
        }

        fn restore(&mut self) {
            self.calls.push(Call::Restore);
        }

        fn translate(&mut self, by: Vec2) {
            self.calls.push(Call::Translate(by));
        }

        fn rotate(&mut self, radians: f32) {
            self.calls.push(Call::Rotate(radians));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;
    use crate::assets::SPRITE_MANIFEST;
    use crate::sim::{ActionMode, ObstacleKind};
    use crate::tuning::Tuning;

    fn all_sprites() -> Sprites<&'static str> {
        let mut sprites = Sprites::empty();
        for &(name, _) in SPRITE_MANIFEST {
            sprites.insert(name, name);
        }
        sprites
    }

    #[test]
    fn test_river_fills_then_draws_wave_pairs() {
        let state = GameState::new(1, Tuning::default(), 0.0);
        let mut surface = RecordingSurface::default();
        draw_river(&mut surface, &state);

        assert_eq!(
            surface.calls[0],
            Call::FillRect(Rect::new(0.0, 0.0, 800.0, 600.0), RIVER_COLOR.to_string())
        );
        // y = -50, 0, ..., 600 gives 14 rows of two lines each
        let curves = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Curve(..)))
            .count();
        assert_eq!(curves, 28);
    }

    #[test]
    fn test_missing_sprite_draws_labelled_placeholder() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.push_obstacle(ObstacleKind::Starfish, Rect::new(100.0, 50.0, 60.0, 60.0));
        let mut surface = RecordingSurface::default();
        draw_obstacles(&mut surface, &state, &Sprites::empty(), Layer::BelowPlayer);

        assert_eq!(
            surface.calls[0],
            Call::FillRect(Rect::new(100.0, 50.0, 60.0, 60.0), "yellow".to_string())
        );
        assert_eq!(surface.texts(), vec!["starfish"]);
    }

    #[test]
    fn test_low_bridge_only_on_upper_layer() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.push_obstacle(ObstacleKind::Rock, Rect::new(10.0, 10.0, 40.0, 40.0));
        state.push_obstacle(ObstacleKind::LowBridge, Rect::new(0.0, 200.0, 800.0, 80.0));
        let sprites = all_sprites();

        let mut below = RecordingSurface::default();
        draw_obstacles(&mut below, &state, &sprites, Layer::BelowPlayer);
        assert_eq!(below.images(), vec!["rock"]);

        let mut above = RecordingSurface::default();
        draw_obstacles(&mut above, &state, &sprites, Layer::AbovePlayer);
        assert_eq!(above.images(), vec!["lowbridge"]);
    }

    #[test]
    fn test_player_placeholder_color_follows_posture() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &Sprites::empty());
        assert_eq!(
            surface.calls,
            vec![Call::FillRect(state.player.rect(), "red".to_string())]
        );

        state.player.flipped = true;
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &Sprites::empty());
        assert_eq!(
            surface.calls,
            vec![Call::FillRect(state.player.rect(), "gray".to_string())]
        );
    }

    #[test]
    fn test_flipped_player_uses_flipped_sprite() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.player.flipped = true;
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &all_sprites());
        assert_eq!(surface.images(), vec![PLAYER_FLIPPED_SPRITE]);
        assert_eq!(surface.calls.first(), Some(&Call::Save));
        assert_eq!(surface.calls.last(), Some(&Call::Restore));
    }

    #[test]
    fn test_flicker_hides_sprite_but_keeps_bar() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.player.invulnerable = true;
        state.player.flicker = 2;
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &all_sprites());
        assert!(surface.images().is_empty());
        assert!(surface
            .calls
            .iter()
            .any(|c| matches!(c, Call::StrokeRect(_, color) if color == "white")));
    }

    #[test]
    fn test_spin_draws_rotated_about_centre() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.player.mode = ActionMode::Rotating {
            timer: 10,
            angle: 1.0,
        };
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &all_sprites());

        let center = state.player.pos + state.player.size / 2.0;
        assert_eq!(surface.calls[1], Call::Translate(center));
        assert_eq!(surface.calls[2], Call::Rotate(1.0));
        assert_eq!(
            surface.calls[3],
            Call::Image(
                PLAYER_SPRITE,
                Rect {
                    pos: -state.player.size / 2.0,
                    size: state.player.size
                }
            )
        );
    }

    #[test]
    fn test_jump_scale_keeps_bottom_centre() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.player.mode = ActionMode::Jumping { progress: 0.5 };
        let rect = scaled_sprite_rect(&state.player, &state.tuning.player);
        let base = state.player.rect();
        assert!((rect.size.x - base.size.x * 1.5).abs() < 1e-3);
        assert!((rect.bottom() - base.bottom()).abs() < 1e-3);
        assert!((rect.center().x - base.center().x).abs() < 1e-3);
    }

    #[test]
    fn test_low_stamina_bar_turns_red() {
        let mut state = GameState::new(1, Tuning::default(), 0.0);
        state.player.stamina = 30.0;
        let mut surface = RecordingSurface::default();
        draw_player(&mut surface, &state, &all_sprites());
        let fill = surface.calls.iter().find_map(|c| match c {
            Call::FillRect(rect, color) if color == "red" => Some(*rect),
            _ => None,
        });
        let fill = fill.expect("stamina fill drawn");
        assert!((fill.size.x - 80.0 * 30.0 / 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut surface = RecordingSurface::default();
        draw_game_over(&mut surface, Vec2::new(800.0, 600.0));
        assert_eq!(surface.texts(), vec!["GAME OVER!", "Press ENTER for Menu"]);
    }
}
