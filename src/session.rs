//! Session controller: menu, active run, game over
//!
//! Owns the clock, the current run and the in-memory high score table. The
//! platform layer forwards key events and calls `frame` once per display
//! refresh; the returned `FrameOutcome` says whether to schedule another.

use crate::assets::Sprites;
use crate::highscores::{HighScores, Run};
use crate::hud::Hud;
use crate::platform::{Clock, KeyCommand, command_for_key};
use crate::renderer::{Surface, draw_game_over, draw_obstacles, draw_player, draw_river};
use crate::sim::{
    GameEvent, GameState, InputState, Layer, advance_background, begin_frame, end_frame,
};
use crate::tuning::Tuning;

/// Whether the loop should keep running after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Menu is open; nothing happened and nothing should be scheduled
    Inert,
    /// Schedule the next frame
    Reschedule,
}

/// Result of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    Handled,
    /// Game-over screen acknowledged; the menu is now open
    MenuShown,
}

pub struct Session<C: Clock> {
    clock: C,
    tuning: Tuning,
    /// Written by key events, read once per frame
    pub input: InputState,
    state: GameState,
    menu_open: bool,
    high_scores: HighScores,
    /// Current run already entered in the table
    recorded: bool,
}

impl<C: Clock> Session<C> {
    /// New session showing the menu. The initial state is a placeholder
    /// until `start` is called.
    pub fn new(clock: C, tuning: Tuning, seed: u64) -> Self {
        let now = clock.now_ms();
        Self {
            state: GameState::new(seed, tuning.clone(), now),
            clock,
            tuning,
            input: InputState::default(),
            menu_open: true,
            high_scores: HighScores::new(),
            recorded: true,
        }
    }

    /// Reset everything about the run and close the menu
    pub fn start(&mut self, seed: u64) {
        let now = self.clock.now_ms();
        self.state = GameState::new(seed, self.tuning.clone(), now);
        self.input = InputState::default();
        self.menu_open = false;
        self.recorded = false;
        log::info!("Run started with seed {}", seed);
    }

    /// Open the menu, recording the finished run's score
    pub fn show_menu(&mut self) {
        self.record_run();
        self.menu_open = true;
        log::debug!("Menu shown (high score {})", self.high_score());
    }

    fn record_run(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        let score = self.state.score;
        let run = Run {
            score,
            survived_ms: self.state.elapsed_ms(self.clock.now_ms()),
        };
        match self.high_scores.record(run) {
            Some(1) => log::info!("New high score: {}", score),
            Some(rank) => log::debug!("Score {} ranked #{}", score, rank),
            None => {}
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.best()
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state, self.clock.now_ms())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle a `KeyboardEvent.key` press
    pub fn key_down(&mut self, key: &str) -> KeyResponse {
        match command_for_key(key) {
            Some(KeyCommand::Control(action)) => {
                self.input.press(action);
                KeyResponse::Handled
            }
            Some(KeyCommand::Confirm) if !self.menu_open && self.state.is_over() => {
                self.show_menu();
                KeyResponse::MenuShown
            }
            _ => KeyResponse::Ignored,
        }
    }

    /// Handle a `KeyboardEvent.key` release
    pub fn key_up(&mut self, key: &str) -> KeyResponse {
        match command_for_key(key) {
            Some(KeyCommand::Control(action)) => {
                self.input.release(action);
                KeyResponse::Handled
            }
            _ => KeyResponse::Ignored,
        }
    }

    /// Run one frame, drawing to `surface` between the update halves
    pub fn frame<S: Surface>(&mut self, surface: &mut S, sprites: &Sprites<S::Image>) -> FrameOutcome {
        if self.menu_open {
            return FrameOutcome::Inert;
        }
        if self.state.is_over() {
            draw_game_over(surface, self.state.canvas());
            return FrameOutcome::Reschedule;
        }

        let now = self.clock.now_ms();
        advance_background(&mut self.state);
        draw_river(surface, &self.state);

        let mut events = begin_frame(&mut self.state, &mut self.input, now);

        draw_obstacles(surface, &self.state, sprites, Layer::BelowPlayer);
        draw_player(surface, &self.state, sprites);
        draw_obstacles(surface, &self.state, sprites, Layer::AbovePlayer);

        events.extend(end_frame(&mut self.state));
        self.handle_events(&events);
        FrameOutcome::Reschedule
    }

    /// One frame without drawing
    pub fn step(&mut self) -> FrameOutcome {
        if self.menu_open {
            return FrameOutcome::Inert;
        }
        if self.state.is_over() {
            return FrameOutcome::Reschedule;
        }

        let now = self.clock.now_ms();
        advance_background(&mut self.state);
        let mut events = begin_frame(&mut self.state, &mut self.input, now);
        events.extend(end_frame(&mut self.state));
        self.handle_events(&events);
        FrameOutcome::Reschedule
    }

    fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Spawned { kind } => log::trace!("Spawned {}", kind.name()),
                GameEvent::JumpsRecharged => log::debug!("Jump charges recharged"),
                GameEvent::StarfishCollected { healed } => {
                    log::debug!("Starfish collected (healed: {})", healed)
                }
                GameEvent::WaterfallRidden => log::debug!("Riding the waterfall"),
                GameEvent::Evaded { kind } => log::debug!("Evaded {}", kind.name()),
                GameEvent::Damaged { kind, lives_left } => {
                    log::debug!("Hit {} ({} lives left)", kind.name(), lives_left)
                }
                GameEvent::GameOver { score } => {
                    log::info!("Game over with score {}", score);
                    self.record_run();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;
    use crate::renderer::scene::recording::{Call, RecordingSurface};
    use crate::sim::{ObstacleKind, Rect};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.spawn.base_chance = 0.0;
        tuning.spawn.chance_per_speed = 0.0;
        tuning
    }

    fn session() -> Session<ManualClock> {
        Session::new(ManualClock::new(0.0), quiet_tuning(), 7)
    }

    /// Put a rock right on the player so the next frame costs a life
    fn drop_rock(session: &mut Session<ManualClock>) {
        let hit = session.state.player.hitbox(session.tuning.hitbox_inset);
        let y = hit.top() - session.state.speed();
        session
            .state
            .push_obstacle(ObstacleKind::Rock, Rect::new(hit.left(), y, 40.0, 40.0));
    }

    fn lose_all_lives(session: &mut Session<ManualClock>) {
        while !session.is_game_over() {
            // Wait out the spin and the invulnerability that follows
            while session.state.player.invulnerable {
                session.clock.advance(FRAME_MS);
                session.step();
            }
            drop_rock(session);
            session.clock.advance(FRAME_MS);
            session.step();
        }
    }

    #[test]
    fn test_menu_is_inert() {
        let mut s = session();
        let mut surface = RecordingSurface::default();
        assert!(s.is_menu_open());
        assert_eq!(s.frame(&mut surface, &Sprites::empty()), FrameOutcome::Inert);
        assert!(surface.calls.is_empty());
        assert_eq!(s.step(), FrameOutcome::Inert);
        assert_eq!(s.state().frame, 0);
    }

    #[test]
    fn test_frame_draw_order() {
        let mut s = session();
        s.start(7);
        s.state
            .push_obstacle(ObstacleKind::LowBridge, Rect::new(0.0, 10.0, 800.0, 80.0));
        s.state
            .push_obstacle(ObstacleKind::Log, Rect::new(300.0, 10.0, 120.0, 61.0));
        let mut sprites = Sprites::empty();
        sprites.insert("lowbridge", "lowbridge");
        sprites.insert("log", "log");
        sprites.insert("kayak_normal", "kayak_normal");

        let mut surface = RecordingSurface::default();
        assert_eq!(s.frame(&mut surface, &sprites), FrameOutcome::Reschedule);
        assert_eq!(surface.images(), vec!["log", "kayak_normal", "lowbridge"]);
        // River first
        assert!(matches!(&surface.calls[0], Call::FillRect(_, c) if c == "#005f88"));
        assert_eq!(s.state().frame, 1);
    }

    #[test]
    fn test_restart_matches_fresh_state() {
        let mut s = session();
        s.start(11);
        s.input.press(crate::sim::Action::Jump);
        for _ in 0..200 {
            s.clock.advance(FRAME_MS);
            s.step();
        }
        drop_rock(&mut s);
        s.clock.advance(FRAME_MS);
        s.step();
        assert!(s.state().lives < 3 || s.state().player.is_jumping());

        s.start(11);
        let fresh = GameState::new(11, quiet_tuning(), s.clock.now_ms());
        assert_eq!(s.state().lives, fresh.lives);
        assert_eq!(s.state().score, fresh.score);
        assert_eq!(s.state().distance, fresh.distance);
        assert_eq!(s.state().speed(), fresh.speed());
        assert_eq!(s.state().player, fresh.player);
        assert_eq!(s.state().obstacles, fresh.obstacles);
        assert_eq!(s.state().charges.remaining(), 3);
        assert_eq!(s.input, InputState::default());
        assert!(!s.is_menu_open());
    }

    #[test]
    fn test_game_over_freezes_until_confirm() {
        let mut s = session();
        s.start(3);
        lose_all_lives(&mut s);
        let frame = s.state().frame;

        let mut surface = RecordingSurface::default();
        assert_eq!(s.frame(&mut surface, &Sprites::empty()), FrameOutcome::Reschedule);
        assert_eq!(surface.texts(), vec!["GAME OVER!", "Press ENTER for Menu"]);
        assert_eq!(s.state().frame, frame);

        // Gameplay keys do not leave the screen
        assert_eq!(s.key_down("ArrowLeft"), KeyResponse::Handled);
        assert!(!s.is_menu_open());

        assert_eq!(s.key_down("Enter"), KeyResponse::MenuShown);
        assert!(s.is_menu_open());
        assert_eq!(s.key_down("Escape"), KeyResponse::Ignored);
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let mut s = session();
        s.start(3);
        assert_eq!(s.key_down("Enter"), KeyResponse::Ignored);
        assert!(!s.is_menu_open());
    }

    #[test]
    fn test_high_score_kept_across_runs() {
        let mut s = session();
        s.start(5);
        for _ in 0..600 {
            s.clock.advance(FRAME_MS);
            s.step();
        }
        lose_all_lives(&mut s);
        let first = s.state().score;
        assert!(first > 0);
        assert_eq!(s.high_score(), first);

        s.key_down("Enter");
        assert_eq!(s.high_score(), first);
        assert_eq!(s.high_scores.runs().len(), 1);

        // A shorter second run does not lower the record
        s.start(6);
        lose_all_lives(&mut s);
        s.show_menu();
        assert!(s.state().score < first);
        assert_eq!(s.high_score(), first);
        assert_eq!(s.high_scores.runs().len(), 2);
    }

    #[test]
    fn test_key_events_drive_input() {
        let mut s = session();
        s.start(1);
        s.key_down("a");
        assert!(s.input.left);
        s.key_up("a");
        assert!(!s.input.left);
        assert_eq!(s.key_down("F5"), KeyResponse::Ignored);
    }
}
