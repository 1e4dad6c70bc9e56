//! River Run entry point
//!
//! Browser: loads sprites, wires keyboard and menu, and drives the session
//! from `requestAnimationFrame`. Native: runs a seeded headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent};

    use river_run::assets::{self, Sprites};
    use river_run::platform::time::BrowserClock;
    use river_run::renderer::CanvasSurface;
    use river_run::{FrameOutcome, KeyResponse, Session, Tuning};

    /// Where sprite files are served from
    const SPRITE_BASE_URL: &str = "assets/";

    /// Game instance holding all state
    struct Game {
        session: Session<BrowserClock>,
        surface: CanvasSurface,
        sprites: Sprites<HtmlImageElement>,
        /// Pending animation frame, if the loop is scheduled
        frame_id: Option<i32>,
    }

    impl Game {
        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let hud = self.session.hud();
            set_text(&document, "lives", &hud.lives.to_string());
            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "speed", &hud.speed);
            set_text(&document, "jumps", &hud.jumps);
        }

        fn update_menu(&self) {
            let Some(document) = document() else { return };
            set_text(
                &document,
                "highScore",
                &format!("High score: {}", self.session.high_score()),
            );
            if let Some(menu) = document
                .get_element_by_id("menuScreen")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if self.session.is_menu_open() { "flex" } else { "none" };
                let _ = menu.style().set_property("display", display);
            }
        }

        fn cancel_frame(&mut self) {
            if let Some(id) = self.frame_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("River Run starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let tuning = load_tuning(&document);
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);
        let surface = CanvasSurface::new(&canvas)?;

        // The menu only appears once every load attempt has settled
        let sprites = assets::preload(SPRITE_BASE_URL).await;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(BrowserClock, tuning, seed),
            surface,
            sprites,
            frame_id: None,
        }));

        setup_input_handlers(&document, game.clone());
        setup_start_button(&document, game.clone());

        {
            let g = game.borrow();
            g.update_hud();
            g.update_menu();
        }

        log::info!("River Run ready");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Auto-repeat would re-arm the jump latch while held
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                if g.session.key_down(&event.key()) == KeyResponse::MenuShown {
                    g.cancel_frame();
                    g.update_menu();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    if !g.session.is_menu_open() {
                        return;
                    }
                    g.cancel_frame();
                    let seed = js_sys::Date::now() as u64;
                    g.session.start(seed);
                    g.update_menu();
                    g.update_hud();
                }
                request_animation_frame(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No start button found; the game cannot be started");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            let Game {
                session,
                surface,
                sprites,
                ..
            } = &mut *g;
            let outcome = session.frame(surface, sprites);
            g.update_hud();
            outcome
        };

        if outcome == FrameOutcome::Reschedule {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("River Run (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let report = headless::run(seed, headless::MAX_FRAMES);
    log::info!(
        "Seed {}: score {} after {} frames ({} lives left), high score {}",
        seed,
        report.score,
        report.frames,
        report.lives,
        report.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use river_run::Session;
    use river_run::platform::{Clock, ManualClock};
    use river_run::sim::{Action, GameState, ObstacleKind};

    /// Five minutes at 60 fps
    pub const MAX_FRAMES: u64 = 60 * 60 * 5;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// How far ahead of the canoe the pilot looks
    const LOOKAHEAD: f32 = 160.0;

    pub struct Report {
        pub score: u64,
        pub frames: u64,
        pub lives: u8,
        pub high_score: u64,
    }

    /// Play one seeded run with the scripted pilot
    pub fn run(seed: u64, max_frames: u64) -> Report {
        let mut session = Session::new(ManualClock::new(0.0), Default::default(), seed);
        session.start(seed);

        while !session.is_game_over() && session.state().frame < max_frames {
            let (steer, jump) = pilot(session.state());
            session.input.set(Action::MoveLeft, steer < 0.0);
            session.input.set(Action::MoveRight, steer > 0.0);
            if jump {
                session.input.press(Action::Jump);
            }
            session.clock().advance(FRAME_MS);
            session.step();
        }

        session.show_menu();
        log::debug!("Survived {:.1}s", session.clock().now_ms() / 1000.0);
        let state = session.state();
        Report {
            score: state.score,
            frames: state.frame,
            lives: state.lives,
            high_score: session.high_score(),
        }
    }

    /// Steer away from the nearest threat ahead; jump if it is already close
    fn pilot(state: &GameState) -> (f32, bool) {
        let hit = state.player.hitbox(state.tuning.hitbox_inset);
        let threat = state
            .obstacles
            .iter()
            .filter(|o| !o.kind.is_pinned() && o.kind != ObstacleKind::Starfish)
            .filter(|o| o.rect.bottom() > hit.top() - LOOKAHEAD && o.rect.top() < hit.bottom())
            .filter(|o| o.rect.right() > hit.left() && o.rect.left() < hit.right())
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));

        match threat {
            Some(ob) => {
                let steer = if ob.rect.center().x > hit.center().x {
                    -1.0
                } else {
                    1.0
                };
                let close = ob.rect.bottom() > hit.top() - state.speed() * 4.0;
                (steer, close && !state.player.is_jumping())
            }
            None => (0.0, false),
        }
    }
}
