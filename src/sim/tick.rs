//! Per-frame simulation step
//!
//! A frame is split in two halves so the renderer can draw between them:
//! `begin_frame` (cooldowns, speed, player, spawn) and `end_frame`
//! (scroll + collide, purge, score). `tick` runs both back to back.

use super::collision::{Outcome, resolve};
use super::input::InputState;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{WATER_LINE_SPACING, WATER_LINE_SPEED_FACTOR};

/// Scroll the background waves by the previous frame's speed
pub fn advance_background(state: &mut GameState) {
    state.water_offset += state.speed() * WATER_LINE_SPEED_FACTOR;
    if state.water_offset >= WATER_LINE_SPACING {
        state.water_offset = 0.0;
    }
}

/// Cooldowns, speed, player movement and spawning
pub fn begin_frame(state: &mut GameState, input: &mut InputState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    if state.charges.refresh(now_ms) {
        events.push(GameEvent::JumpsRecharged);
    }

    let elapsed = state.elapsed_ms(now_ms);
    state.difficulty.update(elapsed, &state.tuning.difficulty);

    let canvas = state.canvas();
    state.player.update(
        input,
        &mut state.charges,
        now_ms,
        &state.tuning.player,
        canvas,
    );

    let speed = state.speed();
    let spawned = state.spawner.try_spawn(
        &mut state.rng,
        &state.obstacles,
        speed,
        now_ms,
        canvas.x,
        &state.tuning.spawn,
    );
    if let Some((kind, rect)) = spawned {
        state.push_obstacle(kind, rect);
        events.push(GameEvent::Spawned { kind });
    }

    events
}

/// Scroll and collide every obstacle, purge, then accrue distance
pub fn end_frame(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    let hitbox = state.player.hitbox(state.tuning.hitbox_inset);
    let speed = state.speed();
    let mut removed: Vec<u32> = Vec::new();

    for i in 0..state.obstacles.len() {
        state.obstacles[i].scroll(speed);

        let (id, kind, touching) = {
            let ob = &state.obstacles[i];
            (ob.id, ob.kind, hitbox.overlaps(&ob.rect))
        };
        // Nothing resolves after the run has ended this frame
        if !touching || state.phase != GamePhase::Playing {
            continue;
        }

        match resolve(kind, &state.player.stance()) {
            Outcome::Collect => {
                removed.push(id);
                let healed = state.lives < state.tuning.max_lives;
                if healed {
                    state.lives += 1;
                } else {
                    state.add_distance(state.tuning.starfish_bonus as f64);
                }
                events.push(GameEvent::StarfishCollected { healed });
            }
            Outcome::Ignore => {}
            Outcome::Evade => events.push(GameEvent::Evaded { kind }),
            Outcome::Boost => {
                let frames = state.tuning.difficulty.waterfall_boost_frames;
                state.difficulty.boost(frames);
                state.player.start_dip();
                events.push(GameEvent::WaterfallRidden);
            }
            Outcome::Damage => {
                removed.push(id);
                state.lives = state.lives.saturating_sub(1);
                state.player.take_hit(&state.tuning.player);
                events.push(GameEvent::Damaged {
                    kind,
                    lives_left: state.lives,
                });
                if state.lives == 0 {
                    state.phase = GamePhase::GameOver;
                    events.push(GameEvent::GameOver { score: state.score });
                }
            }
        }
    }

    let bottom = state.tuning.canvas_height;
    state
        .obstacles
        .retain(|ob| !removed.contains(&ob.id) && !ob.is_past(bottom));

    let gained = (speed * state.tuning.distance_per_speed) as f64;
    state.add_distance(gained);
    state.frame += 1;

    events
}

/// Advance the world by one full frame
pub fn tick(state: &mut GameState, input: &mut InputState, now_ms: f64) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }
    advance_background(state);
    let mut events = begin_frame(state, input, now_ms);
    events.extend(end_frame(state));
    events
}
