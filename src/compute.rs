//! Game state machine and the per-tick update.
//!
//! `tick` takes an immutable reference to the current `GameState` (and an
//! RNG handle) and returns a brand-new `GameState`.  Side effects are limited
//! to the injected RNG; sounds are queued on the returned state.

use rand::Rng;

use crate::combat;
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Message, Player, SoundEvent, Tile};
use crate::error::GameError;
use crate::input::InputState;
use crate::levels::{self, LevelDescriptor};
use crate::movement;
use crate::sprites;

pub const VICTORY_MESSAGE: &str = "YOU ARE VICTORIOUS!";

// ── Constructors ─────────────────────────────────────────────────────────────

/// Load level `index` and spawn the player at its start point.
pub fn init_state(
    levels: &[LevelDescriptor],
    index: usize,
    config: GameConfig,
) -> Result<GameState, GameError> {
    config.validate()?;
    let level = levels::select(levels, index)?;

    let player = Player {
        x: level.spawn.0,
        y: level.spawn.1,
        angle: movement::normalize_angle(level.spawn_angle),
        health: config.player_max_health,
        max_health: config.player_max_health,
        reserve_ammo: config.start_reserve_ammo,
        clip_ammo: config.clip_size,
        clip_size: config.clip_size,
        reload_started: None,
        last_shot: None,
        last_pain: None,
    };
    let mut sprites: Vec<_> = level.sprites.iter().map(|d| d.spawn()).collect();
    sprites::refresh_distances(&mut sprites, player.x, player.y);

    log::info!(
        "loaded level {} ({}x{}, {} sprite(s))",
        index,
        level.grid.width(),
        level.grid.height(),
        sprites.len()
    );

    Ok(GameState {
        config,
        grid: level.grid.clone(),
        player,
        sprites,
        status: GameStatus::Playing,
        level_index: index,
        level_count: levels.len(),
        clock: 0.0,
        frame: 0,
        show_map: false,
        message: None,
        sounds: Vec::new(),
    })
}

// ── State machine ────────────────────────────────────────────────────────────

/// Leave PLAYING for a terminal state.  Terminal states never change again,
/// so a second request is ignored.
pub fn transition(state: &mut GameState, to: GameStatus) -> bool {
    if state.status != GameStatus::Playing || to == GameStatus::Playing {
        return false;
    }
    state.status = to;
    match to {
        GameStatus::GameOver => log::info!("game over at {:.2}s", state.clock),
        GameStatus::GameWon => {
            log::info!("level {} complete at {:.2}s", state.level_index, state.clock);
            state.sounds.push(SoundEvent::LevelComplete);
            state.message = Some(Message {
                text: VICTORY_MESSAGE.to_string(),
                expires_at: state.clock + state.config.message_duration,
            });
        }
        GameStatus::Playing => {}
    }
    true
}

fn check_exit(state: &mut GameState) {
    if state.grid.tile_at(state.player.x, state.player.y) == Some(Tile::Exit) {
        transition(state, GameStatus::GameWon);
    }
}

// ── Per-frame tick (RNG is injected) ─────────────────────────────────────────

/// Advance the simulation by `dt` seconds of real time.
pub fn tick(
    state: &GameState,
    input: &InputState,
    dt: f64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    advance(&mut next, input, dt, rng);
    next
}

/// In-place form of [`tick`].
pub fn advance(state: &mut GameState, input: &InputState, dt: f64, rng: &mut impl Rng) {
    state.sounds.clear();
    state.frame += 1;

    // A long stall must not teleport anyone or finish a reload instantly.
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.config.max_frame_delta)
    } else {
        0.0
    };
    state.clock += dt;
    if state
        .message
        .as_ref()
        .is_some_and(|m| state.clock >= m.expires_at)
    {
        state.message = None;
    }

    if state.status != GameStatus::Playing {
        return;
    }

    // ── 1. Discrete actions ──────────────────────────────────────────────────
    if input.toggle_map {
        state.show_map = !state.show_map;
    }
    if input.reload {
        combat::start_reload(state);
    }
    if input.fire {
        combat::fire(state, rng);
    }
    combat::finish_reload(state);

    // ── 2. Player motion & contact ───────────────────────────────────────────
    movement::move_player(state, input, dt);
    combat::resolve_contacts(state);
    check_exit(state);
    if state.status != GameStatus::Playing {
        return;
    }

    // ── 3. Sprite AI ─────────────────────────────────────────────────────────
    movement::update_sprites(state, dt, rng);
    let (px, py) = (state.player.x, state.player.y);
    sprites::refresh_distances(&mut state.sprites, px, py);
}
