//! Player and sprite motion against the tile grid.

use std::f64::consts::TAU;

use rand::Rng;

use crate::entities::GameState;
use crate::input::InputState;
use crate::map::TileGrid;

/// Apply `(dx, dy)` one axis at a time, X first.  Each axis is committed only
/// if it lands outside a blocking cell, so diagonal pushes into a wall slide
/// along it.  The Y test uses the already-updated X, which makes the outcome
/// at corners depend on axis order.
pub fn slide_move(grid: &TileGrid, x: f64, y: f64, dx: f64, dy: f64) -> (f64, f64) {
    let mut nx = x;
    let mut ny = y;
    if !grid.is_blocking_at(x + dx, ny) {
        nx = x + dx;
    }
    if !grid.is_blocking_at(nx, y + dy) {
        ny = y + dy;
    }
    (nx, ny)
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Walk, strafe and turn the player for one tick.
pub fn move_player(state: &mut GameState, input: &InputState, dt: f64) {
    let cfg = &state.config;
    let player = &mut state.player;
    let step = cfg.move_speed * dt;
    let (sin, cos) = player.angle.sin_cos();

    let mut dx = 0.0;
    let mut dy = 0.0;
    if input.forward {
        dx += step * cos;
        dy += step * sin;
    }
    if input.backward {
        dx -= step * cos;
        dy -= step * sin;
    }
    // The viewer's right is (-sin, cos) with rows growing downward.
    if input.strafe_left {
        dx += step * sin;
        dy -= step * cos;
    }
    if input.strafe_right {
        dx -= step * sin;
        dy += step * cos;
    }
    if dx != 0.0 || dy != 0.0 {
        (player.x, player.y) = slide_move(&state.grid, player.x, player.y, dx, dy);
    }

    let turn = cfg.turn_speed * dt;
    if input.turn_left {
        player.angle -= turn;
    }
    if input.turn_right {
        player.angle += turn;
    }
    player.angle = normalize_angle(player.angle);
}

/// Mobile, living sprites inside the engagement band shuffle toward the
/// player.  A step that would leave an EMPTY cell is dropped.
pub fn update_sprites(state: &mut GameState, dt: f64, rng: &mut impl Rng) {
    let cfg = &state.config;
    let (px, py) = (state.player.x, state.player.y);

    for sprite in state.sprites.iter_mut().filter(|s| s.is_hostile()) {
        let dx = px - sprite.x;
        let dy = py - sprite.y;
        let dist = dx.hypot(dy);
        if dist <= cfg.ai_min_range || dist >= cfg.ai_max_range {
            continue;
        }

        let heading = dy.atan2(dx) + jitter(rng, cfg.ai_turn_jitter);
        let speed = cfg.ai_speed * dt * (1.0 + jitter(rng, cfg.ai_speed_jitter));
        let nx = sprite.x + heading.cos() * speed;
        let ny = sprite.y + heading.sin() * speed;
        if state.grid.is_empty_at(nx, ny) {
            sprite.x = nx;
            sprite.y = ny;
        }
    }
}

fn jitter(rng: &mut impl Rng, amount: f64) -> f64 {
    if amount > 0.0 {
        rng.gen_range(-amount..=amount)
    } else {
        0.0
    }
}
