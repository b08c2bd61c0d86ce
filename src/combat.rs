//! Hitscan shooting, reloading, and what happens when sprites touch the
//! player.

use rand::Rng;

use crate::compute::transition;
use crate::entities::{GameState, GameStatus, SoundEvent, Sprite, SpriteKind};
use crate::map::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The trace reached a sprite; the index is into the sprite list.
    Sprite(usize),
    /// A wall (or the edge of the grid) stopped it.
    Wall,
    /// Out of range without touching anything.
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead; nothing changed.
    Ignored,
    Hurt,
    Killed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    Reloading,
    CoolingDown,
    Empty,
    Fired(ShotOutcome),
}

/// March from `origin` along `angle` in `step`-sized increments.  At each
/// step a wall ends the trace first; otherwise the nearest hostile sprite
/// within `hit_radius` of that point is the target.
pub fn trace_shot(
    grid: &TileGrid,
    sprites: &[Sprite],
    origin: (f64, f64),
    angle: f64,
    step: f64,
    range: f64,
    hit_radius: f64,
) -> ShotOutcome {
    let (sin, cos) = angle.sin_cos();
    let radius_sq = hit_radius * hit_radius;
    let mut dist = step;
    while dist < range {
        let cx = origin.0 + cos * dist;
        let cy = origin.1 + sin * dist;
        if grid.is_blocking_at(cx, cy) {
            return ShotOutcome::Wall;
        }

        let nearest = sprites
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_hostile())
            .map(|(i, s)| (i, (cx - s.x).powi(2) + (cy - s.y).powi(2)))
            .filter(|&(_, d_sq)| d_sq < radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((index, _)) = nearest {
            return ShotOutcome::Sprite(index);
        }
        dist += step;
    }
    ShotOutcome::Nothing
}

/// Subtract `amount`, clamping at zero.  A kill turns the sprite into an
/// immobile corpse.
pub fn apply_damage(sprite: &mut Sprite, amount: u32) -> DamageOutcome {
    if !sprite.alive {
        return DamageOutcome::Ignored;
    }
    sprite.health = sprite.health.saturating_sub(amount);
    if sprite.health == 0 {
        sprite.alive = false;
        sprite.kind = SpriteKind::Corpse;
        sprite.mobile = false;
        DamageOutcome::Killed
    } else {
        DamageOutcome::Hurt
    }
}

/// Begin a timed reload if there is room in the clip and ammo in reserve.
pub fn start_reload(state: &mut GameState) -> bool {
    let p = &mut state.player;
    if p.is_reloading() || p.clip_ammo >= p.clip_size || p.reserve_ammo == 0 {
        return false;
    }
    p.reload_started = Some(state.clock);
    state.sounds.push(SoundEvent::Reload);
    log::debug!("reload started at {:.2}s", state.clock);
    true
}

/// Move ammo from reserve into the clip once the reload timer has run out.
pub fn finish_reload(state: &mut GameState) {
    let p = &mut state.player;
    let Some(started) = p.reload_started else {
        return;
    };
    if state.clock - started < state.config.reload_time {
        return;
    }
    let load = p.clip_size.saturating_sub(p.clip_ammo).min(p.reserve_ammo);
    p.clip_ammo += load;
    p.reserve_ammo -= load;
    p.reload_started = None;
    log::debug!("reloaded {load} round(s); {} in reserve", p.reserve_ammo);
}

/// Pull the trigger.  An empty clip clicks and starts a reload if possible.
pub fn fire(state: &mut GameState, rng: &mut impl Rng) -> FireOutcome {
    if state.player.is_reloading() {
        return FireOutcome::Reloading;
    }
    if state.player.clip_ammo == 0 {
        state.sounds.push(SoundEvent::NoAmmo);
        start_reload(state);
        return FireOutcome::Empty;
    }
    if let Some(last) = state.player.last_shot {
        if state.clock - last < state.config.shot_cooldown {
            return FireOutcome::CoolingDown;
        }
    }

    state.player.clip_ammo -= 1;
    state.player.last_shot = Some(state.clock);
    state.sounds.push(SoundEvent::Shoot);

    let cfg = &state.config;
    let outcome = trace_shot(
        &state.grid,
        &state.sprites,
        (state.player.x, state.player.y),
        state.player.angle,
        cfg.shot_step,
        cfg.shot_range,
        cfg.hit_radius,
    );
    match outcome {
        ShotOutcome::Sprite(index) => {
            let amount = rng.gen_range(cfg.damage_min..=cfg.damage_max);
            match apply_damage(&mut state.sprites[index], amount) {
                DamageOutcome::Killed => {
                    log::debug!("sprite {index} killed");
                    state.sounds.push(SoundEvent::EnemyDeath);
                }
                DamageOutcome::Hurt => state.sounds.push(SoundEvent::EnemyPain),
                DamageOutcome::Ignored => {}
            }
        }
        ShotOutcome::Wall => state.sounds.push(SoundEvent::HitWall),
        ShotOutcome::Nothing => {}
    }
    FireOutcome::Fired(outcome)
}

/// Pickups heal; hostile sprites bite once per pain window and shove the
/// player back if there is room.
pub fn resolve_contacts(state: &mut GameState) {
    let contact_sq = state.config.contact_dist_sq();

    for i in 0..state.sprites.len() {
        if state.status != GameStatus::Playing {
            break;
        }
        let sprite = &state.sprites[i];
        if !sprite.alive {
            continue;
        }
        let (sx, sy) = (sprite.x, sprite.y);
        let (px, py) = (state.player.x, state.player.y);
        if (px - sx).powi(2) + (py - sy).powi(2) >= contact_sq {
            continue;
        }

        if !sprite.mobile {
            if sprite.kind == SpriteKind::HealthPickup
                && state.player.health < state.player.max_health
            {
                let p = &mut state.player;
                p.health = p.health.saturating_add(state.config.pickup_heal).min(p.max_health);
                state.sprites[i].alive = false;
                state.sounds.push(SoundEvent::Pickup);
            }
            continue;
        }

        let cooled = state
            .player
            .last_pain
            .map_or(true, |t| state.clock - t > state.config.pain_cooldown);
        if !cooled {
            continue;
        }
        let p = &mut state.player;
        p.health = p.health.saturating_sub(state.config.contact_damage);
        p.last_pain = Some(state.clock);
        state.sounds.push(SoundEvent::PlayerPain);

        let (dx, dy) = (px - sx, py - sy);
        let norm = dx.hypot(dy);
        if norm > 1e-6 {
            let kx = px + dx / norm * state.config.knockback;
            let ky = py + dy / norm * state.config.knockback;
            if state.grid.is_empty_at(kx, ky) {
                state.player.x = kx;
                state.player.y = ky;
            }
        }

        if state.player.health == 0 {
            transition(state, GameStatus::GameOver);
        }
    }
}
