//! Runtime gameplay configuration loaded from `raycast_shooter.toml`.
//!
//! Every field of [`GameConfig`] defaults to the matching constant below, so
//! a TOML file only needs the values it wants to change.  Rates are per
//! second and are integrated with the clamped frame delta.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GameError;

pub const DEFAULT_CONFIG_PATH: &str = "raycast_shooter.toml";

// ── Camera & rays ─────────────────────────────────────────────────────────────
pub const FOV: f64 = PI / 3.0;
pub const MAX_RAY_STEPS: u32 = 60;
pub const SPRITE_MIN_DEPTH: f64 = 0.1;

// ── Player ────────────────────────────────────────────────────────────────────
pub const MOVE_SPEED: f64 = 3.0;
pub const TURN_SPEED: f64 = 1.5;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const START_RESERVE_AMMO: u32 = 50;
pub const CLIP_SIZE: u32 = 10;
pub const RELOAD_TIME: f64 = 1.5;

// ── Hitscan ───────────────────────────────────────────────────────────────────
pub const SHOT_COOLDOWN: f64 = 0.2;
pub const SHOT_STEP: f64 = 0.05;
pub const SHOT_RANGE: f64 = 20.0;
pub const HIT_RADIUS: f64 = 0.3;
pub const DAMAGE_MIN: u32 = 8;
pub const DAMAGE_MAX: u32 = 15;

// ── Contact ───────────────────────────────────────────────────────────────────
pub const PLAYER_RADIUS: f64 = 0.3;
pub const SPRITE_RADIUS: f64 = 0.3;
pub const CONTACT_DAMAGE: u32 = 5;
pub const PAIN_COOLDOWN: f64 = 0.5;
pub const KNOCKBACK: f64 = 0.1;
pub const PICKUP_HEAL: u32 = 25;

// ── Sprite AI ─────────────────────────────────────────────────────────────────
pub const AI_MIN_RANGE: f64 = 1.5;
pub const AI_MAX_RANGE: f64 = 8.0;
pub const AI_SPEED: f64 = 0.6;
pub const AI_SPEED_JITTER: f64 = 0.2;
pub const AI_TURN_JITTER: f64 = 0.2;

// ── Timing ────────────────────────────────────────────────────────────────────
pub const TARGET_FPS: u32 = 30;
pub const MAX_FRAME_DELTA: f64 = 0.1;
pub const MESSAGE_DURATION: f64 = 5.0;

// ── Shading ───────────────────────────────────────────────────────────────────
pub const WALL_FALLOFF: f64 = 0.1;
pub const WALL_MIN_SHADE: f64 = 0.2;
pub const SIDE_SHADE: f64 = 0.7;
pub const SPRITE_FALLOFF: f64 = 0.15;
pub const SPRITE_MIN_SHADE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Camera & rays ─────────────────────────────────────────────────────────
    pub fov: f64,
    pub max_ray_steps: u32,
    pub sprite_min_depth: f64,

    // ── Player ────────────────────────────────────────────────────────────────
    pub move_speed: f64,
    pub turn_speed: f64,
    pub player_max_health: u32,
    pub start_reserve_ammo: u32,
    pub clip_size: u32,
    pub reload_time: f64,

    // ── Hitscan ───────────────────────────────────────────────────────────────
    pub shot_cooldown: f64,
    pub shot_step: f64,
    pub shot_range: f64,
    pub hit_radius: f64,
    pub damage_min: u32,
    pub damage_max: u32,

    // ── Contact ───────────────────────────────────────────────────────────────
    pub player_radius: f64,
    pub sprite_radius: f64,
    pub contact_damage: u32,
    pub pain_cooldown: f64,
    pub knockback: f64,
    pub pickup_heal: u32,

    // ── Sprite AI ─────────────────────────────────────────────────────────────
    pub ai_min_range: f64,
    pub ai_max_range: f64,
    pub ai_speed: f64,
    pub ai_speed_jitter: f64,
    pub ai_turn_jitter: f64,

    // ── Timing ────────────────────────────────────────────────────────────────
    pub target_fps: u32,
    pub max_frame_delta: f64,
    pub message_duration: f64,

    // ── Shading ───────────────────────────────────────────────────────────────
    pub wall_falloff: f64,
    pub wall_min_shade: f64,
    pub side_shade: f64,
    pub sprite_falloff: f64,
    pub sprite_min_shade: f64,

    // ── Levels ────────────────────────────────────────────────────────────────
    pub start_level: usize,
    /// TOML level pack to play instead of the built-in levels.
    pub levels_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fov: FOV,
            max_ray_steps: MAX_RAY_STEPS,
            sprite_min_depth: SPRITE_MIN_DEPTH,
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            start_reserve_ammo: START_RESERVE_AMMO,
            clip_size: CLIP_SIZE,
            reload_time: RELOAD_TIME,
            shot_cooldown: SHOT_COOLDOWN,
            shot_step: SHOT_STEP,
            shot_range: SHOT_RANGE,
            hit_radius: HIT_RADIUS,
            damage_min: DAMAGE_MIN,
            damage_max: DAMAGE_MAX,
            player_radius: PLAYER_RADIUS,
            sprite_radius: SPRITE_RADIUS,
            contact_damage: CONTACT_DAMAGE,
            pain_cooldown: PAIN_COOLDOWN,
            knockback: KNOCKBACK,
            pickup_heal: PICKUP_HEAL,
            ai_min_range: AI_MIN_RANGE,
            ai_max_range: AI_MAX_RANGE,
            ai_speed: AI_SPEED,
            ai_speed_jitter: AI_SPEED_JITTER,
            ai_turn_jitter: AI_TURN_JITTER,
            target_fps: TARGET_FPS,
            max_frame_delta: MAX_FRAME_DELTA,
            message_duration: MESSAGE_DURATION,
            wall_falloff: WALL_FALLOFF,
            wall_min_shade: WALL_MIN_SHADE,
            side_shade: SIDE_SHADE,
            sprite_falloff: SPRITE_FALLOFF,
            sprite_min_shade: SPRITE_MIN_SHADE,
            start_level: 0,
            levels_path: None,
        }
    }
}

impl GameConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    /// A file that exists but does not parse or validate is an error.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no {} found; using compiled defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GameError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            GameError::Parse { source, .. } => GameError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GameError> {
        let config: GameConfig = toml::from_str(contents).map_err(|source| GameError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        fn invalid(name: &'static str, reason: &str) -> GameError {
            GameError::InvalidConfig {
                name,
                reason: reason.to_string(),
            }
        }

        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(invalid("fov", "must be between 0 and π radians"));
        }
        if self.max_ray_steps == 0 {
            return Err(invalid("max_ray_steps", "must be at least 1"));
        }
        if self.clip_size == 0 {
            return Err(invalid("clip_size", "must be at least 1"));
        }
        if self.player_max_health == 0 {
            return Err(invalid("player_max_health", "must be at least 1"));
        }
        if self.pickup_heal > self.player_max_health {
            return Err(invalid("pickup_heal", "must not exceed player_max_health"));
        }
        if self.contact_damage > self.player_max_health {
            return Err(invalid("contact_damage", "must not exceed player_max_health"));
        }
        if self.damage_min > self.damage_max {
            return Err(invalid("damage_min", "must not exceed damage_max"));
        }
        if self.shot_step <= 0.0 || self.shot_range <= 0.0 {
            return Err(invalid("shot_step", "shot step and range must be positive"));
        }
        if self.ai_min_range >= self.ai_max_range {
            return Err(invalid("ai_min_range", "must be below ai_max_range"));
        }
        if self.target_fps == 0 {
            return Err(invalid("target_fps", "must be at least 1"));
        }
        if self.max_frame_delta <= 0.0 {
            return Err(invalid("max_frame_delta", "must be positive"));
        }
        Ok(())
    }

    /// Squared distance below which a sprite touches the player.
    pub fn contact_dist_sq(&self) -> f64 {
        self.player_radius.powi(2) + self.sprite_radius.powi(2)
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }
}
