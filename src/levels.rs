//! Level descriptors and where they come from.
//!
//! Levels are plain data read once at load time: a validated grid, the player
//! spawn and the sprite manifest.  The built-in pack ships with the game; a
//! TOML pack can replace it through `GameConfig::levels_path`.

use std::f64::consts::FRAC_PI_4;
use std::path::Path;

use serde::Deserialize;

use crate::entities::{Sprite, SpriteKind};
use crate::error::GameError;
use crate::map::TileGrid;

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDescriptor {
    pub x: f64,
    pub y: f64,
    pub kind: SpriteKind,
    pub scale: f64,
    pub mobile: bool,
    pub health: u32,
}

impl SpriteDescriptor {
    pub fn spawn(&self) -> Sprite {
        Sprite::new(self.x, self.y, self.kind, self.scale, self.mobile, self.health)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelDescriptor {
    pub grid: TileGrid,
    pub spawn: (f64, f64),
    pub spawn_angle: f64,
    pub sprites: Vec<SpriteDescriptor>,
}

impl LevelDescriptor {
    pub fn new(
        grid: TileGrid,
        spawn: (f64, f64),
        spawn_angle: f64,
        sprites: Vec<SpriteDescriptor>,
    ) -> Result<Self, GameError> {
        if grid.is_blocking_at(spawn.0, spawn.1) {
            return Err(GameError::SpawnInWall {
                x: spawn.0,
                y: spawn.1,
            });
        }
        if let Some(index) = sprites.iter().position(|s| s.health == 0) {
            return Err(GameError::ZeroSpriteHealth { index });
        }
        Ok(LevelDescriptor {
            grid,
            spawn,
            spawn_angle,
            sprites,
        })
    }
}

/// Pick the level to play.  An out-of-range index is reported, never clamped.
pub fn select(levels: &[LevelDescriptor], index: usize) -> Result<&LevelDescriptor, GameError> {
    levels.get(index).ok_or(GameError::InvalidLevelIndex {
        index,
        available: levels.len(),
    })
}

// ── Built-in pack ─────────────────────────────────────────────────────────────

const LEVEL_0: [[u8; 16]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 2, 0, 3, 0, 4, 4, 0, 2, 0, 3, 3, 0, 1],
    [1, 0, 2, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 3, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 3, 0, 0, 1, 0, 1, 0, 4, 4, 4, 4, 9, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 0, 4, 4, 4, 4, 0, 2, 2, 0, 2, 2, 0, 1],
    [1, 0, 2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1],
    [1, 0, 2, 2, 2, 2, 0, 2, 2, 2, 2, 0, 3, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_1: [[u8; 16]; 11] = [
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 3, 3, 3, 0, 0, 0, 1, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 3, 9, 3, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 0, 0, 3, 3, 3, 0, 0, 0, 1, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

fn imp(x: f64, y: f64) -> SpriteDescriptor {
    SpriteDescriptor { x, y, kind: SpriteKind::Imp, scale: 1.0, mobile: true, health: 40 }
}

fn demon(x: f64, y: f64) -> SpriteDescriptor {
    SpriteDescriptor { x, y, kind: SpriteKind::Demon, scale: 1.2, mobile: true, health: 80 }
}

fn medkit(x: f64, y: f64) -> SpriteDescriptor {
    SpriteDescriptor { x, y, kind: SpriteKind::HealthPickup, scale: 0.5, mobile: false, health: 1 }
}

/// The two levels bundled with the game.
pub fn builtin_levels() -> Result<Vec<LevelDescriptor>, GameError> {
    Ok(vec![
        LevelDescriptor::new(
            TileGrid::from_codes(&LEVEL_0)?,
            (3.5, 3.5),
            FRAC_PI_4,
            vec![imp(5.5, 5.5), imp(7.5, 2.5), medkit(10.5, 10.5), demon(2.5, 8.5)],
        )?,
        // The second level sits behind the first one's exit; winning level 0
        // ends the session, so it only comes up via `start_level = 1`.
        LevelDescriptor::new(
            TileGrid::from_codes(&LEVEL_1)?,
            (1.5, 1.5),
            0.0,
            vec![imp(4.5, 4.5), imp(6.5, 1.5), demon(8.5, 8.5), medkit(1.5, 8.5)],
        )?,
    ])
}

// ── TOML level packs ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LevelPack {
    level: Vec<RawLevel>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    map: Vec<Vec<u8>>,
    player_start: [f64; 2],
    #[serde(default)]
    player_angle: f64,
    #[serde(default)]
    sprites: Vec<RawSprite>,
}

#[derive(Debug, Deserialize)]
struct RawSprite {
    x: f64,
    y: f64,
    kind: u8,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(default)]
    mobile: bool,
    #[serde(default = "default_health")]
    health: u32,
}

fn default_scale() -> f64 {
    1.0
}

fn default_health() -> u32 {
    1
}

impl RawLevel {
    fn into_descriptor(self) -> Result<LevelDescriptor, GameError> {
        let grid = TileGrid::from_codes(&self.map)?;
        let sprites = self
            .sprites
            .into_iter()
            .map(|s| {
                let kind = SpriteKind::from_code(s.kind).ok_or(GameError::UnknownSpriteKind(s.kind))?;
                Ok(SpriteDescriptor {
                    x: s.x,
                    y: s.y,
                    kind,
                    scale: s.scale,
                    mobile: s.mobile,
                    health: s.health,
                })
            })
            .collect::<Result<Vec<_>, GameError>>()?;
        LevelDescriptor::new(
            grid,
            (self.player_start[0], self.player_start[1]),
            self.player_angle,
            sprites,
        )
    }
}

/// Parse a level pack: one `[[level]]` table per level, grids as rows of tile
/// codes, sprites with numeric kind codes.
pub fn parse_levels(contents: &str) -> Result<Vec<LevelDescriptor>, GameError> {
    let pack: LevelPack = toml::from_str(contents).map_err(|source| GameError::Parse {
        path: "<inline>".into(),
        source,
    })?;
    pack.level.into_iter().map(RawLevel::into_descriptor).collect()
}

pub fn load_levels(path: &Path) -> Result<Vec<LevelDescriptor>, GameError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&contents).map_err(|e| match e {
        GameError::Parse { source, .. } => GameError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    log::info!("loaded {} level(s) from {}", levels.len(), path.display());
    Ok(levels)
}
