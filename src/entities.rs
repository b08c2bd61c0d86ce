//! Game entity types. Plain data plus small accessors.

use crate::config::GameConfig;
use crate::map::TileGrid;

// ── Tiles ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallMaterial {
    Brick,
    Stone,
    Wood,
    Metal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall(WallMaterial),
    /// Walkable; stepping onto it wins the level.  Rays pass through it.
    Exit,
}

impl Tile {
    /// Decode a level-data tile code (0 empty, 1 to 4 walls, 9 exit).
    pub fn from_code(code: u8) -> Option<Tile> {
        match code {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Wall(WallMaterial::Brick)),
            2 => Some(Tile::Wall(WallMaterial::Stone)),
            3 => Some(Tile::Wall(WallMaterial::Wood)),
            4 => Some(Tile::Wall(WallMaterial::Metal)),
            9 => Some(Tile::Exit),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Wall(WallMaterial::Brick) => 1,
            Tile::Wall(WallMaterial::Stone) => 2,
            Tile::Wall(WallMaterial::Wood) => 3,
            Tile::Wall(WallMaterial::Metal) => 4,
            Tile::Exit => 9,
        }
    }

    /// Walls block movement, rays and shots.
    pub fn is_blocking(self) -> bool {
        matches!(self, Tile::Wall(_))
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Imp,
    HealthPickup,
    Demon,
    /// What a killed enemy turns into.  Still drawn, never updated.
    Corpse,
}

impl SpriteKind {
    pub fn from_code(code: u8) -> Option<SpriteKind> {
        match code {
            10 => Some(SpriteKind::Imp),
            11 => Some(SpriteKind::HealthPickup),
            12 => Some(SpriteKind::Demon),
            99 => Some(SpriteKind::Corpse),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub kind: SpriteKind,
    pub scale: f64,
    /// Static sprites (pickups, corpses) never move and cannot be shot.
    pub mobile: bool,
    pub health: u32,
    pub max_health: u32,
    pub alive: bool,
    /// Squared distance to the player, refreshed at the end of every tick.
    pub dist_sq: f64,
}

impl Sprite {
    pub fn new(x: f64, y: f64, kind: SpriteKind, scale: f64, mobile: bool, health: u32) -> Self {
        Sprite {
            x,
            y,
            kind,
            scale,
            mobile,
            health,
            max_health: health,
            alive: true,
            dist_sq: 0.0,
        }
    }

    pub fn is_hostile(&self) -> bool {
        self.alive && self.mobile
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Facing, radians in `[0, 2π)`.  Angle 0 looks along +x, and with rows
    /// growing downward a positive turn is clockwise on the minimap.
    pub angle: f64,
    pub health: u32,
    pub max_health: u32,
    pub reserve_ammo: u32,
    pub clip_ammo: u32,
    pub clip_size: u32,
    /// Game-clock time the current reload began, if one is in progress.
    pub reload_started: Option<f64>,
    pub last_shot: Option<f64>,
    pub last_pain: Option<f64>,
}

impl Player {
    pub fn is_reloading(&self) -> bool {
        self.reload_started.is_some()
    }
}

// ── Status, sounds & messages ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    GameWon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    Shoot,
    Reload,
    NoAmmo,
    HitWall,
    EnemyPain,
    EnemyDeath,
    LevelComplete,
    Pickup,
    PlayerPain,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 9] = [
        SoundEvent::Shoot,
        SoundEvent::Reload,
        SoundEvent::NoAmmo,
        SoundEvent::HitWall,
        SoundEvent::EnemyPain,
        SoundEvent::EnemyDeath,
        SoundEvent::LevelComplete,
        SoundEvent::Pickup,
        SoundEvent::PlayerPain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundEvent::Shoot => "shoot",
            SoundEvent::Reload => "reload",
            SoundEvent::NoAmmo => "no_ammo",
            SoundEvent::HitWall => "hit_wall",
            SoundEvent::EnemyPain => "enemy_pain",
            SoundEvent::EnemyDeath => "enemy_death",
            SoundEvent::LevelComplete => "level_complete",
            SoundEvent::Pickup => "pickup",
            SoundEvent::PlayerPain => "player_pain",
        }
    }
}

/// A centred banner shown until the game clock passes `expires_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub text: String,
    pub expires_at: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole session: one loaded level plus everything that moves in it.
/// Cloneable so the per-tick update can hand back a fresh copy.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: TileGrid,
    pub player: Player,
    /// Created at level load and never reallocated; dead sprites stay in place.
    pub sprites: Vec<Sprite>,
    pub status: GameStatus,
    pub level_index: usize,
    pub level_count: usize,
    /// Seconds of game time, the sum of clamped frame deltas.
    pub clock: f64,
    pub frame: u64,
    pub show_map: bool,
    pub message: Option<Message>,
    /// Sounds raised during the last tick, drained by the presentation layer.
    pub sounds: Vec<SoundEvent>,
}
