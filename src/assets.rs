//! Typed asset registry: textures by tile or sprite kind, sounds by event.
//!
//! Lookups return `Option`; callers decide what a missing asset means, which
//! is always "skip this draw / this sound" and never a failed frame.

use std::collections::HashMap;

use crate::entities::{SoundEvent, SpriteKind, Tile, WallMaterial};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Multiply every channel by `shade` in `[0, 1]`.
    pub fn shaded(self, shade: f64) -> Rgb {
        let s = shade.clamp(0.0, 1.0);
        Rgb {
            r: (self.r as f64 * s) as u8,
            g: (self.g as f64 * s) as u8,
            b: (self.b as f64 * s) as u8,
        }
    }
}

/// A small image; `None` texels are transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Option<Rgb>>,
}

impl Texture {
    pub fn new(width: usize, height: usize, texels: Vec<Option<Rgb>>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != width * height {
            return None;
        }
        Some(Texture { width, height, texels })
    }

    /// Build from rows of palette characters.  Ragged or empty art yields
    /// `None`.
    pub fn from_art(rows: &[&str]) -> Option<Self> {
        let width = rows.first()?.chars().count();
        let mut texels = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            texels.extend(row.chars().map(palette));
        }
        Texture::new(width, rows.len(), texels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Nearest-texel sample; `u` and `v` are clamped to the image.
    pub fn sample(&self, u: f64, v: f64) -> Option<Rgb> {
        let tx = ((u * self.width as f64) as usize).min(self.width - 1);
        let ty = ((v.max(0.0) * self.height as f64) as usize).min(self.height - 1);
        self.texels[ty * self.width + tx]
    }

    /// First opaque texel, the minimap swatch.
    pub fn swatch(&self) -> Option<Rgb> {
        self.texels.iter().flatten().next().copied()
    }
}

fn palette(c: char) -> Option<Rgb> {
    match c {
        // brick
        'b' => Some(Rgb::new(150, 50, 50)),
        'm' => Some(Rgb::new(100, 30, 30)),
        // stone
        's' => Some(Rgb::new(100, 100, 100)),
        'd' => Some(Rgb::new(70, 70, 70)),
        // wood
        'w' => Some(Rgb::new(180, 120, 80)),
        'g' => Some(Rgb::new(130, 90, 50)),
        // metal
        'p' => Some(Rgb::new(80, 80, 150)),
        'r' => Some(Rgb::new(50, 50, 100)),
        // exit
        'k' => Some(Rgb::new(0, 0, 0)),
        'e' => Some(Rgb::new(200, 200, 255)),
        'a' => Some(Rgb::new(0, 0, 50)),
        // creatures & items
        'h' => Some(Rgb::new(80, 40, 10)),
        'R' => Some(Rgb::new(255, 0, 0)),
        'P' => Some(Rgb::new(255, 105, 180)),
        'M' => Some(Rgb::new(100, 0, 0)),
        'W' => Some(Rgb::new(255, 255, 255)),
        'X' => Some(Rgb::new(200, 0, 0)),
        'D' => Some(Rgb::new(40, 40, 40)),
        _ => None,
    }
}

const BRICK: [&str; 8] = [
    "mmmmmmmm", "bbbmbbbb", "bbbmbbbb", "bbbmbbbb", "mmmmmmmm", "bbbbbbbm", "bbbbbbbm",
    "bbbbbbbm",
];
const STONE: [&str; 8] = [
    "ssssssss", "sddsssss", "sddssdds", "ssssssds", "ssdsssss", "ssssddss", "sdssddss",
    "ssssssss",
];
const WOOD: [&str; 8] = [
    "wgwwgwww", "wgwwgwwg", "wwgwgwwg", "wwgwwgwg", "wgwwwgwg", "wgwwwgww", "wwgwgwww",
    "wwgwgwwg",
];
const METAL: [&str; 8] = [
    "rpppprpp", "rprpprpr", "rpppprpp", "rpppprpp", "rpppprpp", "rprpprpr", "rpppprpp",
    "rpppprpp",
];
const EXIT: [&str; 8] = [
    "kkkkkkkk", "kaeeeeak", "kaeaeeak", "kaaaeeak", "kaaaeeak", "kaeaeeak", "kaeeeeak",
    "kkkkkkkk",
];
const IMP: [&str; 8] = [
    "...hh...", "..hhhh..", "..RhhR..", "...hh...", "..hhhh..", ".hhhhhh.", "..hhhh..",
    "..h..h..",
];
const DEMON: [&str; 8] = [
    "........", ".PPPPPP.", "PPPPPPPP", "PPPPPPPP", "PPPPPPPP", "PPMMMMPP", ".PPPPPP.",
    ".PP..PP.",
];
const MEDKIT: [&str; 8] = [
    "........", ".WWWWWW.", ".WWXXWW.", ".XXXXXX.", ".XXXXXX.", ".WWXXWW.", ".WWWWWW.",
    "........",
];
const CORPSE: [&str; 8] = [
    "........", "........", "........", "........", "..M..M..", ".DDMDDD.", "DMDDDMDD",
    ".DDDMDD.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Tile(Tile),
    Sprite(SpriteKind),
}

/// Opaque handle a sound backend knows how to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub name: &'static str,
}

/// Whatever actually makes noise.
pub trait AudioSink {
    fn play(&mut self, sound: &SoundHandle);
}

#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    textures: HashMap<TextureKey, Texture>,
    sounds: HashMap<SoundEvent, SoundHandle>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every wall material, the exit, all sprite kinds and all sound events.
    pub fn builtin() -> Self {
        let mut registry = AssetRegistry::new();
        let art: [(TextureKey, &[&str]); 9] = [
            (TextureKey::Tile(Tile::Wall(WallMaterial::Brick)), &BRICK[..]),
            (TextureKey::Tile(Tile::Wall(WallMaterial::Stone)), &STONE[..]),
            (TextureKey::Tile(Tile::Wall(WallMaterial::Wood)), &WOOD[..]),
            (TextureKey::Tile(Tile::Wall(WallMaterial::Metal)), &METAL[..]),
            (TextureKey::Tile(Tile::Exit), &EXIT[..]),
            (TextureKey::Sprite(SpriteKind::Imp), &IMP[..]),
            (TextureKey::Sprite(SpriteKind::Demon), &DEMON[..]),
            (TextureKey::Sprite(SpriteKind::HealthPickup), &MEDKIT[..]),
            (TextureKey::Sprite(SpriteKind::Corpse), &CORPSE[..]),
        ];
        for (key, rows) in art {
            match Texture::from_art(rows) {
                Some(texture) => registry.insert_texture(key, texture),
                None => log::warn!("malformed texture art for {key:?}"),
            }
        }
        for event in SoundEvent::ALL {
            registry.insert_sound(event, SoundHandle { name: event.name() });
        }
        registry
    }

    pub fn insert_texture(&mut self, key: TextureKey, texture: Texture) {
        self.textures.insert(key, texture);
    }

    pub fn insert_sound(&mut self, event: SoundEvent, handle: SoundHandle) {
        self.sounds.insert(event, handle);
    }

    pub fn texture(&self, key: TextureKey) -> Option<&Texture> {
        self.textures.get(&key)
    }

    pub fn tile_texture(&self, tile: Tile) -> Option<&Texture> {
        self.texture(TextureKey::Tile(tile))
    }

    pub fn sprite_texture(&self, kind: SpriteKind) -> Option<&Texture> {
        self.texture(TextureKey::Sprite(kind))
    }

    pub fn sound(&self, event: SoundEvent) -> Option<&SoundHandle> {
        self.sounds.get(&event)
    }

    /// Play every event through `sink`; events without a handle are dropped.
    pub fn play_all(&self, events: &[SoundEvent], sink: &mut impl AudioSink) {
        for &event in events {
            match self.sound(event) {
                Some(handle) => sink.play(handle),
                None => log::debug!("no sound for {}; skipped", event.name()),
            }
        }
    }
}
