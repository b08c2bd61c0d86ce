//! Per-frame compositor.
//!
//! Turns a `GameState` into a `Frame`: one wall span per screen column and a
//! back-to-front list of sprite blits, each already depth-tested against the
//! walls.  Pixel work belongs to whoever presents the frame.

use crate::assets::{AssetRegistry, TextureKey};
use crate::config::GameConfig;
use crate::entities::{GameState, SpriteKind};
use crate::raycast::{self, Camera, DepthBuffer, Side, WallHit};
use crate::sprites::{self, SpriteBlit};

/// The visible slice of one wall column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSpan {
    /// Unclipped top row; negative when the wall overflows the screen.
    pub top: i64,
    pub line_height: i64,
    /// Clipped `[draw_start, draw_end)` rows.
    pub draw_start: usize,
    pub draw_end: usize,
    pub shade: f64,
    pub texture: TextureKey,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallColumn {
    pub x: usize,
    pub hit: Option<WallHit>,
    /// `None` when nothing is drawn: a miss, a zero-height line, or no
    /// texture for the tile.
    pub span: Option<WallSpan>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteDraw {
    pub blit: SpriteBlit,
    pub top: i64,
    pub draw_start: usize,
    pub draw_end: usize,
    pub shade: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub walls: Vec<WallColumn>,
    /// Farthest first.
    pub sprites: Vec<SpriteDraw>,
}

pub fn wall_shade(config: &GameConfig, distance: f64, side: Side) -> f64 {
    let base = (1.0 / (1.0 + distance * config.wall_falloff)).clamp(config.wall_min_shade, 1.0);
    match side {
        Side::X => base,
        Side::Y => base * config.side_shade,
    }
}

pub fn sprite_shade(config: &GameConfig, depth: f64) -> f64 {
    (1.0 / (1.0 + depth * config.sprite_falloff)).clamp(config.sprite_min_shade, 1.0)
}

/// Vertical extent of something `line_height` tall centred on the horizon.
/// Returns the unclipped top and the clipped `[start, end)` rows.
fn vertical_span(line_height: i64, screen_h: usize) -> (i64, usize, usize) {
    let half = screen_h as i64 / 2;
    let top = half - line_height / 2;
    let start = top.max(0) as usize;
    let end = (half + line_height / 2).clamp(0, screen_h as i64) as usize;
    (top, start, end)
}

/// Owns the depth buffer so it is reused, and fully rewritten, every frame.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    depth: DepthBuffer,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth buffer from the most recent `build`.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn build(
        &mut self,
        state: &GameState,
        assets: &AssetRegistry,
        width: usize,
        height: usize,
    ) -> Frame {
        let cfg = &state.config;
        let p = &state.player;
        let camera = Camera::new(p.x, p.y, p.angle, cfg.fov);

        let hits = raycast::cast_columns(&state.grid, &camera, width, cfg.max_ray_steps, &mut self.depth);
        let walls = hits
            .into_iter()
            .enumerate()
            .map(|(x, hit)| WallColumn {
                x,
                hit,
                span: hit.and_then(|h| wall_span(cfg, assets, &h, height)),
            })
            .collect();

        let blits = sprites::project_sprites(
            &camera,
            &state.sprites,
            &self.depth,
            width,
            height,
            cfg.sprite_min_depth,
            |kind: SpriteKind| assets.sprite_texture(kind).map(|t| t.aspect()),
        );
        let sprites = blits
            .into_iter()
            .filter_map(|blit| {
                let (top, draw_start, draw_end) = vertical_span(blit.projection.height, height);
                if draw_start >= draw_end {
                    return None;
                }
                let shade = sprite_shade(cfg, blit.projection.depth);
                Some(SpriteDraw {
                    blit,
                    top,
                    draw_start,
                    draw_end,
                    shade,
                })
            })
            .collect();

        Frame {
            width,
            height,
            walls,
            sprites,
        }
    }
}

fn wall_span(
    cfg: &GameConfig,
    assets: &AssetRegistry,
    hit: &WallHit,
    screen_h: usize,
) -> Option<WallSpan> {
    let line_height = (screen_h as f64 / hit.distance) as i64;
    if line_height <= 0 {
        return None;
    }
    let (top, draw_start, draw_end) = vertical_span(line_height, screen_h);
    if draw_start >= draw_end {
        return None;
    }
    let key = TextureKey::Tile(hit.tile);
    if assets.texture(key).is_none() {
        log::debug!("no texture for {:?}; column skipped", hit.tile);
        return None;
    }
    Some(WallSpan {
        top,
        line_height,
        draw_start,
        draw_end,
        shade: wall_shade(cfg, hit.distance, hit.side),
        texture: key,
    })
}
