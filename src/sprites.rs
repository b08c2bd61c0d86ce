//! Billboard sprite projection and per-column occlusion.
//!
//! Sprites are drawn farthest first, so nearer sprites simply paint over
//! farther ones; walls are handled column by column against the depth buffer.

use crate::entities::{Sprite, SpriteKind};
use crate::raycast::{Camera, DepthBuffer};

/// Camera-plane determinant below which the basis is treated as singular.
const MIN_DET: f64 = 1e-9;

/// A sprite's footprint in screen space, before occlusion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Distance along the view axis.
    pub depth: f64,
    /// Horizontal centre column (may be off-screen).
    pub screen_x: i64,
    pub width: i64,
    pub height: i64,
}

impl Projection {
    /// First column covered, unclipped.
    pub fn left(&self) -> i64 {
        self.screen_x - self.width / 2
    }

    /// One past the last column covered, unclipped.  Always `width` columns
    /// from `left`, so a one-column sprite still covers a column.
    pub fn right(&self) -> i64 {
        self.left() + self.width
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteColumn {
    pub x: usize,
    /// Horizontal texture coordinate in `[0, 1)`.
    pub tex_u: f64,
}

/// A projected sprite plus the columns that survived the depth test.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteBlit {
    /// Index into the level's sprite list.
    pub index: usize,
    pub kind: SpriteKind,
    pub projection: Projection,
    pub columns: Vec<SpriteColumn>,
}

pub fn refresh_distances(sprites: &mut [Sprite], px: f64, py: f64) {
    for sprite in sprites {
        sprite.dist_sq = (px - sprite.x).powi(2) + (py - sprite.y).powi(2);
    }
}

/// Indices of `sprites`, farthest first.  Ties keep list order.
pub fn draw_order(sprites: &[Sprite]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sprites.len()).collect();
    order.sort_by(|&a, &b| sprites[b].dist_sq.total_cmp(&sprites[a].dist_sq));
    order
}

/// Living sprites draw; dead ones only as corpses.
pub fn is_drawable(sprite: &Sprite) -> bool {
    sprite.alive || sprite.kind == SpriteKind::Corpse
}

/// Transform a world point into screen space through the inverse of the
/// camera's direction/plane basis.  `None` when the point is behind, at, or
/// too close to the camera.
pub fn project(
    camera: &Camera,
    pos: (f64, f64),
    scale: f64,
    aspect: f64,
    screen_w: usize,
    screen_h: usize,
    min_depth: f64,
) -> Option<Projection> {
    let rel_x = pos.0 - camera.x;
    let rel_y = pos.1 - camera.y;

    let det = camera.plane_x * camera.dir_y - camera.dir_x * camera.plane_y;
    if det.abs() < MIN_DET {
        return None;
    }
    let inv_det = 1.0 / det;
    let offset = inv_det * (camera.dir_y * rel_x - camera.dir_x * rel_y);
    let depth = inv_det * (-camera.plane_y * rel_x + camera.plane_x * rel_y);
    if depth <= min_depth.max(0.0) {
        return None;
    }

    let screen_x = ((screen_w as f64 / 2.0) * (1.0 + offset / depth)) as i64;
    let raw_height = (screen_h as f64 / depth) * scale;
    Some(Projection {
        depth,
        screen_x,
        width: (raw_height * aspect).abs() as i64,
        height: raw_height.abs() as i64,
    })
}

/// On-screen columns where the sprite is strictly nearer than the wall.
pub fn visible_columns(
    projection: &Projection,
    depth: &DepthBuffer,
    screen_w: usize,
) -> Vec<SpriteColumn> {
    if projection.width <= 0 {
        return Vec::new();
    }
    let left = projection.left();
    let start = left.max(0);
    let end = projection.right().min(screen_w as i64);
    (start..end)
        .filter(|&x| projection.depth < depth.get(x as usize))
        .map(|x| SpriteColumn {
            x: x as usize,
            tex_u: ((x - left) as f64 / projection.width as f64).clamp(0.0, 1.0 - f64::EPSILON),
        })
        .collect()
}

/// Project every drawable sprite, back to front.  `aspect_of` resolves the
/// sprite's texture; a kind without one is skipped.
pub fn project_sprites(
    camera: &Camera,
    sprites: &[Sprite],
    depth: &DepthBuffer,
    screen_w: usize,
    screen_h: usize,
    min_depth: f64,
    aspect_of: impl Fn(SpriteKind) -> Option<f64>,
) -> Vec<SpriteBlit> {
    let mut blits = Vec::new();
    for index in draw_order(sprites) {
        let sprite = &sprites[index];
        if !is_drawable(sprite) {
            continue;
        }
        let Some(aspect) = aspect_of(sprite.kind) else {
            log::debug!("no texture for {:?}; skipping sprite {index}", sprite.kind);
            continue;
        };
        let Some(projection) = project(
            camera,
            (sprite.x, sprite.y),
            sprite.scale,
            aspect,
            screen_w,
            screen_h,
            min_depth,
        ) else {
            continue;
        };
        let columns = visible_columns(&projection, depth, screen_w);
        if columns.is_empty() {
            continue;
        }
        blits.push(SpriteBlit {
            index,
            kind: sprite.kind,
            projection,
            columns,
        });
    }
    blits
}
