//! Grid-stepping (DDA) wall caster.
//!
//! One ray per screen column.  Each ray walks the grid one cell at a time,
//! always crossing whichever gridline is nearer, until it enters a wall cell
//! or runs out of its step budget.  Distances are perpendicular to the camera
//! plane so straight walls render straight.

use crate::entities::Tile;
use crate::map::TileGrid;

/// Corrected distances at or below this are treated as a miss.
pub const MIN_WALL_DIST: f64 = 1e-4;

/// Which family of gridlines the ray crossed last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// A vertical gridline (x = const); the wall face runs along y.
    X,
    /// A horizontal gridline (y = const); the wall face runs along x.
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    /// Perpendicular distance from the camera plane.
    pub distance: f64,
    pub tile: Tile,
    pub side: Side,
    /// Horizontal texture coordinate in `[0, 1)`; it grows left to right on
    /// screen for every face, matching sprites.
    pub tex_u: f64,
    pub cell: (i64, i64),
}

/// Direction and camera-plane vectors for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub dir_x: f64,
    pub dir_y: f64,
    pub plane_x: f64,
    pub plane_y: f64,
}

impl Camera {
    /// The plane is perpendicular to the facing, scaled to `tan(fov / 2)`,
    /// and points to the viewer's right so column 0 is the left edge.
    pub fn new(x: f64, y: f64, angle: f64, fov: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let half = (fov / 2.0).tan();
        Camera {
            x,
            y,
            dir_x: cos,
            dir_y: sin,
            plane_x: -sin * half,
            plane_y: cos * half,
        }
    }

    /// Ray direction through column `col` of a `width`-column screen.
    pub fn ray_dir(&self, col: usize, width: usize) -> (f64, f64) {
        let cam_x = 2.0 * col as f64 / width as f64 - 1.0;
        (
            self.dir_x + self.plane_x * cam_x,
            self.dir_y + self.plane_y * cam_x,
        )
    }
}

/// Per-column nearest-wall distance.  Rebuilt from scratch every frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f64>,
}

impl DepthBuffer {
    pub fn new(width: usize) -> Self {
        DepthBuffer {
            depths: vec![f64::INFINITY; width],
        }
    }

    /// Resize if needed and forget every previous value.
    pub fn reset(&mut self, width: usize) {
        self.depths.clear();
        self.depths.resize(width, f64::INFINITY);
    }

    pub fn set(&mut self, col: usize, depth: f64) {
        if let Some(slot) = self.depths.get_mut(col) {
            *slot = depth;
        }
    }

    /// Off-screen columns read as infinitely far.
    pub fn get(&self, col: usize) -> f64 {
        self.depths.get(col).copied().unwrap_or(f64::INFINITY)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.depths
    }
}

/// Cast a single ray.  `None` is a miss: out of budget, off the grid, or a
/// degenerate distance.
pub fn cast_ray(
    grid: &TileGrid,
    origin: (f64, f64),
    dir: (f64, f64),
    max_steps: u32,
) -> Option<WallHit> {
    let (px, py) = origin;
    let (rdx, rdy) = dir;
    let mut map_x = px.floor() as i64;
    let mut map_y = py.floor() as i64;

    // A zero component never crosses that family of gridlines.
    let delta_x = if rdx == 0.0 { f64::INFINITY } else { (1.0 / rdx).abs() };
    let delta_y = if rdy == 0.0 { f64::INFINITY } else { (1.0 / rdy).abs() };

    let (step_x, mut side_x) = if rdx < 0.0 {
        (-1, (px - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - px) * delta_x)
    };
    let (step_y, mut side_y) = if rdy < 0.0 {
        (-1, (py - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - py) * delta_y)
    };
    // 0 * inf above yields NaN when the origin sits exactly on a gridline.
    if side_x.is_nan() {
        side_x = f64::INFINITY;
    }
    if side_y.is_nan() {
        side_y = f64::INFINITY;
    }

    let mut side = Side::X;
    let mut tile = None;
    for _ in 0..max_steps {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        match grid.get(map_x, map_y) {
            None => return None,
            Some(t) if t.is_blocking() => {
                tile = Some(t);
                break;
            }
            Some(_) => {}
        }
    }
    let tile = tile?;

    let distance = match side {
        Side::X => (map_x as f64 - px + (1 - step_x) as f64 / 2.0) / rdx,
        Side::Y => (map_y as f64 - py + (1 - step_y) as f64 / 2.0) / rdy,
    };
    if !distance.is_finite() || distance <= MIN_WALL_DIST {
        return None;
    }

    let wall = match side {
        Side::X => py + distance * rdy,
        Side::Y => px + distance * rdx,
    };
    let mut tex_u = wall - wall.floor();
    // The plane points to the viewer's right, so the coordinate along the
    // face already grows rightward for rays heading +x or -y.
    let mirrored = match side {
        Side::X => rdx < 0.0,
        Side::Y => rdy > 0.0,
    };
    if mirrored {
        tex_u = 1.0 - tex_u;
    }
    if tex_u >= 1.0 {
        tex_u = 0.0;
    }

    Some(WallHit {
        distance,
        tile,
        side,
        tex_u,
        cell: (map_x, map_y),
    })
}

/// Cast every column of a `width`-wide screen, refilling `depth` as it goes.
pub fn cast_columns(
    grid: &TileGrid,
    camera: &Camera,
    width: usize,
    max_steps: u32,
    depth: &mut DepthBuffer,
) -> Vec<Option<WallHit>> {
    depth.reset(width);
    (0..width)
        .map(|col| {
            let hit = cast_ray(grid, (camera.x, camera.y), camera.ray_dir(col, width), max_steps);
            depth.set(col, hit.map_or(f64::INFINITY, |h| h.distance));
            hit
        })
        .collect()
}
