use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

use raycast_shooter::entities::{Tile, WallMaterial};
use raycast_shooter::map::TileGrid;
use raycast_shooter::raycast::*;

/// An open `w × h` room walled in brick.
fn room(w: usize, h: usize) -> TileGrid {
    let rows: Vec<Vec<u8>> = (0..h)
        .map(|y| {
            (0..w)
                .map(|x| u8::from(x == 0 || y == 0 || x == w - 1 || y == h - 1))
                .collect()
        })
        .collect();
    TileGrid::from_codes(&rows).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Camera ────────────────────────────────────────────────────────────────────

#[test]
fn plane_points_to_the_viewers_right() {
    let cam = Camera::new(0.0, 0.0, 0.0, FRAC_PI_3);
    let (_, left_y) = cam.ray_dir(0, 64);
    let (_, right_y) = cam.ray_dir(63, 64);
    // Facing +x with rows growing downward, the right hand side is +y.
    assert!(left_y < 0.0);
    assert!(right_y > 0.0);
}

#[test]
fn plane_half_width_is_tan_half_fov() {
    let cam = Camera::new(0.0, 0.0, 0.0, FRAC_PI_3);
    let len = cam.plane_x.hypot(cam.plane_y);
    assert!(approx(len, (FRAC_PI_3 / 2.0).tan()));
    assert!(approx(cam.dir_x * cam.plane_x + cam.dir_y * cam.plane_y, 0.0));
}

// ── cast_ray ──────────────────────────────────────────────────────────────────

#[test]
fn straight_ahead_hits_east_wall() {
    let g = room(7, 7);
    let hit = cast_ray(&g, (3.5, 3.5), (1.0, 0.0), 60).expect("wall ahead");
    assert!(approx(hit.distance, 2.5));
    assert_eq!(hit.side, Side::X);
    assert_eq!(hit.cell, (6, 3));
    assert_eq!(hit.tile, Tile::Wall(WallMaterial::Brick));
    assert!(approx(hit.tex_u, 0.5));
}

#[test]
fn facing_down_hits_a_y_side() {
    let g = room(7, 7);
    let (s, c) = FRAC_PI_2.sin_cos();
    let hit = cast_ray(&g, (3.5, 3.5), (c, s), 60).expect("wall below");
    assert_eq!(hit.side, Side::Y);
    assert_eq!(hit.cell.1, 6);
    assert!((hit.distance - 2.5).abs() < 1e-6);
}

#[test]
fn axis_aligned_wall_reads_the_same_distance_in_every_column() {
    let g = room(7, 7);
    let cam = Camera::new(3.5, 3.5, 0.0, FRAC_PI_3);
    let width = 64;
    for col in 0..width {
        let hit = cast_ray(&g, (cam.x, cam.y), cam.ray_dir(col, width), 60)
            .unwrap_or_else(|| panic!("column {col} missed"));
        assert!(approx(hit.distance, 2.5), "column {col}: {}", hit.distance);
        assert_eq!(hit.side, Side::X);
    }
}

#[test]
fn texture_coordinate_stays_in_unit_range() {
    let g = room(9, 9);
    let cam = Camera::new(2.3, 6.1, 5.0, FRAC_PI_3);
    for col in 0..80 {
        if let Some(hit) = cast_ray(&g, (cam.x, cam.y), cam.ray_dir(col, 80), 60) {
            assert!((0.0..1.0).contains(&hit.tex_u), "tex_u {}", hit.tex_u);
        }
    }
}

#[test]
fn opposite_faces_mirror_the_texture() {
    let g = room(7, 7);
    // Same world point on the wall (y = 3.25), seen from the east and from the west.
    let east = cast_ray(&g, (3.5, 3.25), (1.0, 0.0), 60).unwrap();
    let west = cast_ray(&g, (3.5, 3.25), (-1.0, 0.0), 60).unwrap();
    assert!(approx(east.tex_u, 0.25));
    assert!(approx(west.tex_u, 0.75));
}

#[test]
fn wall_texture_reads_left_to_right_on_every_face() {
    let g = room(7, 7);
    let width = 64;
    for angle in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
        let cam = Camera::new(3.5, 3.5, angle, FRAC_PI_3);
        let hits: Vec<WallHit> = (0..width)
            .map(|col| cast_ray(&g, (cam.x, cam.y), cam.ray_dir(col, width), 60).unwrap())
            .collect();
        for pair in hits.windows(2) {
            if pair[0].cell == pair[1].cell {
                assert!(
                    pair[0].tex_u < pair[1].tex_u,
                    "angle {angle}: {} then {}",
                    pair[0].tex_u,
                    pair[1].tex_u
                );
            }
        }
    }
}

#[test]
fn wall_material_comes_from_the_cell_hit() {
    let rows = [
        [1u8, 1, 1, 1, 1],
        [1, 0, 0, 0, 1],
        [1, 0, 0, 4, 1],
        [1, 0, 0, 0, 1],
        [1, 1, 1, 1, 1],
    ];
    let g = TileGrid::from_codes(&rows).unwrap();
    let hit = cast_ray(&g, (1.5, 2.5), (1.0, 0.0), 60).unwrap();
    assert_eq!(hit.tile, Tile::Wall(WallMaterial::Metal));
    assert!(approx(hit.distance, 1.5));
}

#[test]
fn rays_pass_through_the_exit() {
    let rows = [[1u8, 1, 1, 1, 1], [1, 0, 9, 0, 1], [1, 1, 1, 1, 1]];
    let g = TileGrid::from_codes(&rows).unwrap();
    let hit = cast_ray(&g, (1.5, 1.5), (1.0, 0.0), 60).unwrap();
    assert_eq!(hit.cell, (4, 1));
}

#[test]
fn exhausted_step_budget_is_a_miss() {
    let g = room(7, 7);
    assert!(cast_ray(&g, (3.5, 3.5), (1.0, 0.0), 1).is_none());
    assert!(cast_ray(&g, (3.5, 3.5), (1.0, 0.0), 0).is_none());
}

#[test]
fn leaving_the_grid_is_a_miss() {
    let g = room(7, 7);
    assert!(cast_ray(&g, (-5.5, 3.5), (-1.0, 0.0), 60).is_none());
}

#[test]
fn zero_direction_is_a_miss() {
    let g = room(7, 7);
    assert!(cast_ray(&g, (3.5, 3.5), (0.0, 0.0), 60).is_none());
}

#[test]
fn origin_on_a_gridline_still_hits() {
    let g = room(7, 7);
    let hit = cast_ray(&g, (3.0, 3.0), (0.0, -1.0), 60).unwrap();
    assert!(hit.distance.is_finite());
    assert!(approx(hit.distance, 2.0));
}

// ── DepthBuffer & cast_columns ───────────────────────────────────────────────

#[test]
fn depth_buffer_out_of_range_is_infinite() {
    let mut d = DepthBuffer::new(4);
    d.set(1, 2.0);
    d.set(10, 2.0);
    assert_eq!(d.get(1), 2.0);
    assert_eq!(d.get(0), f64::INFINITY);
    assert_eq!(d.get(10), f64::INFINITY);
    assert_eq!(d.len(), 4);
}

#[test]
fn cast_columns_rewrites_every_entry() {
    let g = room(7, 7);
    let cam = Camera::new(3.5, 3.5, 0.0, FRAC_PI_3);
    let mut depth = DepthBuffer::new(100);
    depth.set(5, 0.01);

    let hits = cast_columns(&g, &cam, 32, 60, &mut depth);
    assert_eq!(hits.len(), 32);
    assert_eq!(depth.len(), 32);
    for (col, hit) in hits.iter().enumerate() {
        let hit = hit.expect("closed room");
        assert_eq!(depth.get(col), hit.distance);
    }
}

#[test]
fn missed_columns_are_infinitely_deep() {
    let g = room(7, 7);
    let cam = Camera::new(3.5, 3.5, PI, FRAC_PI_3);
    let mut depth = DepthBuffer::default();
    let hits = cast_columns(&g, &cam, 16, 1, &mut depth);
    assert!(hits.iter().all(Option::is_none));
    assert!(depth.as_slice().iter().all(|d| d.is_infinite()));
}
