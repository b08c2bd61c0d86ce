use std::f64::consts::FRAC_PI_3;

use raycast_shooter::entities::{Sprite, SpriteKind};
use raycast_shooter::raycast::{Camera, DepthBuffer};
use raycast_shooter::sprites::*;

fn camera() -> Camera {
    Camera::new(0.0, 0.0, 0.0, FRAC_PI_3)
}

fn imp(x: f64, y: f64) -> Sprite {
    Sprite::new(x, y, SpriteKind::Imp, 1.0, true, 40)
}

fn with_dist(dist_sq: f64) -> Sprite {
    let mut s = imp(0.0, 0.0);
    s.dist_sq = dist_sq;
    s
}

// ── project ───────────────────────────────────────────────────────────────────

#[test]
fn point_straight_ahead_lands_mid_screen() {
    let p = project(&camera(), (4.0, 0.0), 1.0, 1.0, 200, 100, 0.1).unwrap();
    assert!((p.depth - 4.0).abs() < 1e-9);
    assert_eq!(p.screen_x, 100);
    // Truncation may land one pixel short of 100 / 4.
    assert!((24..=25).contains(&p.height));
    assert_eq!(p.width, p.height);
}

#[test]
fn point_to_the_right_lands_right_of_centre() {
    let p = project(&camera(), (4.0, 1.0), 1.0, 1.0, 200, 100, 0.1).unwrap();
    assert!(p.screen_x > 100);
    let q = project(&camera(), (4.0, -1.0), 1.0, 1.0, 200, 100, 0.1).unwrap();
    assert!(q.screen_x < 100);
}

#[test]
fn projected_size_shrinks_with_depth() {
    let mut last = i64::MAX;
    for d in 1..=20 {
        let p = project(&camera(), (d as f64, 0.0), 1.0, 1.0, 320, 200, 0.1).unwrap();
        assert!(p.height <= last, "depth {d}: {} > {last}", p.height);
        last = p.height;
    }
}

#[test]
fn scale_and_aspect_stretch_the_billboard() {
    let p = project(&camera(), (2.0, 0.0), 0.5, 2.0, 200, 100, 0.1).unwrap();
    assert!((24..=25).contains(&p.height));
    assert!((49..=50).contains(&p.width));
}

#[test]
fn behind_or_too_close_is_culled() {
    assert!(project(&camera(), (-3.0, 0.0), 1.0, 1.0, 200, 100, 0.1).is_none());
    assert!(project(&camera(), (0.0, 0.0), 1.0, 1.0, 200, 100, 0.1).is_none());
    assert!(project(&camera(), (0.05, 0.0), 1.0, 1.0, 200, 100, 0.1).is_none());
}

#[test]
fn degenerate_camera_is_culled() {
    let cam = Camera {
        x: 0.0,
        y: 0.0,
        dir_x: 1.0,
        dir_y: 0.0,
        plane_x: 0.0,
        plane_y: 0.0,
    };
    assert!(project(&cam, (3.0, 0.0), 1.0, 1.0, 200, 100, 0.1).is_none());
}

// ── visible_columns ───────────────────────────────────────────────────────────

#[test]
fn only_strictly_nearer_columns_survive() {
    let proj = Projection { depth: 2.0, screen_x: 5, width: 6, height: 10 };
    let mut depth = DepthBuffer::new(10);
    depth.set(2, 2.0); // tie: wall wins
    depth.set(3, 1.5); // wall in front
    depth.set(4, 3.0); // wall behind

    let xs: Vec<usize> = visible_columns(&proj, &depth, 10).iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![4, 5, 6, 7]);
}

#[test]
fn columns_clip_to_the_screen() {
    let proj = Projection { depth: 1.0, screen_x: 0, width: 6, height: 10 };
    let depth = DepthBuffer::new(10);
    let cols = visible_columns(&proj, &depth, 10);
    assert_eq!(cols.iter().map(|c| c.x).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!((cols[0].tex_u - 0.5).abs() < 1e-9);
}

#[test]
fn texture_coordinate_runs_left_to_right() {
    let proj = Projection { depth: 1.0, screen_x: 5, width: 6, height: 10 };
    let depth = DepthBuffer::new(10);
    let cols = visible_columns(&proj, &depth, 10);
    assert_eq!(cols.first().map(|c| c.tex_u), Some(0.0));
    assert!(cols.windows(2).all(|w| w[0].tex_u < w[1].tex_u));
    assert!(cols.iter().all(|c| c.tex_u < 1.0));
}

#[test]
fn narrow_sprites_cover_exactly_their_width() {
    let depth = DepthBuffer::new(10);
    let one = Projection { depth: 3.0, screen_x: 5, width: 1, height: 1 };
    let xs: Vec<usize> = visible_columns(&one, &depth, 10).iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![5]);

    let three = Projection { depth: 3.0, screen_x: 5, width: 3, height: 3 };
    let xs: Vec<usize> = visible_columns(&three, &depth, 10).iter().map(|c| c.x).collect();
    assert_eq!(xs, vec![4, 5, 6]);
}

#[test]
fn distant_sprite_still_gets_a_column() {
    let proj = project(&camera(), (40.0, 0.0), 1.0, 1.0, 64, 48, 0.1).unwrap();
    assert_eq!(proj.width, 1);
    let cols = visible_columns(&proj, &DepthBuffer::new(64), 64);
    assert_eq!(cols.len(), 1);
    assert_eq!(cols[0].x, 32);
}

#[test]
fn zero_width_has_no_columns() {
    let proj = Projection { depth: 1.0, screen_x: 5, width: 0, height: 0 };
    assert!(visible_columns(&proj, &DepthBuffer::new(10), 10).is_empty());
}

// ── ordering ──────────────────────────────────────────────────────────────────

#[test]
fn refresh_distances_uses_squared_distance() {
    let mut sprites = vec![imp(3.0, 4.0), imp(1.0, 0.0)];
    refresh_distances(&mut sprites, 0.0, 0.0);
    assert_eq!(sprites[0].dist_sq, 25.0);
    assert_eq!(sprites[1].dist_sq, 1.0);
}

#[test]
fn draw_order_is_farthest_first_and_stable() {
    let sprites = vec![with_dist(1.0), with_dist(4.0), with_dist(4.0), with_dist(0.5)];
    assert_eq!(draw_order(&sprites), vec![1, 2, 0, 3]);
}

#[test]
fn dead_sprites_draw_only_as_corpses() {
    let mut pickup = Sprite::new(1.0, 1.0, SpriteKind::HealthPickup, 0.5, false, 1);
    pickup.alive = false;
    assert!(!is_drawable(&pickup));

    let mut corpse = imp(1.0, 1.0);
    corpse.alive = false;
    corpse.kind = SpriteKind::Corpse;
    assert!(is_drawable(&corpse));
}

// ── project_sprites ───────────────────────────────────────────────────────────

#[test]
fn project_sprites_orders_back_to_front() {
    let mut sprites = vec![imp(3.0, 0.0), imp(6.0, 0.0)];
    refresh_distances(&mut sprites, 0.0, 0.0);
    let depth = DepthBuffer::new(100);
    let blits = project_sprites(&camera(), &sprites, &depth, 100, 50, 0.1, |_| Some(1.0));
    let order: Vec<usize> = blits.iter().map(|b| b.index).collect();
    assert_eq!(order, vec![1, 0]);
}

#[test]
fn sprites_without_texture_are_skipped() {
    let mut sprites = vec![
        imp(3.0, 0.0),
        Sprite::new(5.0, 0.0, SpriteKind::Demon, 1.2, true, 80),
    ];
    refresh_distances(&mut sprites, 0.0, 0.0);
    let depth = DepthBuffer::new(100);
    let blits = project_sprites(&camera(), &sprites, &depth, 100, 50, 0.1, |kind| {
        (kind == SpriteKind::Imp).then_some(1.0)
    });
    assert_eq!(blits.len(), 1);
    assert_eq!(blits[0].kind, SpriteKind::Imp);
}

#[test]
fn sprite_behind_a_wall_produces_no_blit() {
    let mut sprites = vec![imp(3.0, 0.0)];
    refresh_distances(&mut sprites, 0.0, 0.0);
    let mut depth = DepthBuffer::new(100);
    for col in 0..100 {
        depth.set(col, 1.0);
    }
    let blits = project_sprites(&camera(), &sprites, &depth, 100, 50, 0.1, |_| Some(1.0));
    assert!(blits.is_empty());
}
