use std::f64::consts::TAU;

use raycast_shooter::compute::init_state;
use raycast_shooter::config::GameConfig;
use raycast_shooter::entities::*;
use raycast_shooter::input::InputState;
use raycast_shooter::levels::{LevelDescriptor, SpriteDescriptor};
use raycast_shooter::map::TileGrid;
use raycast_shooter::movement::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn room(w: usize, h: usize) -> Vec<Vec<u8>> {
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| u8::from(x == 0 || y == 0 || x == w - 1 || y == h - 1))
                .collect()
        })
        .collect()
}

fn make_state(rows: Vec<Vec<u8>>, spawn: (f64, f64), sprites: Vec<SpriteDescriptor>) -> GameState {
    let grid = TileGrid::from_codes(&rows).unwrap();
    let level = LevelDescriptor::new(grid, spawn, 0.0, sprites).unwrap();
    let mut config = GameConfig::default();
    config.ai_speed_jitter = 0.0;
    config.ai_turn_jitter = 0.0;
    init_state(&[level], 0, config).unwrap()
}

fn imp_at(x: f64, y: f64) -> SpriteDescriptor {
    SpriteDescriptor { x, y, kind: SpriteKind::Imp, scale: 1.0, mobile: true, health: 40 }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn held(f: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::idle();
    f(&mut input);
    input
}

// ── slide_move ────────────────────────────────────────────────────────────────

#[test]
fn slide_keeps_the_free_axis() {
    let g = TileGrid::from_codes(&room(5, 5)).unwrap();
    // X would enter the east wall; Y is free.
    let (x, y) = slide_move(&g, 3.5, 2.5, 1.0, 0.5);
    assert_eq!((x, y), (3.5, 3.0));
}

#[test]
fn slide_stops_in_a_corner() {
    let g = TileGrid::from_codes(&room(5, 5)).unwrap();
    let (x, y) = slide_move(&g, 3.8, 3.8, 0.5, 0.5);
    assert_eq!((x, y), (3.8, 3.8));
}

#[test]
fn slide_resolves_x_before_y() {
    let rows: Vec<Vec<u8>> = vec![
        vec![1, 1, 1, 1, 1],
        vec![1, 0, 0, 0, 1],
        vec![1, 0, 1, 0, 1],
        vec![1, 0, 0, 0, 1],
        vec![1, 1, 1, 1, 1],
    ];
    let g = TileGrid::from_codes(&rows).unwrap();
    // X lands in (2,1), open; Y is then tested from x = 2.2 and hits (2,2).
    let (x, y) = slide_move(&g, 1.8, 1.8, 0.4, 0.4);
    assert!((x - 2.2).abs() < 1e-9);
    assert_eq!(y, 1.8);
}

#[test]
fn slide_can_enter_the_exit() {
    let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1, 1], vec![1, 0, 9, 1], vec![1, 1, 1, 1]];
    let g = TileGrid::from_codes(&rows).unwrap();
    let (x, _) = slide_move(&g, 1.9, 1.5, 0.3, 0.0);
    assert!((x - 2.2).abs() < 1e-9);
}

#[test]
fn random_slides_never_end_inside_a_wall() {
    let rows: Vec<Vec<u8>> = vec![
        vec![1, 1, 1, 1, 1, 1, 1],
        vec![1, 0, 0, 0, 0, 0, 1],
        vec![1, 0, 2, 0, 3, 0, 1],
        vec![1, 0, 0, 0, 0, 0, 1],
        vec![1, 0, 4, 0, 2, 0, 1],
        vec![1, 0, 0, 0, 0, 0, 1],
        vec![1, 1, 1, 1, 1, 1, 1],
    ];
    let g = TileGrid::from_codes(&rows).unwrap();
    let mut rng = seeded_rng();
    let (mut x, mut y) = (1.5, 1.5);
    for _ in 0..5_000 {
        let dx = rng.gen_range(-0.6..0.6);
        let dy = rng.gen_range(-0.6..0.6);
        (x, y) = slide_move(&g, x, y, dx, dy);
        assert!(!g.is_blocking_at(x, y), "ended in a wall at ({x}, {y})");
    }
}

// ── normalize_angle ───────────────────────────────────────────────────────────

#[test]
fn angles_wrap_into_one_turn() {
    assert!((normalize_angle(-0.1) - (TAU - 0.1)).abs() < 1e-12);
    assert!((normalize_angle(7.0) - (7.0 - TAU)).abs() < 1e-12);
    assert_eq!(normalize_angle(0.0), 0.0);
    let a = normalize_angle(-1e-300);
    assert!((0.0..TAU).contains(&a));
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn forward_moves_along_the_facing() {
    let mut s = make_state(room(7, 7), (3.5, 3.5), vec![]);
    move_player(&mut s, &held(|i| i.forward = true), 0.1);
    assert!((s.player.x - 3.8).abs() < 1e-9);
    assert!((s.player.y - 3.5).abs() < 1e-9);
}

#[test]
fn backward_moves_against_the_facing() {
    let mut s = make_state(room(7, 7), (3.5, 3.5), vec![]);
    move_player(&mut s, &held(|i| i.backward = true), 0.1);
    assert!((s.player.x - 3.2).abs() < 1e-9);
}

#[test]
fn strafe_right_moves_toward_plus_y_when_facing_plus_x() {
    let mut s = make_state(room(7, 7), (3.5, 3.5), vec![]);
    move_player(&mut s, &held(|i| i.strafe_right = true), 0.1);
    assert!((s.player.y - 3.8).abs() < 1e-9);
    assert!((s.player.x - 3.5).abs() < 1e-9);

    move_player(&mut s, &held(|i| i.strafe_left = true), 0.1);
    assert!((s.player.y - 3.5).abs() < 1e-9);
}

#[test]
fn turning_scales_with_dt_and_wraps() {
    let mut s = make_state(room(7, 7), (3.5, 3.5), vec![]);
    move_player(&mut s, &held(|i| i.turn_right = true), 0.1);
    assert!((s.player.angle - 0.15).abs() < 1e-9);

    move_player(&mut s, &held(|i| i.turn_left = true), 0.2);
    assert!((s.player.angle - (TAU - 0.15)).abs() < 1e-9);
}

#[test]
fn player_cannot_walk_into_a_wall() {
    let mut s = make_state(room(7, 7), (5.8, 3.5), vec![]);
    move_player(&mut s, &held(|i| i.forward = true), 0.1);
    assert_eq!(s.player.x, 5.8);
}

#[test]
fn idle_input_changes_nothing() {
    let mut s = make_state(room(7, 7), (3.5, 3.5), vec![]);
    let before = s.player.clone();
    move_player(&mut s, &InputState::idle(), 0.1);
    assert_eq!(s.player, before);
}

// ── update_sprites ────────────────────────────────────────────────────────────

#[test]
fn sprite_in_band_steps_toward_player() {
    let mut s = make_state(room(12, 7), (3.5, 3.5), vec![imp_at(6.5, 3.5)]);
    update_sprites(&mut s, 0.1, &mut seeded_rng());
    // 0.6 cells/s for 0.1 s, jitter disabled.
    assert!((s.sprites[0].x - 6.44).abs() < 1e-9);
    assert!((s.sprites[0].y - 3.5).abs() < 1e-9);
}

#[test]
fn sprite_too_close_or_too_far_stays_put() {
    let mut s = make_state(
        room(14, 7),
        (2.5, 3.5),
        vec![imp_at(3.5, 3.5), imp_at(11.5, 3.5)],
    );
    update_sprites(&mut s, 0.1, &mut seeded_rng());
    assert_eq!((s.sprites[0].x, s.sprites[0].y), (3.5, 3.5));
    assert_eq!((s.sprites[1].x, s.sprites[1].y), (11.5, 3.5));
}

#[test]
fn dead_and_static_sprites_do_not_move() {
    let pickup = SpriteDescriptor {
        x: 6.5,
        y: 2.5,
        kind: SpriteKind::HealthPickup,
        scale: 0.5,
        mobile: false,
        health: 1,
    };
    let mut s = make_state(room(12, 7), (3.5, 3.5), vec![imp_at(6.5, 4.5), pickup]);
    s.sprites[0].alive = false;
    update_sprites(&mut s, 0.1, &mut seeded_rng());
    assert_eq!((s.sprites[0].x, s.sprites[0].y), (6.5, 4.5));
    assert_eq!((s.sprites[1].x, s.sprites[1].y), (6.5, 2.5));
}

#[test]
fn sprites_never_step_onto_the_exit() {
    let mut rows = room(12, 7);
    rows[3][5] = 9;
    let mut s = make_state(rows, (2.5, 3.5), vec![imp_at(6.02, 3.5)]);
    update_sprites(&mut s, 0.1, &mut seeded_rng());
    assert_eq!(s.sprites[0].x, 6.02);
}

#[test]
fn jittered_sprites_stay_in_empty_cells() {
    let mut s = make_state(room(12, 12), (2.5, 2.5), vec![imp_at(7.5, 7.5), imp_at(9.5, 2.5)]);
    s.config.ai_speed_jitter = 0.2;
    s.config.ai_turn_jitter = 0.2;
    let mut rng = seeded_rng();
    for _ in 0..300 {
        update_sprites(&mut s, 0.1, &mut rng);
        for sprite in &s.sprites {
            assert!(s.grid.is_empty_at(sprite.x, sprite.y));
        }
    }
}
