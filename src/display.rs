//! Terminal presentation: rasterizes a `Frame` into half-block cells and draws the overlays.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only turns frames
//! into terminal commands.  Every terminal cell carries two pixels stacked
//! with the upper-half block, so the view is twice as tall as it has rows.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use raycast_shooter::assets::{AssetRegistry, Rgb, TextureKey};
use raycast_shooter::entities::{GameState, SpriteKind, Tile};
use raycast_shooter::frame::Frame;

// ── Colour palette ────────────────────────────────────────────────────────────

const CEILING: Rgb = Rgb::new(70, 70, 120);
const FLOOR: Rgb = Rgb::new(50, 50, 50);
const C_HUD_BG: Color = Color::Black;
const C_HP_HIGH: Color = Color::Green;
const C_HP_MID: Color = Color::Yellow;
const C_HP_LOW: Color = Color::Red;
const C_AMMO: Color = Color::Yellow;
const C_AMMO_EMPTY: Color = Color::Red;
const C_RELOADING: Color = Color::Blue;
const C_MESSAGE: Color = Color::Yellow;
const C_MAP_BG: Color = Color::Rgb { r: 20, g: 20, b: 20 };
const C_MAP_EXIT: Color = Color::Rgb { r: 0, g: 255, b: 255 };
const C_MAP_PLAYER: Color = Color::Green;
const C_MAP_ENEMY: Color = Color::Rgb { r: 100, g: 0, b: 0 };
const C_MAP_CORPSE: Color = Color::Rgb { r: 80, g: 0, b: 0 };
const C_MAP_PICKUP: Color = Color::Blue;

const HALF_BLOCK: char = '▀';

const CREDITS: &[&str] = &[
    "YOU ARE VICTORIOUS!",
    "",
    "A Terminal Raycaster",
    "",
    "Featuring:",
    "  DDA Wall Casting",
    "  Billboard Sprites",
    "  Hitscan Combat",
    "",
    "Thanks for playing!",
    "",
    "",
    "Press ESC to Exit",
];
/// Rows per second.
const CREDITS_SPEED: f64 = 4.0;

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Pixel dimensions of the 3D view for a terminal of `cols × rows`; the last
/// row is the HUD.
pub fn view_size(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows.saturating_sub(1) as usize * 2)
}

// ── Play view ─────────────────────────────────────────────────────────────────

/// Render one complete in-game frame.
pub fn render_play<W: Write>(
    out: &mut W,
    state: &GameState,
    frame: &Frame,
    assets: &AssetRegistry,
    fps: f64,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let pixels = rasterize(frame, assets);
    draw_pixels(out, &pixels, frame.width, frame.height)?;
    draw_crosshair(out, cols, rows)?;
    if state.show_map {
        draw_minimap(out, state, assets, cols)?;
    }
    draw_message(out, state, cols, rows)?;
    draw_hud(out, state, fps, cols, rows)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Blit walls then sprites into an RGB buffer `frame.width × frame.height`.
fn rasterize(frame: &Frame, assets: &AssetRegistry) -> Vec<Rgb> {
    let (w, h) = (frame.width, frame.height);
    let mut pixels: Vec<Rgb> = (0..w * h)
        .map(|i| if i / w.max(1) < h / 2 { CEILING } else { FLOOR })
        .collect();

    for column in &frame.walls {
        let (Some(hit), Some(span)) = (column.hit, column.span) else {
            continue;
        };
        let Some(texture) = assets.texture(span.texture) else {
            continue;
        };
        for y in span.draw_start..span.draw_end {
            let v = (y as i64 - span.top) as f64 / span.line_height as f64;
            if let Some(c) = texture.sample(hit.tex_u, v) {
                pixels[y * w + column.x] = c.shaded(span.shade);
            }
        }
    }

    for draw in &frame.sprites {
        let Some(texture) = assets.texture(TextureKey::Sprite(draw.blit.kind)) else {
            continue;
        };
        let height = draw.blit.projection.height.max(1) as f64;
        for column in &draw.blit.columns {
            for y in draw.draw_start..draw.draw_end {
                let v = (y as i64 - draw.top) as f64 / height;
                if let Some(c) = texture.sample(column.tex_u, v) {
                    pixels[y * w + column.x] = c.shaded(draw.shade);
                }
            }
        }
    }
    pixels
}

fn draw_pixels<W: Write>(
    out: &mut W,
    pixels: &[Rgb],
    width: usize,
    height: usize,
) -> std::io::Result<()> {
    let mut last: Option<(Rgb, Rgb)> = None;
    for row in 0..height / 2 {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for x in 0..width {
            let top = pixels[(row * 2) * width + x];
            let bottom = pixels[(row * 2 + 1) * width + x];
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(color(top)))?;
                out.queue(style::SetBackgroundColor(color(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    Ok(())
}

fn draw_crosshair<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    let view_rows = rows.saturating_sub(1);
    out.queue(cursor::MoveTo(cols / 2, view_rows / 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(Print('+'))?;
    Ok(())
}

// ── Minimap (top-right) ───────────────────────────────────────────────────────

fn heading_glyph(angle: f64) -> char {
    // Angle grows clockwise on screen because rows grow downward.
    const GLYPHS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];
    let octant = ((angle / std::f64::consts::FRAC_PI_4).round() as i64).rem_euclid(8);
    GLYPHS[octant as usize]
}

fn swatch(assets: &AssetRegistry, tile: Tile, fallback: Color) -> Color {
    assets
        .tile_texture(tile)
        .and_then(|t| t.swatch())
        .map_or(fallback, color)
}

fn draw_minimap<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &AssetRegistry,
    cols: u16,
) -> std::io::Result<()> {
    let map_w = state.grid.width() as u16;
    let ox = cols.saturating_sub(map_w + 1);
    let oy = 1u16;

    out.queue(style::SetBackgroundColor(C_MAP_BG))?;
    for (y, row) in state.grid.rows().enumerate() {
        out.queue(cursor::MoveTo(ox, oy + y as u16))?;
        for &tile in row {
            match tile {
                Tile::Empty => {
                    out.queue(Print(' '))?;
                }
                Tile::Exit => {
                    out.queue(style::SetForegroundColor(swatch(assets, tile, C_MAP_EXIT)))?;
                    out.queue(Print('▒'))?;
                }
                Tile::Wall(_) => {
                    out.queue(style::SetForegroundColor(swatch(assets, tile, Color::Grey)))?;
                    out.queue(Print('█'))?;
                }
            }
        }
    }

    for sprite in &state.sprites {
        let (glyph, c) = match (sprite.alive, sprite.kind) {
            (true, SpriteKind::HealthPickup) => ('+', C_MAP_PICKUP),
            (true, _) if sprite.mobile => ('e', C_MAP_ENEMY),
            (_, SpriteKind::Corpse) => ('x', C_MAP_CORPSE),
            _ => continue,
        };
        out.queue(cursor::MoveTo(ox + sprite.x as u16, oy + sprite.y as u16))?;
        out.queue(style::SetForegroundColor(c))?;
        out.queue(Print(glyph))?;
    }

    let p = &state.player;
    out.queue(cursor::MoveTo(ox + p.x as u16, oy + p.y as u16))?;
    out.queue(style::SetForegroundColor(C_MAP_PLAYER))?;
    out.queue(Print(heading_glyph(p.angle)))?;
    Ok(())
}

// ── HUD (last row) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    fps: f64,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let row = rows.saturating_sub(1);
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;

    // Health, left
    let p = &state.player;
    let hp_color = if p.health > 60 {
        C_HP_HIGH
    } else if p.health > 30 {
        C_HP_MID
    } else {
        C_HP_LOW
    };
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(hp_color))?;
    out.queue(Print(format!("HP:{}", p.health)))?;

    // FPS after health
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(format!("  FPS:{fps:.1}")))?;

    // Level, centre
    let level = format!("Level:{}/{}", state.level_index + 1, state.level_count);
    let lx = (cols / 2).saturating_sub(level.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&level))?;

    // Ammo, right
    let (ammo, ammo_color) = if p.is_reloading() {
        ("RELOADING".to_string(), C_RELOADING)
    } else if p.clip_ammo > 0 {
        (format!("AMMO:{}/{}", p.clip_ammo, p.reserve_ammo), C_AMMO)
    } else {
        (format!("AMMO:{}/{}", p.clip_ammo, p.reserve_ammo), C_AMMO_EMPTY)
    };
    let ax = cols.saturating_sub(ammo.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(ax, row))?;
    out.queue(style::SetForegroundColor(ammo_color))?;
    out.queue(Print(&ammo))?;
    Ok(())
}

fn draw_message<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let Some(message) = &state.message else {
        return Ok(());
    };
    let x = (cols / 2).saturating_sub(message.text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(x, rows / 3))?;
    out.queue(style::SetForegroundColor(C_MESSAGE))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(Print(&message.text))?;
    Ok(())
}

// ── End screens ───────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    c: Color,
    cols: u16,
    row: u16,
) -> std::io::Result<()> {
    let x = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(x, row))?;
    out.queue(style::SetForegroundColor(c))?;
    out.queue(Print(text))?;
    Ok(())
}

pub fn render_game_over<W: Write>(out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mid = rows / 2;
    draw_centered(out, "GAME OVER", Color::Red, cols, mid.saturating_sub(2))?;
    draw_centered(out, "Press ESC to Exit", Color::White, cols, mid + 2)?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Scroll position of the victory credits, in rows from the top.
#[derive(Debug)]
pub struct Credits {
    scroll: f64,
}

impl Credits {
    pub fn new(rows: u16) -> Self {
        Credits { scroll: rows as f64 }
    }

    /// Move up; once the last line leaves the top, start again at the bottom.
    pub fn advance(&mut self, dt: f64, rows: u16) {
        self.scroll -= CREDITS_SPEED * dt;
        if self.scroll < -(CREDITS.len() as f64) {
            self.scroll = rows as f64;
        }
    }
}

pub fn render_victory<W: Write>(
    out: &mut W,
    credits: &Credits,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let first = credits.scroll.floor() as i64;
    for (i, line) in CREDITS.iter().enumerate() {
        let row = first + i as i64;
        if line.is_empty() || row < 0 || row >= rows as i64 {
            continue;
        }
        draw_centered(out, line, Color::White, cols, row as u16)?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
