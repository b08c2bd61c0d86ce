mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use raycast_shooter::assets::{AssetRegistry, AudioSink, SoundHandle};
use raycast_shooter::compute::{advance, init_state};
use raycast_shooter::config::{GameConfig, DEFAULT_CONFIG_PATH};
use raycast_shooter::entities::{GameState, GameStatus};
use raycast_shooter::error::GameError;
use raycast_shooter::frame::FrameBuilder;
use raycast_shooter::input::InputState;
use raycast_shooter::levels::{builtin_levels, load_levels};

const LOG_PATH: &str = "raycast_shooter.log";

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Frames a key stays held after its last press or repeat.  Must outlast the
/// gap between OS auto-repeat events on terminals without release events.
const HOLD_WINDOW: u64 = 4;

/// True when any of `keys` was pressed or repeated within `HOLD_WINDOW` frames.
fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter()
        .filter_map(|k| key_frame.get(k))
        .any(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Terminals have no mixer; sounds are recorded in the log.
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, sound: &SoundHandle) {
        log::debug!("sound: {}", sound.name);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// The screen belongs to the game, so log lines go to a file.
fn init_logging() {
    let target = match File::create(LOG_PATH) {
        Ok(file) => env_logger::Target::Pipe(Box::new(file)),
        Err(_) => env_logger::Target::Pipe(Box::new(std::io::sink())),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(target)
        .init();
}

/// Config from the first argument (or the default path), then the level
/// pack it names (or the built-in one), then the starting state.
fn load_game() -> Result<(GameState, AssetRegistry), GameError> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = GameConfig::load(&config_path)?;

    let levels = match &config.levels_path {
        Some(path) => load_levels(path)?,
        None => builtin_levels()?,
    };
    let start = config.start_level;
    let state = init_state(&levels, start, config)?;
    Ok((state, AssetRegistry::builtin()))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Movement and turning follow whatever keys are held this frame.  Fire,
/// reload and the map toggle trigger once per `Press` so a held key does not
/// auto-fire.  Where the terminal reports releases a key stops at once;
/// elsewhere it lapses after `HOLD_WINDOW` quiet frames.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    assets: &AssetRegistry,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut builder = FrameBuilder::new();
    let mut audio = LogAudio;
    let (_, rows) = terminal::size()?;
    let mut credits = display::Credits::new(rows);

    let frame_time = state.config.frame_duration();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();
    let mut fps = 0.0_f64;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Input ─────────────────────────────────────────────────────────────
        let mut input = InputState::idle();
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => input.fire = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.reload = true,
                        KeyCode::Char('m') | KeyCode::Char('M') => input.toggle_map = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        use KeyCode::{Char, Down, Left, Right, Up};
        input.forward = any_held(&key_frame, &[Up, Char('w'), Char('W')], frame);
        input.backward = any_held(&key_frame, &[Down, Char('s'), Char('S')], frame);
        input.strafe_left = any_held(&key_frame, &[Char('a'), Char('A')], frame);
        input.strafe_right = any_held(&key_frame, &[Char('d'), Char('D')], frame);
        input.turn_left = any_held(&key_frame, &[Left, Char('q'), Char('Q')], frame);
        input.turn_right = any_held(&key_frame, &[Right, Char('e'), Char('E')], frame);

        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        if dt > 0.0 {
            fps = if fps == 0.0 { 1.0 / dt } else { fps * 0.9 + 0.1 / dt };
        }

        advance(state, &input, dt, &mut rng);
        assets.play_all(&state.sounds, &mut audio);

        let (cols, rows) = terminal::size()?;
        match state.status {
            GameStatus::Playing => {
                let (width, height) = display::view_size(cols, rows);
                let view = builder.build(state, assets, width, height);
                display::render_play(out, state, &view, assets, fps, cols, rows)?;
            }
            GameStatus::GameOver => display::render_game_over(out, cols, rows)?,
            GameStatus::GameWon => {
                credits.advance(dt.min(state.config.max_frame_delta), rows);
                display::render_victory(out, &credits, cols, rows)?;
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    // Fatal setup errors are reported before the terminal changes mode.
    let (mut state, assets) = match load_game() {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("startup failed: {e}");
            eprintln!("raycast_shooter: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events make held-key movement stop promptly; not every terminal has them.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut state, &assets, &rx);

    // Restore the terminal whatever the loop returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("terminal error: {e}");
    }
    log::info!("exited after {} ticks, {:.1}s of play", state.frame, state.clock);
    result
}
