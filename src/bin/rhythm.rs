//! Terminal front end.
//!
//! Usage: `rhythm [config.toml]`
//!
//! `RHYTHM_SEED` fixes the pattern sequence. `RUST_LOG` enables logging
//! to `rhythm.log`, or to the file named by `RHYTHM_LOG`; stderr is left
//! alone since the game owns the terminal. `Esc` or `Ctrl-C` quits.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use rhythm_match::{
    Engine, GameConfig, GameRng, GameState, KeyMapping, PatternLine, RawKey, Renderer, ScoreLine,
    Tone,
};

/// Redraw cadence.
const TICK: Duration = Duration::from_millis(16);

/// Log file used when `RHYTHM_LOG` is unset.
const DEFAULT_LOG_FILE: &str = "rhythm.log";

/// Raw mode and alternate screen for the lifetime of the value.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draws snapshots with crossterm colors.
struct TerminalRenderer {
    out: Stdout,
    help: String,
}

impl TerminalRenderer {
    fn new(out: Stdout, keys: &KeyMapping) -> Self {
        let join = |keys: &[RawKey]| {
            keys.iter().map(RawKey::as_str).collect::<Vec<_>>().join("/")
        };
        let help = format!(
            "L: {}   R: {}   restart: {}   quit: esc",
            join(keys.left_keys()),
            join(keys.right_keys()),
            keys.restart_key()
        );
        Self { out, help }
    }

    fn color(tone: Tone) -> Color {
        match tone {
            Tone::Normal => Color::Reset,
            Tone::Dim => Color::DarkGrey,
            Tone::Alert => Color::Red,
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, state: &GameState) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(2, 1))?;

        match PatternLine::from_state(state) {
            PatternLine::GameOver => {
                queue!(
                    self.out,
                    SetForegroundColor(Color::Red),
                    SetAttribute(Attribute::Bold),
                    Print(rhythm_match::render::GAME_OVER_BANNER),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            PatternLine::Progress(tokens) => {
                for token in tokens {
                    queue!(
                        self.out,
                        SetForegroundColor(Self::color(token.tone)),
                        Print(format!("{} ", token.symbol))
                    )?;
                }
            }
        }

        let score = ScoreLine::from_state(state);
        queue!(
            self.out,
            cursor::MoveTo(2, 3),
            SetForegroundColor(Self::color(score.tone)),
            Print(score),
            ResetColor,
            cursor::MoveTo(2, 5),
            SetForegroundColor(Color::DarkGrey),
            Print(&self.help),
            ResetColor
        )?;
        self.out.flush()
    }
}

/// Normalize a crossterm key code. Keys with no identifier are dropped.
fn raw_key(code: KeyCode) -> Option<RawKey> {
    match code {
        KeyCode::Char(c) => Some(RawKey::from_char(c)),
        KeyCode::Enter => RawKey::new("enter").ok(),
        KeyCode::Tab => RawKey::new("tab").ok(),
        KeyCode::Backspace => RawKey::new("backspace").ok(),
        KeyCode::Left => RawKey::new("left").ok(),
        KeyCode::Right => RawKey::new("right").ok(),
        KeyCode::Up => RawKey::new("up").ok(),
        KeyCode::Down => RawKey::new("down").ok(),
        _ => None,
    }
}

fn load_config() -> Result<GameConfig, rhythm_match::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    }
}

fn seeded_rng() -> GameRng {
    std::env::var("RHYTHM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or_else(GameRng::from_entropy, GameRng::new)
}

fn log_path(var: Option<OsString>) -> PathBuf {
    var.filter(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from)
}

/// Logger writing to `file` instead of stderr, filtered by `filters`.
fn file_logger(filters: &str, file: File) -> env_logger::Logger {
    env_logger::Builder::new()
        .parse_filters(filters)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .build()
}

/// Install the file logger when `RUST_LOG` is set. Without it nothing is logged.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(filters) = std::env::var("RUST_LOG") else {
        return Ok(());
    };
    let file = File::create(log_path(std::env::var_os("RHYTHM_LOG")))?;
    let logger = file_logger(&filters, file);
    log::set_max_level(logger.filter());
    log::set_boxed_logger(Box::new(logger))?;
    Ok(())
}

fn run(engine: &mut Engine, renderer: &mut TerminalRenderer) -> io::Result<()> {
    let mut drawn: Option<Arc<GameState>> = None;

    loop {
        let snapshot = engine.snapshot();
        if drawn.as_ref().map_or(true, |d| !Arc::ptr_eq(d, &snapshot)) {
            renderer.render(&snapshot)?;
            drawn = Some(snapshot);
        }

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            // Resize and focus changes need a full redraw
            drawn = None;
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            return Ok(());
        }

        let Some(raw) = raw_key(key.code) else {
            continue;
        };
        match engine.config().keys.resolve(&raw) {
            Some(input) => {
                let outcome = engine.dispatch(input);
                log::trace!("{} -> {} -> {:?}", raw, input, outcome);
            }
            None => log::trace!("unbound key {}", raw),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = load_config()?;
    let mut engine = Engine::with_rng(config, seeded_rng())?;

    let mut stdout = io::stdout();
    let guard = TerminalGuard::enter(&mut stdout)?;
    let mut renderer = TerminalRenderer::new(stdout, &engine.config().keys);

    let result = run(&mut engine, &mut renderer);
    drop(guard);

    let state = engine.state();
    println!("{}", ScoreLine::from_state(state));
    result?;
    Ok(())
}
