//! Presentation of snapshots.
//!
//! Renderers are passive readers: they take a snapshot and draw it,
//! never writing back. This module provides the `Renderer` trait and
//! the text view models shared by front ends:
//!
//! - `PatternLine`: one token per pattern position, entered positions
//!   showing the player's symbol and pending ones showing the target dimmed
//! - `ScoreLine`: `Score: {score}/{target}, Missed: {missed}`, flagged
//!   as an alert once the game is over

use std::io::{self, Write};

use crate::core::{GameState, Slot, Symbol};

/// Banner shown in place of the pattern when the game is over.
pub const GAME_OVER_BANNER: &str = "GAME OVER!";

/// How a piece of text should be emphasized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Regular text.
    Normal,
    /// De-emphasized, for symbols not yet entered.
    Dim,
    /// Highlighted, for the terminal state.
    Alert,
}

/// A symbol with its emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// The symbol to draw.
    pub symbol: Symbol,
    /// Its emphasis.
    pub tone: Tone,
}

/// View of the current pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternLine {
    /// One token per pattern position.
    Progress(Vec<Token>),
    /// The game is over.
    GameOver,
}

impl PatternLine {
    /// Build the pattern view for a snapshot.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        if state.is_game_over() {
            return PatternLine::GameOver;
        }
        let tokens = state
            .slots()
            .map(|slot| match slot {
                Slot::Entered(symbol) => Token {
                    symbol,
                    tone: Tone::Normal,
                },
                Slot::Pending(symbol) => Token { symbol, tone: Tone::Dim },
            })
            .collect();
        PatternLine::Progress(tokens)
    }
}

impl std::fmt::Display for PatternLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternLine::GameOver => f.write_str(GAME_OVER_BANNER),
            PatternLine::Progress(tokens) => {
                let text: Vec<String> = tokens.iter().map(|t| t.symbol.to_string()).collect();
                f.write_str(&text.join(" "))
            }
        }
    }
}

/// View of the scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreLine {
    /// Matched patterns.
    pub score: u32,
    /// Attempts per game.
    pub target: u32,
    /// Missed patterns.
    pub missed: u32,
    /// `Alert` once the game is over, `Normal` before.
    pub tone: Tone,
}

impl ScoreLine {
    /// Build the score view for a snapshot.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score(),
            target: state.target_score(),
            missed: state.missed(),
            tone: if state.is_game_over() { Tone::Alert } else { Tone::Normal },
        }
    }
}

impl std::fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score: {}/{}, Missed: {}", self.score, self.target, self.missed)
    }
}

/// Something that displays snapshots.
///
/// Called with whatever snapshot is current; implementations decide
/// how often to draw.
pub trait Renderer {
    /// Draw one snapshot.
    fn render(&mut self, state: &GameState) -> io::Result<()>;
}

/// Plain-text renderer writing two lines per frame.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    /// Render into a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, state: &GameState) -> io::Result<()> {
        writeln!(self.out, "{}", PatternLine::from_state(state))?;
        writeln!(self.out, "{}", ScoreLine::from_state(state))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PatternCatalog};
    use crate::rules::Engine;
    use Symbol::{L, R};

    fn engine(patterns: &[&str], target: u32) -> Engine {
        let config = GameConfig::new(target).with_catalog(PatternCatalog::parse(patterns).unwrap());
        Engine::new(config, 1).unwrap()
    }

    #[test]
    fn test_pattern_line_progress() {
        let mut engine = engine(&["LRL"], 10);
        engine.handle_input(R);

        let line = PatternLine::from_state(engine.state());
        assert_eq!(
            line,
            PatternLine::Progress(vec![
                Token { symbol: R, tone: Tone::Normal },
                Token { symbol: R, tone: Tone::Dim },
                Token { symbol: L, tone: Tone::Dim },
            ])
        );
        assert_eq!(line.to_string(), "R R L");
    }

    #[test]
    fn test_pattern_line_game_over() {
        let mut engine = engine(&["LR"], 1);
        engine.handle_input(L);
        engine.handle_input(R);

        assert_eq!(PatternLine::from_state(engine.state()), PatternLine::GameOver);
        assert_eq!(PatternLine::GameOver.to_string(), "GAME OVER!");
    }

    #[test]
    fn test_score_line() {
        let mut engine = engine(&["LR"], 2);
        engine.handle_input(L);
        engine.handle_input(R);

        let line = ScoreLine::from_state(engine.state());
        assert_eq!(line.to_string(), "Score: 1/2, Missed: 0");
        assert_eq!(line.tone, Tone::Normal);

        engine.handle_input(R);
        engine.handle_input(R);
        let line = ScoreLine::from_state(engine.state());
        assert_eq!(line.to_string(), "Score: 1/2, Missed: 1");
        assert_eq!(line.tone, Tone::Alert);
    }

    #[test]
    fn test_text_renderer() {
        let engine = engine(&["RR"], 10);
        let mut renderer = TextRenderer::new(Vec::new());

        renderer.render(engine.state()).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "R R\nScore: 0/10, Missed: 0\n");
    }
}
