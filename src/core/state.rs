//! Game state snapshots.
//!
//! ## GameState
//!
//! One immutable picture of a session:
//! - The pattern being played and the symbols entered toward it
//! - Score, misses and total attempts
//! - The attempt target that ends the game
//!
//! Transitions never modify a snapshot. Each one builds the next
//! snapshot from the previous, which the engine then publishes behind an
//! `Arc`. Readers holding an older snapshot keep seeing it unchanged.
//!
//! ## Invariants
//!
//! - `total_attempts == score + missed`
//! - `user_input.len() <= current_pattern.len()`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::pattern::{Pattern, Symbols};
use super::symbol::Symbol;

/// Whether a session still accepts symbol input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Fewer attempts than the target have been evaluated.
    InProgress,
    /// The target has been reached. Only a restart leaves this state.
    GameOver,
}

/// One position of the current pattern, as a renderer would show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The player entered this symbol here.
    Entered(Symbol),
    /// Not yet entered; carries the target symbol.
    Pending(Symbol),
}

/// An immutable snapshot of a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    current_pattern: Pattern,
    user_input: Symbols,
    score: u32,
    missed: u32,
    total_attempts: u32,
    target_score: u32,
}

impl GameState {
    /// A fresh session: zero counters, nothing dealt yet.
    #[must_use]
    pub fn new(target_score: u32) -> Self {
        Self {
            current_pattern: Pattern::empty(),
            user_input: SmallVec::new(),
            score: 0,
            missed: 0,
            total_attempts: 0,
            target_score,
        }
    }

    // === Accessors ===

    /// The pattern the player must reproduce.
    #[must_use]
    pub fn current_pattern(&self) -> &Pattern {
        &self.current_pattern
    }

    /// Symbols entered toward the current pattern.
    #[must_use]
    pub fn user_input(&self) -> &[Symbol] {
        &self.user_input
    }

    /// Fully matched patterns.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Fully entered but mismatched patterns.
    #[must_use]
    pub fn missed(&self) -> u32 {
        self.missed
    }

    /// Evaluated attempts, always `score + missed`.
    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    /// Attempts after which the game is over.
    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    // === Derived ===

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.total_attempts >= self.target_score {
            GameStatus::GameOver
        } else {
            GameStatus::InProgress
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status() == GameStatus::GameOver
    }

    /// Attempts left before the game is over.
    #[must_use]
    pub fn remaining_attempts(&self) -> u32 {
        self.target_score.saturating_sub(self.total_attempts)
    }

    /// Check if the input has reached the pattern length.
    #[must_use]
    pub fn is_entry_complete(&self) -> bool {
        !self.current_pattern.is_empty() && self.user_input.len() == self.current_pattern.len()
    }

    /// Per-position view of the current pattern.
    ///
    /// Entered positions show what the player typed, pending positions
    /// show the target.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.current_pattern.iter().enumerate().map(|(i, target)| match self.user_input.get(i) {
            Some(&entered) => Slot::Entered(entered),
            None => Slot::Pending(target),
        })
    }

    // === Transitions ===

    /// Next snapshot with a newly dealt pattern and cleared input.
    #[must_use]
    pub(crate) fn with_pattern(&self, pattern: Pattern) -> Self {
        Self {
            current_pattern: pattern,
            user_input: SmallVec::new(),
            ..self.clone()
        }
    }

    /// Next snapshot with one more symbol entered.
    #[must_use]
    pub(crate) fn with_input(&self, symbol: Symbol) -> Self {
        debug_assert!(self.user_input.len() < self.current_pattern.len());
        let mut user_input = self.user_input.clone();
        user_input.push(symbol);
        Self {
            user_input,
            ..self.clone()
        }
    }

    /// Next snapshot with one attempt counted.
    #[must_use]
    pub(crate) fn with_attempt(&self, matched: bool) -> Self {
        let (score, missed) = if matched {
            (self.score + 1, self.missed)
        } else {
            (self.score, self.missed + 1)
        };
        Self {
            score,
            missed,
            total_attempts: self.total_attempts + 1,
            ..self.clone()
        }
    }
}
