//! The game engine: the only writer of game state.
//!
//! The engine owns the current snapshot and replaces it wholesale on
//! every accepted operation. Each operation runs to completion and
//! publishes at most one new snapshot, so a reader never observes a
//! half-applied step (for example input appended but not yet scored).
//!
//! ## Flow
//!
//! - `handle_input` appends a symbol
//! - once the input is as long as the pattern, it is evaluated
//! - evaluation counts a match or a miss, then deals the next pattern
//!   unless the attempt target was reached
//! - `restart` resets everything and deals a fresh pattern

use std::sync::Arc;

use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState, GameState, PatternCatalog, Symbol,
};
use crate::input::InputEvent;

use super::history::SnapshotHistory;

/// What an operation did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputOutcome {
    /// The game is over; nothing changed.
    Ignored,
    /// The symbol was appended; the pattern is not complete yet.
    Pending,
    /// The pattern was reproduced exactly.
    Matched {
        /// This attempt ended the game.
        game_over: bool,
    },
    /// The pattern was fully entered but differed.
    Missed {
        /// This attempt ended the game.
        game_over: bool,
    },
    /// The session was reset.
    Restarted,
}

impl InputOutcome {
    /// Check if this step moved the game into `GameOver`.
    #[must_use]
    pub fn finished_game(self) -> bool {
        matches!(
            self,
            InputOutcome::Matched { game_over: true } | InputOutcome::Missed { game_over: true }
        )
    }

    /// Check if this step evaluated an attempt.
    #[must_use]
    pub fn is_attempt(self) -> bool {
        matches!(self, InputOutcome::Matched { .. } | InputOutcome::Missed { .. })
    }
}

/// Owner of the current snapshot and the pattern RNG.
///
/// ## Example
///
/// ```
/// use rhythm_match::core::{GameConfig, PatternCatalog};
/// use rhythm_match::rules::{Engine, InputOutcome};
///
/// let config = GameConfig::new(3).with_catalog(PatternCatalog::parse(&["LR"]).unwrap());
/// let mut engine = Engine::new(config, 42).unwrap();
///
/// assert_eq!(engine.handle_input(rhythm_match::core::Symbol::L), InputOutcome::Pending);
/// assert_eq!(
///     engine.handle_input(rhythm_match::core::Symbol::R),
///     InputOutcome::Matched { game_over: false }
/// );
/// assert_eq!(engine.snapshot().score(), 1);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    rng: GameRng,
    current: Arc<GameState>,
    history: Option<SnapshotHistory>,
}

impl Engine {
    /// Validate the configuration and start a session with a seeded RNG.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Validate the configuration and start a session with the given RNG.
    ///
    /// The first pattern is dealt before this returns.
    pub fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            current: Arc::new(GameState::new(config.target_score)),
            config,
            rng,
            history: None,
        };
        let fresh = engine.snapshot();
        engine.current = Arc::new(engine.deal(&fresh));

        log::info!(
            "session started: target {}, {} patterns, seed {}",
            engine.config.target_score,
            engine.config.catalog.len(),
            engine.rng.seed()
        );
        Ok(engine)
    }

    /// Record up to `capacity` published snapshots, starting with the current one.
    #[must_use]
    pub fn with_history(mut self, capacity: usize) -> Self {
        let mut history = SnapshotHistory::new(capacity);
        history.record(self.current.clone());
        self.history = Some(history);
        self
    }

    // === Read access ===

    /// The current snapshot. Cheap to clone and never mutated.
    #[must_use]
    pub fn snapshot(&self) -> Arc<GameState> {
        self.current.clone()
    }

    /// Borrow the current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.current
    }

    /// The configuration this session runs with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The pattern catalog.
    #[must_use]
    pub fn catalog(&self) -> &PatternCatalog {
        &self.config.catalog
    }

    /// RNG state, for replaying the rest of the session.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Recorded snapshots, if history is enabled.
    #[must_use]
    pub fn history(&self) -> Option<&SnapshotHistory> {
        self.history.as_ref()
    }

    // === Operations ===

    /// Deal a new pattern and clear the input.
    ///
    /// Does nothing once the game is over; only `restart` deals then.
    pub fn new_pattern(&mut self) {
        if self.current.is_game_over() {
            log::trace!("new pattern ignored: game over");
            return;
        }
        let current = self.snapshot();
        let next = self.deal(&current);
        self.publish(next);
    }

    /// Enter one symbol.
    ///
    /// Any symbol is accepted positionally. The attempt is only judged
    /// once the input reaches the pattern length, and in the same step.
    pub fn handle_input(&mut self, symbol: Symbol) -> InputOutcome {
        if self.current.is_game_over() {
            log::trace!("input {} ignored: game over", symbol);
            return InputOutcome::Ignored;
        }

        let entered = self.current.with_input(symbol);
        let (next, outcome) = match self.evaluate(&entered) {
            None => (entered, InputOutcome::Pending),
            Some((scored, matched)) => {
                let game_over = scored.is_game_over();
                let next = if game_over {
                    log::info!(
                        "game over: score {}/{}, missed {}",
                        scored.score(),
                        scored.target_score(),
                        scored.missed()
                    );
                    scored
                } else {
                    self.deal(&scored)
                };
                let outcome = if matched {
                    InputOutcome::Matched { game_over }
                } else {
                    InputOutcome::Missed { game_over }
                };
                (next, outcome)
            }
        };

        self.publish(next);
        outcome
    }

    /// Reset all counters and deal a fresh pattern. Always accepted.
    pub fn restart(&mut self) {
        let fresh = GameState::new(self.config.target_score);
        let next = self.deal(&fresh);
        log::info!("restart: dealt {}", next.current_pattern());
        self.publish(next);
    }

    /// Apply an event from an input source.
    pub fn dispatch(&mut self, event: InputEvent) -> InputOutcome {
        match event {
            InputEvent::Symbol(symbol) => self.handle_input(symbol),
            InputEvent::Restart => {
                self.restart();
                InputOutcome::Restarted
            }
        }
    }

    // === Internals ===

    /// Judge a completed entry. Returns `None` while input is shorter
    /// than the pattern.
    fn evaluate(&self, entered: &GameState) -> Option<(GameState, bool)> {
        if !entered.is_entry_complete() {
            return None;
        }
        let matched = entered.current_pattern().matches(entered.user_input());
        log::debug!(
            "attempt {}: pattern {} input {} -> {}",
            entered.total_attempts() + 1,
            entered.current_pattern(),
            entered.user_input().iter().map(|s| s.as_char()).collect::<String>(),
            if matched { "match" } else { "miss" }
        );
        Some((entered.with_attempt(matched), matched))
    }

    /// Next snapshot with a freshly selected pattern.
    fn deal(&mut self, from: &GameState) -> GameState {
        let pattern = self.config.catalog.choose(&mut self.rng).clone();
        from.with_pattern(pattern)
    }

    fn publish(&mut self, next: GameState) {
        self.current = Arc::new(next);
        if let Some(history) = &mut self.history {
            history.record(self.current.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameStatus, Pattern};
    use Symbol::{L, R};

    fn engine_with(patterns: &[&str], target: u32) -> Engine {
        let config = GameConfig::new(target).with_catalog(PatternCatalog::parse(patterns).unwrap());
        Engine::new(config, 42).unwrap()
    }

    fn enter(engine: &mut Engine, symbols: &[Symbol]) -> InputOutcome {
        let mut outcome = InputOutcome::Ignored;
        for &symbol in symbols {
            outcome = engine.handle_input(symbol);
        }
        outcome
    }

    #[test]
    fn test_bootstrap_deals_pattern() {
        let engine = engine_with(&["LRL"], 10);
        let state = engine.state();

        assert_eq!(state.current_pattern(), &Pattern::new(&[L, R, L]));
        assert!(state.user_input().is_empty());
        assert_eq!(state.total_attempts(), 0);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert_eq!(Engine::new(GameConfig::new(0), 1).unwrap_err(), ConfigError::ZeroTargetScore);
    }

    #[test]
    fn test_partial_input_pending() {
        let mut engine = engine_with(&["LRL"], 10);

        assert_eq!(engine.handle_input(L), InputOutcome::Pending);
        assert_eq!(engine.handle_input(L), InputOutcome::Pending);
        assert_eq!(engine.state().user_input(), &[L, L]);
        assert_eq!(engine.state().total_attempts(), 0);
    }

    #[test]
    fn test_match_scores_and_deals() {
        let mut engine = engine_with(&["LRL"], 10);

        assert_eq!(enter(&mut engine, &[L, R, L]), InputOutcome::Matched { game_over: false });

        let state = engine.state();
        assert_eq!(state.score(), 1);
        assert_eq!(state.missed(), 0);
        assert_eq!(state.total_attempts(), 1);
        assert!(state.user_input().is_empty());
        assert_eq!(state.current_pattern(), &Pattern::new(&[L, R, L]));
    }

    #[test]
    fn test_mismatch_counts_miss() {
        let mut engine = engine_with(&["LL"], 10);

        assert_eq!(enter(&mut engine, &[R, R]), InputOutcome::Missed { game_over: false });
        assert_eq!(engine.state().missed(), 1);
        assert_eq!(engine.state().score(), 0);
    }

    #[test]
    fn test_early_mismatch_not_judged_until_complete() {
        let mut engine = engine_with(&["LLL"], 10);

        assert_eq!(engine.handle_input(R), InputOutcome::Pending);
        assert_eq!(engine.handle_input(L), InputOutcome::Pending);
        assert_eq!(engine.state().missed(), 0);
        assert_eq!(engine.handle_input(L), InputOutcome::Missed { game_over: false });
    }

    #[test]
    fn test_game_over_freezes_input() {
        let mut engine = engine_with(&["LR"], 2);

        enter(&mut engine, &[L, R]);
        assert_eq!(enter(&mut engine, &[R, R]), InputOutcome::Missed { game_over: true });

        let frozen = engine.snapshot();
        assert!(frozen.is_game_over());
        assert_eq!(frozen.user_input(), &[R, R]);

        assert_eq!(engine.handle_input(L), InputOutcome::Ignored);
        assert_eq!(engine.handle_input(R), InputOutcome::Ignored);
        engine.new_pattern();
        assert_eq!(*engine.state(), *frozen);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = engine_with(&["LR", "RRR"], 3);
        for _ in 0..3 {
            let pattern = engine.state().current_pattern().flipped();
            enter(&mut engine, pattern.symbols());
        }
        assert!(engine.state().is_game_over());

        assert_eq!(engine.dispatch(InputEvent::Restart), InputOutcome::Restarted);

        let state = engine.state();
        assert_eq!(state.score(), 0);
        assert_eq!(state.missed(), 0);
        assert_eq!(state.total_attempts(), 0);
        assert!(state.user_input().is_empty());
        assert!(engine.catalog().position(state.current_pattern()).is_some());
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_restart_mid_pattern() {
        let mut engine = engine_with(&["LLLL"], 10);
        enter(&mut engine, &[L, L]);

        engine.restart();
        assert!(engine.state().user_input().is_empty());
    }

    #[test]
    fn test_new_pattern_clears_input() {
        let mut engine = engine_with(&["RRRR"], 10);
        engine.handle_input(R);

        engine.new_pattern();
        assert!(engine.state().user_input().is_empty());
        assert_eq!(engine.state().total_attempts(), 0);
    }

    #[test]
    fn test_old_snapshot_unchanged() {
        let mut engine = engine_with(&["LR"], 10);
        let before = engine.snapshot();

        enter(&mut engine, &[L, R]);

        assert_eq!(before.score(), 0);
        assert!(before.user_input().is_empty());
        assert_eq!(engine.state().score(), 1);
    }

    #[test]
    fn test_one_snapshot_per_operation() {
        let mut engine = engine_with(&["LR"], 10).with_history(16);
        assert_eq!(engine.history().unwrap().len(), 1);

        engine.handle_input(L);
        engine.handle_input(R);
        engine.restart();

        let history = engine.history().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.get(1).unwrap().user_input(), &[L]);
        // Scoring and the next deal land in one snapshot
        assert_eq!(history.get(2).unwrap().score(), 1);
        assert!(history.get(2).unwrap().user_input().is_empty());
        assert_eq!(history.latest().unwrap().score(), 0);
    }

    #[test]
    fn test_ignored_input_not_recorded() {
        let mut engine = engine_with(&["L"], 1).with_history(16);
        engine.handle_input(L);
        let recorded = engine.history().unwrap().len();

        engine.handle_input(L);
        assert_eq!(engine.history().unwrap().len(), recorded);
    }

    #[test]
    fn test_same_seed_same_deals() {
        let config = GameConfig::default();
        let mut a = Engine::new(config.clone(), 9).unwrap();
        let mut b = Engine::new(config, 9).unwrap();

        for _ in 0..20 {
            assert_eq!(a.state().current_pattern(), b.state().current_pattern());
            a.new_pattern();
            b.new_pattern();
        }
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(InputOutcome::Matched { game_over: true }.finished_game());
        assert!(InputOutcome::Missed { game_over: true }.finished_game());
        assert!(!InputOutcome::Matched { game_over: false }.finished_game());
        assert!(!InputOutcome::Restarted.finished_game());
        assert!(InputOutcome::Missed { game_over: false }.is_attempt());
        assert!(!InputOutcome::Pending.is_attempt());
    }
}
