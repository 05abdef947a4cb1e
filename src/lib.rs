//! # rhythm-match
//!
//! Engine for a two-button rhythm pattern game: the player reproduces a
//! randomly dealt sequence of `L`/`R` inputs, and a fixed number of
//! attempts make up a game.
//!
//! ## Design Principles
//!
//! 1. **Immutable Snapshots**: Game state is never modified in place.
//!    Every accepted operation publishes one new `Arc<GameState>`.
//!
//! 2. **Single Writer**: The `Engine` is the only thing that changes state.
//!    Input sources feed it events; renderers read snapshots.
//!
//! 3. **Configuration Over Convention**: Attempt target, patterns and key
//!    bindings come from `GameConfig`, validated before a session starts.
//!
//! ## Modules
//!
//! - `core`: Symbols, patterns, snapshots, RNG, configuration, errors
//! - `input`: Raw key normalization and key-to-event mapping
//! - `rules`: The engine and snapshot history
//! - `render`: Renderer trait and text view models

pub mod core;
pub mod input;
pub mod rules;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Symbol, Pattern, PatternCatalog,
    GameRng, GameRngState,
    GameConfig, GameState, GameStatus, Slot,
    ConfigError,
};

pub use crate::input::{InputEvent, KeyMapping, RawKey};

pub use crate::rules::{Engine, InputOutcome, SnapshotHistory};

pub use crate::render::{Renderer, TextRenderer, PatternLine, ScoreLine, Token, Tone};
