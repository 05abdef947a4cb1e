//! Core game types: symbols, patterns, state snapshots, RNG, configuration.
//!
//! Everything here is plain data. The `rules` module drives transitions
//! between snapshots; front ends only read them.

pub mod symbol;
pub mod pattern;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use symbol::Symbol;
pub use pattern::{Pattern, PatternCatalog, Symbols};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, DEFAULT_TARGET_SCORE};
pub use state::{GameState, GameStatus, Slot};
pub use error::ConfigError;
