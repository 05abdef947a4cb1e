//! Game rules: the engine that turns input events into new snapshots.
//!
//! The engine is the single writer of game state. Renderers read the
//! published `Arc<GameState>` at whatever cadence they like; nothing
//! here blocks or loops.

pub mod engine;
pub mod history;

pub use engine::{Engine, InputOutcome};
pub use history::SnapshotHistory;
