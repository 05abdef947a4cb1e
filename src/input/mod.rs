//! Input side of the engine boundary.
//!
//! Front ends own raw key reading. This module only defines the events
//! the engine accepts and the configurable table that produces them.

pub mod keymap;

pub use keymap::{InputEvent, KeyMapping, RawKey};
