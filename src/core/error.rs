//! Configuration errors.
//!
//! A session can only fail before it starts. Once an `Engine` exists,
//! every gameplay operation is infallible.

use thiserror::Error;

/// Errors raised while building or loading a `GameConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The pattern catalog has no entries.
    #[error("pattern catalog is empty")]
    EmptyCatalog,

    /// A catalog entry has no symbols.
    #[error("pattern {index} in catalog is empty")]
    EmptyPattern {
        /// Position of the offending entry in the catalog.
        index: usize,
    },

    /// The game would end before any attempt.
    #[error("target score must be positive")]
    ZeroTargetScore,

    /// A symbol was not `L` or `R`.
    #[error("invalid symbol {0:?}, expected \"L\" or \"R\"")]
    InvalidSymbol(String),

    /// A raw key is bound to more than one input event.
    #[error("key {key:?} is bound to both {first} and {second}")]
    ConflictingKey {
        /// The normalized key identifier.
        key: String,
        /// The event it was first bound to.
        first: String,
        /// The event it was bound to again.
        second: String,
    },

    /// A key identifier was blank.
    #[error("key identifier is empty")]
    EmptyKey,

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),
}
