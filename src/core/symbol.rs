//! The two discrete input classes.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One of the two inputs a player can enter.
///
/// Serializes as the one-letter string `"L"` or `"R"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Left input.
    #[serde(rename = "L")]
    L,
    /// Right input.
    #[serde(rename = "R")]
    R,
}

impl Symbol {
    /// The other symbol.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Symbol::L => Symbol::R,
            Symbol::R => Symbol::L,
        }
    }

    /// Parse a single character, case insensitive.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Symbol::L),
            'R' => Some(Symbol::R),
            _ => None,
        }
    }

    /// The display letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::L => 'L',
            Symbol::R => 'R',
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for Symbol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Symbol::from_char(c).ok_or_else(|| ConfigError::InvalidSymbol(s.to_string()))
            }
            _ => Err(ConfigError::InvalidSymbol(s.to_string())),
        }
    }
}
