//! Target patterns and the catalog they are drawn from.
//!
//! ## Pattern
//!
//! An ordered sequence of symbols the player must reproduce exactly.
//! Stored inline for up to four symbols, which covers every pattern in
//! the default catalog without heap allocation.
//!
//! ## PatternCatalog
//!
//! The fixed, validated set of candidates. A catalog is never empty and
//! never contains an empty pattern, so selecting from it cannot fail.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::ConfigError;
use super::rng::GameRng;
use super::symbol::Symbol;

/// Inline storage for symbol sequences.
pub type Symbols = SmallVec<[Symbol; 4]>;

/// An ordered sequence of symbols.
///
/// Serializes as compact text, e.g. `"LRLR"`.
///
/// ## Example
///
/// ```
/// use rhythm_match::core::{Pattern, Symbol};
///
/// let pattern: Pattern = "LRL".parse().unwrap();
///
/// assert!(pattern.matches(&[Symbol::L, Symbol::R, Symbol::L]));
/// assert!(!pattern.matches(&[Symbol::L, Symbol::R]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    symbols: Symbols,
}

impl Pattern {
    /// Create a pattern from symbols.
    #[must_use]
    pub fn new(symbols: &[Symbol]) -> Self {
        Self {
            symbols: SmallVec::from_slice(symbols),
        }
    }

    /// The empty pattern. Only appears in a state that has not been dealt yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the pattern has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }

    /// The symbols as a slice.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Iterate over the symbols in order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }

    /// The pattern with every symbol flipped. Never matches `self`
    /// unless both are empty.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            symbols: self.symbols.iter().map(|s| s.flipped()).collect(),
        }
    }

    /// Check whether an entered sequence reproduces this pattern.
    ///
    /// Exact length is required; a correct prefix or a sequence with
    /// extra symbols never matches. Comparison stops at the first
    /// differing position.
    #[must_use]
    pub fn matches(&self, input: &[Symbol]) -> bool {
        if input.len() != self.symbols.len() {
            return false;
        }
        self.symbols.iter().zip(input).all(|(expected, entered)| expected == entered)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = ConfigError;

    /// Parse compact text such as `"LLR"`. Whitespace and commas are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                Symbol::from_char(c).ok_or_else(|| ConfigError::InvalidSymbol(c.to_string()))
            })
            .collect::<Result<Symbols, _>>()?;
        Ok(Self { symbols })
    }
}

impl TryFrom<String> for Pattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.to_string()
    }
}

/// The fixed set of patterns a game draws from.
///
/// ## Example
///
/// ```
/// use rhythm_match::core::{PatternCatalog, Pattern, Symbol};
///
/// let catalog = PatternCatalog::new(vec![
///     Pattern::new(&[Symbol::L, Symbol::R]),
///     "RRR".parse().unwrap(),
/// ]).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert!(PatternCatalog::new(vec![]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pattern>", into = "Vec<Pattern>")]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Create a catalog, rejecting an empty list or an empty entry.
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, ConfigError> {
        if patterns.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(index) = patterns.iter().position(Pattern::is_empty) {
            return Err(ConfigError::EmptyPattern { index });
        }
        Ok(Self { patterns })
    }

    /// Parse a catalog from compact text entries.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        let patterns = entries
            .iter()
            .map(|entry| entry.as_ref().parse())
            .collect::<Result<Vec<Pattern>, _>>()?;
        Self::new(patterns)
    }

    /// Number of patterns. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the catalog has no patterns. False once validated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern at an index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Iterate over the patterns.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Pick a pattern uniformly at random.
    ///
    /// Every entry has the same weight; longer patterns are not favored.
    pub fn choose(&self, rng: &mut GameRng) -> &Pattern {
        // Non-empty by construction, so the fallback is never taken.
        rng.choose(&self.patterns).unwrap_or(&self.patterns[0])
    }

    /// Index of a pattern, if it is in the catalog.
    #[must_use]
    pub fn position(&self, pattern: &Pattern) -> Option<usize> {
        self.patterns.iter().position(|p| p == pattern)
    }
}

impl Default for PatternCatalog {
    /// The seven rhythm patterns of the classic game.
    fn default() -> Self {
        use Symbol::{L, R};

        Self {
            patterns: vec![
                Pattern::new(&[L, L, L]),
                Pattern::new(&[R, R]),
                Pattern::new(&[L, R, L, R]),
                Pattern::new(&[L, L, R, R]),
                Pattern::new(&[R, R, R]),
                Pattern::new(&[L, R]),
                Pattern::new(&[R, L, R, L]),
            ],
        }
    }
}

impl TryFrom<Vec<Pattern>> for PatternCatalog {
    type Error = ConfigError;

    fn try_from(patterns: Vec<Pattern>) -> Result<Self, Self::Error> {
        Self::new(patterns)
    }
}

impl From<PatternCatalog> for Vec<Pattern> {
    fn from(catalog: PatternCatalog) -> Self {
        catalog.patterns
    }
}
