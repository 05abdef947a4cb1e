//! Mapping from raw key identifiers to input events.
//!
//! The engine never sees raw keys. A front end normalizes whatever its
//! host reports into a `RawKey`, resolves it here, and forwards the
//! resulting `InputEvent`. Keys with no binding resolve to `None` and
//! are dropped before they reach the engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::symbol::Symbol;

/// A normalized key identifier.
///
/// Identifiers are trimmed and lowercased; a literal space becomes
/// `"space"`, so `" "`, `"Space"` and `"SPACE"` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RawKey(String);

impl RawKey {
    /// Identifier of the space bar.
    pub const SPACE: &'static str = "space";

    /// Normalize a key identifier.
    pub fn new(key: impl AsRef<str>) -> Result<Self, ConfigError> {
        let key = key.as_ref();
        if key == " " {
            return Ok(Self(Self::SPACE.to_string()));
        }
        let normalized = key.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(Self(normalized))
    }

    /// Key for a typed character.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            return Self(Self::SPACE.to_string());
        }
        Self(c.to_lowercase().collect())
    }

    /// The normalized identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RawKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RawKey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RawKey> for String {
    fn from(key: RawKey) -> Self {
        key.0
    }
}

/// A discrete event delivered to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// One entered symbol.
    Symbol(Symbol),
    /// Reset the session.
    Restart,
}

impl std::fmt::Display for InputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputEvent::Symbol(symbol) => write!(f, "Symbol({symbol})"),
            InputEvent::Restart => f.write_str("Restart"),
        }
    }
}

/// Which keys produce which events.
///
/// Every key is bound to at most one event; construction fails on overlap.
///
/// ## Example
///
/// ```
/// use rhythm_match::input::{KeyMapping, InputEvent, RawKey};
/// use rhythm_match::core::Symbol;
///
/// let keys = KeyMapping::default();
///
/// assert_eq!(keys.resolve_str("Q"), Some(InputEvent::Symbol(Symbol::L)));
/// assert_eq!(keys.resolve_str(" "), Some(InputEvent::Restart));
/// assert_eq!(keys.resolve_str("z"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeyBindingsFile", into = "KeyBindingsFile")]
pub struct KeyMapping {
    left_keys: Vec<RawKey>,
    right_keys: Vec<RawKey>,
    restart_key: RawKey,
    lookup: FxHashMap<RawKey, InputEvent>,
}

impl KeyMapping {
    /// Build a mapping, rejecting any key bound twice.
    pub fn new(
        left_keys: Vec<RawKey>,
        right_keys: Vec<RawKey>,
        restart_key: RawKey,
    ) -> Result<Self, ConfigError> {
        let lookup = Self::lookup_table(&left_keys, &right_keys, &restart_key)?;
        Ok(Self {
            left_keys,
            right_keys,
            restart_key,
            lookup,
        })
    }

    /// Key-to-event table. Fails on the first key bound to two events.
    fn lookup_table(
        left_keys: &[RawKey],
        right_keys: &[RawKey],
        restart_key: &RawKey,
    ) -> Result<FxHashMap<RawKey, InputEvent>, ConfigError> {
        let mut lookup: FxHashMap<RawKey, InputEvent> = FxHashMap::default();

        let bindings = left_keys
            .iter()
            .map(|k| (k, InputEvent::Symbol(Symbol::L)))
            .chain(right_keys.iter().map(|k| (k, InputEvent::Symbol(Symbol::R))))
            .chain(std::iter::once((restart_key, InputEvent::Restart)));

        for (key, event) in bindings {
            match lookup.get(key) {
                // same key listed twice for one event
                Some(existing) if *existing == event => {}
                Some(existing) => {
                    return Err(ConfigError::ConflictingKey {
                        key: key.to_string(),
                        first: existing.to_string(),
                        second: event.to_string(),
                    });
                }
                None => {
                    lookup.insert(key.clone(), event);
                }
            }
        }

        Ok(lookup)
    }

    /// Build a mapping from string identifiers.
    pub fn from_strs(left: &[&str], right: &[&str], restart: &str) -> Result<Self, ConfigError> {
        let left = left.iter().map(RawKey::new).collect::<Result<Vec<_>, _>>()?;
        let right = right.iter().map(RawKey::new).collect::<Result<Vec<_>, _>>()?;
        Self::new(left, right, RawKey::new(restart)?)
    }

    /// Resolve a raw key. Unbound keys produce no event.
    #[must_use]
    pub fn resolve(&self, key: &RawKey) -> Option<InputEvent> {
        self.lookup.get(key).copied()
    }

    /// Resolve an unnormalized identifier.
    #[must_use]
    pub fn resolve_str(&self, key: &str) -> Option<InputEvent> {
        let key = RawKey::new(key).ok()?;
        self.resolve(&key)
    }

    /// Keys that enter `L`.
    #[must_use]
    pub fn left_keys(&self) -> &[RawKey] {
        &self.left_keys
    }

    /// Keys that enter `R`.
    #[must_use]
    pub fn right_keys(&self) -> &[RawKey] {
        &self.right_keys
    }

    /// The restart key.
    #[must_use]
    pub fn restart_key(&self) -> &RawKey {
        &self.restart_key
    }
}

impl Default for KeyMapping {
    /// `q`/`w`/`e` for left, `i`/`o`/`p` for right, space to restart.
    ///
    /// Panics if the default keys overlap, which they never do.
    fn default() -> Self {
        let key = RawKey::from_char;
        Self::new(
            vec![key('q'), key('w'), key('e')],
            vec![key('i'), key('o'), key('p')],
            key(' '),
        )
        .expect("default key bindings are disjoint")
    }
}

/// On-disk shape of a key mapping. Missing fields take the defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct KeyBindingsFile {
    #[serde(default)]
    left: Option<Vec<RawKey>>,
    #[serde(default)]
    right: Option<Vec<RawKey>>,
    #[serde(default)]
    restart: Option<RawKey>,
}

impl TryFrom<KeyBindingsFile> for KeyMapping {
    type Error = ConfigError;

    fn try_from(file: KeyBindingsFile) -> Result<Self, Self::Error> {
        let defaults = KeyMapping::default();
        Self::new(
            file.left.unwrap_or(defaults.left_keys),
            file.right.unwrap_or(defaults.right_keys),
            file.restart.unwrap_or(defaults.restart_key),
        )
    }
}

impl From<KeyMapping> for KeyBindingsFile {
    fn from(keys: KeyMapping) -> Self {
        Self {
            left: Some(keys.left_keys),
            right: Some(keys.right_keys),
            restart: Some(keys.restart_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_key_normalization() {
        assert_eq!(RawKey::new("Q").unwrap().as_str(), "q");
        assert_eq!(RawKey::new(" ").unwrap().as_str(), "space");
        assert_eq!(RawKey::new("Space").unwrap(), RawKey::from_char(' '));
        assert_eq!(RawKey::from_char('P'), RawKey::new("p").unwrap());
        assert_eq!(RawKey::new(""), Err(ConfigError::EmptyKey));
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyMapping::default();

        for k in ["q", "w", "e", "Q"] {
            assert_eq!(keys.resolve_str(k), Some(InputEvent::Symbol(Symbol::L)));
        }
        for k in ["i", "o", "p", "P"] {
            assert_eq!(keys.resolve_str(k), Some(InputEvent::Symbol(Symbol::R)));
        }
        assert_eq!(keys.resolve(&RawKey::from_char(' ')), Some(InputEvent::Restart));
        assert_eq!(keys.resolve_str("a"), None);
        assert_eq!(keys.resolve_str("enter"), None);
        assert_eq!(keys.resolve_str(""), None);
    }

    #[test]
    fn test_default_equals_validated() {
        let built = KeyMapping::from_strs(&["q", "w", "e"], &["i", "o", "p"], "space").unwrap();
        assert_eq!(built, KeyMapping::default());
    }

    #[test]
    fn test_default_resolves_every_listed_key() {
        let keys = KeyMapping::default();

        for key in keys.left_keys() {
            assert_eq!(keys.resolve(key), Some(InputEvent::Symbol(Symbol::L)));
        }
        for key in keys.right_keys() {
            assert_eq!(keys.resolve(key), Some(InputEvent::Symbol(Symbol::R)));
        }
        assert_eq!(keys.resolve(keys.restart_key()), Some(InputEvent::Restart));
    }

    #[test]
    fn test_conflict_reported_for_first_overlap() {
        let left = vec![RawKey::new("a").unwrap()];
        let right = vec![RawKey::new("d").unwrap()];

        let err = KeyMapping::new(left, right, RawKey::new("D").unwrap()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ConflictingKey {
                key: "d".to_string(),
                first: "Symbol(R)".to_string(),
                second: "Restart".to_string(),
            }
        );
    }

    #[test]
    fn test_conflicting_key_rejected() {
        let err = KeyMapping::from_strs(&["a", "b"], &["b"], "space").unwrap_err();
        assert_eq!(
            err,
            ConfigError::ConflictingKey {
                key: "b".to_string(),
                first: "Symbol(L)".to_string(),
                second: "Symbol(R)".to_string(),
            }
        );

        assert!(KeyMapping::from_strs(&["a"], &["d"], "a").is_err());
    }

    #[test]
    fn test_duplicate_same_event_allowed() {
        let keys = KeyMapping::from_strs(&["a", "A"], &["d"], "x").unwrap();
        assert_eq!(keys.resolve_str("a"), Some(InputEvent::Symbol(Symbol::L)));
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let keys: KeyMapping = serde_json::from_str(r#"{"left": ["z"]}"#).unwrap();

        assert_eq!(keys.resolve_str("z"), Some(InputEvent::Symbol(Symbol::L)));
        assert_eq!(keys.resolve_str("q"), None);
        assert_eq!(keys.resolve_str("p"), Some(InputEvent::Symbol(Symbol::R)));
        assert_eq!(keys.resolve_str("space"), Some(InputEvent::Restart));
    }
}
