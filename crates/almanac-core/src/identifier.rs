//! Entity identifiers backed by string interning
//!
//! This module provides the [`Id`] type used for entity names. One event may
//! belong to several entities and the same entity appears on many events, so
//! names are interned once and shared as cheap `Copy` handles.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for entity names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned entity identifier.
///
/// Two ids compare equal exactly when their names are byte-for-byte equal.
/// Ordering by name is not provided; callers that need a display order sort
/// on the resolved string (see [`Id::sort_key`]).
///
/// # Examples
///
/// ```
/// use almanac_core::identifier::Id;
///
/// let police = Id::new("Police");
/// assert_eq!(police, "Police");
/// assert_eq!(police, Id::new("Police"));
/// assert_ne!(police, Id::new("police"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The entity name
    pub fn new(name: &str) -> Self {
        let symbol = interner().get_or_intern(name);
        Self(symbol)
    }

    /// Returns the resolved entity name as an owned string.
    pub fn name(&self) -> String {
        interner()
            .resolve(self.0)
            .expect("Symbol should exist in interner")
            .to_string()
    }

    /// Case-insensitive sort key for presenting entities.
    ///
    /// # Examples
    ///
    /// ```
    /// use almanac_core::identifier::Id;
    ///
    /// assert_eq!(Id::new("Bravo").sort_key(), Id::new("bravo").sort_key());
    /// ```
    pub fn sort_key(&self) -> String {
        self.name().to_lowercase()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = Id::new("Harbour Authority");
        let b: Id = "Harbour Authority".into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_ne!(Id::new("Ferry"), Id::new("ferry"));
    }

    #[test]
    fn test_display_and_name_agree() {
        let id = Id::new("Coast Guard");
        assert_eq!(id.to_string(), "Coast Guard");
        assert_eq!(id.name(), "Coast Guard");
    }

    #[test]
    fn test_sort_key_is_case_insensitive() {
        assert_eq!(Id::new("Zulu").sort_key(), "zulu");
    }

    #[test]
    fn test_compare_with_str() {
        let id = Id::new("Witness");
        assert!(id == "Witness");
        assert!(id != "witness");
    }
}
