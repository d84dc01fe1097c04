//! Node identifiers backed by a global string interner.
//!
//! Layout code copies node identities around freely (sibling snapshots, slot
//! lookups, log records), so [`Id`] is a `Copy` symbol rather than an owned
//! string.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for node identifiers.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identity of a diagram node.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let scope = Id::new("scope_1");
/// assert_eq!(scope, "scope_1");
/// assert_eq!(scope, Id::new("scope_1"));
/// assert_eq!(scope.to_string(), "scope_1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the identifier's text without allocating.
    pub fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Resolve into an owned string first so the lock is not held while
        // the formatter runs arbitrary writer code.
        let name = self.with_str(str::to_owned);
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
