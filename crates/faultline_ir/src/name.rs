//! Interned string identifiers.
//!
//! A process-global interner backs `Name`, so identifier equality is a
//! `u32` comparison and resolved text lives for the life of the process.
//! The interner is append-only; interned strings are never deallocated.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned string identifier.
///
/// Compact 32-bit handle into the process-global interner. Equality and
/// hashing operate on the handle, which is stable for the process lifetime.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Intern `text`, returning its stable handle.
    ///
    /// Interning the same text twice returns the same `Name`.
    ///
    /// # Panics
    ///
    /// Panics if the process interns more than `u32::MAX` distinct
    /// strings; handles are 32-bit and never reused.
    pub fn intern(text: &str) -> Self {
        interner().intern(text)
    }

    /// Resolve the interned text.
    pub fn as_str(self) -> &'static str {
        interner().resolve(self)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Interner storage: content → index map plus index → content table.
struct InternState {
    map: FxHashMap<&'static str, u32>,
    names: Vec<&'static str>,
}

impl InternState {
    fn with_empty() -> Self {
        // Pre-intern the empty string at index 0 so Name::EMPTY resolves.
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        InternState {
            map,
            names: vec![empty],
        }
    }
}

/// Process-global string interner.
///
/// A single `RwLock` suffices here: this library interns a few dozen unit
/// and exception-kind names, not whole-program identifier sets.
struct StringInterner {
    state: RwLock<InternState>,
}

impl StringInterner {
    fn new() -> Self {
        StringInterner {
            state: RwLock::new(InternState::with_empty()),
        }
    }

    fn intern(&self, text: &str) -> Name {
        if let Some(&index) = self.state.read().map.get(text) {
            return Name(index);
        }

        let mut state = self.state.write();
        // Re-check under the write lock: another thread may have won.
        if let Some(&index) = state.map.get(text) {
            return Name(index);
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        // Hard cap: handles are u32. Saturating the table must not
        // silently alias distinct strings to one handle.
        let Ok(index) = u32::try_from(state.names.len()) else {
            panic!("string interner exhausted its u32 handle space");
        };
        state.names.push(leaked);
        state.map.insert(leaked, index);
        Name(index)
    }

    fn resolve(&self, name: Name) -> &'static str {
        self.state
            .read()
            .names
            .get(name.0 as usize)
            .copied()
            .unwrap_or("")
    }
}

fn interner() -> &'static StringInterner {
    static INTERNER: OnceLock<StringInterner> = OnceLock::new();
    INTERNER.get_or_init(StringInterner::new)
}
