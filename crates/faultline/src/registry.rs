//! Loaded-unit registry.
//!
//! Plays the role the host runtime's module table would play: a
//! process-wide map from qualified names to loaded units, with a
//! secondary index from backing file path to name so frames can be
//! attributed. Registration belongs to the embedding; this system's
//! components only read.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use faultline_ir::{Name, SourceUnit};

/// Concurrent table of loaded code units.
///
/// Two units may not share a name; a later registration replaces the
/// earlier one in both indexes (last-registered wins per path, too).
#[derive(Debug, Default)]
pub struct UnitRegistry {
    by_name: DashMap<Name, Arc<SourceUnit>>,
    path_index: DashMap<PathBuf, Name>,
}

impl UnitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        UnitRegistry::default()
    }

    /// Register a unit, indexing it by name and (if file-backed) by path.
    pub fn register(&self, unit: SourceUnit) -> Arc<SourceUnit> {
        let unit = Arc::new(unit);
        if let Some(path) = unit.path() {
            self.path_index.insert(path.to_path_buf(), unit.name());
        }
        self.by_name.insert(unit.name(), Arc::clone(&unit));
        unit
    }

    /// Look up a unit by interned name.
    pub fn get(&self, name: Name) -> Option<Arc<SourceUnit>> {
        self.by_name.get(&name).map(|entry| Arc::clone(&entry))
    }

    /// Look up a unit by name text.
    pub fn lookup(&self, name: &str) -> Option<Arc<SourceUnit>> {
        self.get(Name::intern(name))
    }

    /// Look up the unit backed by `path`, if one is registered.
    pub fn by_path(&self, path: &Path) -> Option<Arc<SourceUnit>> {
        let name = *self.path_index.get(path)?;
        self.get(name)
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no units are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
