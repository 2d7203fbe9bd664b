//! Target-unit resolution.

use std::sync::Arc;

use faultline_ir::{CodeUnitIdentity, Name, SourceUnit};
use rustc_hash::FxHashMap;

use crate::error::InvalidUnitError;
use crate::registry::UnitRegistry;

/// A caller-supplied reference to a code unit.
#[derive(Clone, Debug)]
pub enum UnitRef {
    /// An already-loaded unit object.
    Loaded(Arc<SourceUnit>),
    /// A bare qualified name, resolved against the registry.
    Named(String),
}

impl From<&str> for UnitRef {
    fn from(name: &str) -> Self {
        UnitRef::Named(name.to_owned())
    }
}

impl From<Arc<SourceUnit>> for UnitRef {
    fn from(unit: Arc<SourceUnit>) -> Self {
        UnitRef::Loaded(unit)
    }
}

impl From<&Arc<SourceUnit>> for UnitRef {
    fn from(unit: &Arc<SourceUnit>) -> Self {
        UnitRef::Loaded(Arc::clone(unit))
    }
}

/// A resolved target: the loaded unit plus its canonical identity.
#[derive(Clone, Debug)]
pub struct ResolvedUnit {
    pub unit: Arc<SourceUnit>,
    pub identity: CodeUnitIdentity,
}

/// Normalizes unit references into canonical identities.
///
/// Resolution is cached per instance, and instances live for one matching
/// call — never globally — so a unit reloaded between calls is observed
/// fresh on the next call.
pub struct SourceUnitResolver<'r> {
    registry: &'r UnitRegistry,
    cache: FxHashMap<Name, Result<ResolvedUnit, InvalidUnitError>>,
}

impl<'r> SourceUnitResolver<'r> {
    /// Create a resolver over `registry`.
    pub fn new(registry: &'r UnitRegistry) -> Self {
        SourceUnitResolver {
            registry,
            cache: FxHashMap::default(),
        }
    }

    /// Resolve a reference to a loaded unit and its identity.
    ///
    /// Fails with [`InvalidUnitError`] when the name is not registered or
    /// the unit has no retrievable file path (builtin units). This is a
    /// reported, non-fatal condition the caller may elect to skip.
    pub fn resolve(&mut self, target: &UnitRef) -> Result<ResolvedUnit, InvalidUnitError> {
        match target {
            UnitRef::Loaded(unit) => self.resolve_loaded(unit),
            UnitRef::Named(name) => {
                let name = Name::intern(name);
                match self.registry.get(name) {
                    Some(unit) => self.resolve_loaded(&unit),
                    None => Err(InvalidUnitError {
                        unit: name,
                        reason: "no unit of this name is registered".to_owned(),
                    }),
                }
            }
        }
    }

    fn resolve_loaded(&mut self, unit: &Arc<SourceUnit>) -> Result<ResolvedUnit, InvalidUnitError> {
        if let Some(hit) = self.cache.get(&unit.name()) {
            return hit.clone();
        }
        let resolved = unit
            .identity()
            .map(|identity| ResolvedUnit {
                unit: Arc::clone(unit),
                identity,
            })
            .ok_or_else(|| InvalidUnitError {
                unit: unit.name(),
                reason: "unit has no retrievable file path".to_owned(),
            });
        self.cache.insert(unit.name(), resolved.clone());
        resolved
    }
}
