//! Frame walking.
//!
//! Traverses the linked frame records attached to an error, yielding each
//! frame's owning code unit, innermost first. Attribution goes through
//! the registry's path index with a small per-walk cache, so identities
//! are resolved lazily per call and never held globally.

use std::path::Path;
use std::sync::Arc;

use faultline_ir::{CodeUnitIdentity, FrameRecord};
use rustc_hash::FxHashMap;

use crate::registry::UnitRegistry;

/// The owning unit of one frame, as seen by the walker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FrameOrigin {
    /// The frame's file maps to a registered, file-backed unit.
    Unit(CodeUnitIdentity),
    /// Dynamically generated or unregistered code; walking continues.
    Unknown,
}

impl FrameOrigin {
    /// The resolved identity, if this frame was attributable.
    pub fn unit(&self) -> Option<&CodeUnitIdentity> {
        match self {
            FrameOrigin::Unit(identity) => Some(identity),
            FrameOrigin::Unknown => None,
        }
    }
}

/// Lazy, finite, restartable walk over a frame chain, innermost first.
///
/// Restartable because it is `Clone`: cloning mid-walk forks the
/// traversal. An absent chain walks as an empty sequence. The walker
/// holds only traversal references; the frames stay owned by the
/// propagation side.
#[derive(Clone, Debug)]
pub struct FrameWalk<'r> {
    registry: &'r UnitRegistry,
    current: Option<Arc<FrameRecord>>,
    cache: FxHashMap<Arc<Path>, Option<CodeUnitIdentity>>,
}

impl<'r> FrameWalk<'r> {
    /// Walk the chain headed by `head` (innermost frame).
    pub fn new(registry: &'r UnitRegistry, head: Option<&Arc<FrameRecord>>) -> Self {
        FrameWalk {
            registry,
            current: head.cloned(),
            cache: FxHashMap::default(),
        }
    }

    fn resolve(&mut self, frame: &FrameRecord) -> FrameOrigin {
        let Some(path) = frame.path() else {
            return FrameOrigin::Unknown;
        };
        if let Some(cached) = self.cache.get(path) {
            return cached.clone().map_or(FrameOrigin::Unknown, FrameOrigin::Unit);
        }
        let resolved = self.registry.by_path(path).and_then(|unit| unit.identity());
        self.cache.insert(Arc::clone(path), resolved.clone());
        resolved.map_or(FrameOrigin::Unknown, FrameOrigin::Unit)
    }
}

impl Iterator for FrameWalk<'_> {
    type Item = FrameOrigin;

    fn next(&mut self) -> Option<FrameOrigin> {
        let frame = self.current.take()?;
        self.current = frame.parent().cloned();
        Some(self.resolve(&frame))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
