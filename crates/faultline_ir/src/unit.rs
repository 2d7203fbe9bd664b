//! Code units and their canonical identities.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Name;

/// A named, file-backed body of source.
///
/// A unit may carry its source text inline (already-loaded units), a file
/// path to read it from, or neither (builtin units with no retrievable
/// source — these resolve to no identity and cannot be scanned).
#[derive(Clone, Debug)]
pub struct SourceUnit {
    name: Name,
    path: Option<PathBuf>,
    source: Option<String>,
}

impl SourceUnit {
    /// A unit whose source is read from `path` on demand.
    pub fn from_file(name: &str, path: impl Into<PathBuf>) -> Self {
        SourceUnit {
            name: Name::intern(name),
            path: Some(path.into()),
            source: None,
        }
    }

    /// A unit with its source text already in memory.
    ///
    /// The path still names the file the text came from; it is the
    /// identity key and need not exist on disk.
    pub fn with_source(name: &str, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        SourceUnit {
            name: Name::intern(name),
            path: Some(path.into()),
            source: Some(source.into()),
        }
    }

    /// A builtin unit: named, but with no retrievable source.
    pub fn builtin(name: &str) -> Self {
        SourceUnit {
            name: Name::intern(name),
            path: None,
            source: None,
        }
    }

    /// Qualified name of the unit.
    pub fn name(&self) -> Name {
        self.name
    }

    /// File path backing the unit, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Canonical identity, if the unit is file-backed.
    pub fn identity(&self) -> Option<CodeUnitIdentity> {
        self.path
            .as_deref()
            .map(|p| CodeUnitIdentity::new(self.name, p))
    }

    /// The unit's source text: inline if loaded, otherwise a synchronous
    /// local file read. Errors when the unit has no source backing at all.
    pub fn source_text(&self) -> io::Result<Cow<'_, str>> {
        if let Some(source) = &self.source {
            return Ok(Cow::Borrowed(source));
        }
        match &self.path {
            Some(path) => std::fs::read_to_string(path).map(Cow::Owned),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unit `{}` has no source backing", self.name),
            )),
        }
    }
}

/// Canonical identity of a code unit: qualified name plus file path.
///
/// Two identities are equal iff both fields match; this is the matching
/// key for frame-to-target membership tests.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct CodeUnitIdentity {
    name: Name,
    path: Arc<Path>,
}

impl CodeUnitIdentity {
    /// Create an identity from a name and path.
    pub fn new(name: Name, path: impl AsRef<Path>) -> Self {
        CodeUnitIdentity {
            name,
            path: Arc::from(path.as_ref()),
        }
    }

    /// Qualified name of the unit.
    pub fn name(&self) -> Name {
        self.name
    }

    /// File path of the unit.
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }
}

impl fmt::Debug for CodeUnitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeUnitIdentity({} @ {})", self.name, self.path.display())
    }
}

impl fmt::Display for CodeUnitIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
