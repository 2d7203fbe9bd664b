//! Exception-type identity.

use std::fmt;

use crate::Name;

/// Identity of an error type, keyed by its interned name.
///
/// Two kinds are the same error type iff their names intern to the same
/// handle. Messages never participate in identity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ExceptionKind(Name);

impl ExceptionKind {
    /// Intern an exception kind from its type name.
    pub fn new(type_name: &str) -> Self {
        ExceptionKind(Name::intern(type_name))
    }

    /// Wrap an already-interned name.
    #[inline]
    pub const fn from_name(name: Name) -> Self {
        ExceptionKind(name)
    }

    /// The interned name of this kind.
    #[inline]
    pub const fn name(self) -> Name {
        self.0
    }

    /// Resolve the type name text.
    pub fn as_str(self) -> &'static str {
        self.0.as_str()
    }
}

impl fmt::Debug for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExceptionKind({})", self.as_str())
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
