//! Ordered, deduplicated sets of exception kinds.

use std::fmt;

use smallvec::SmallVec;

use crate::{ErrorRecord, ExceptionKind};

/// An ordered set of error-type identifiers.
///
/// Insertion order is preserved; duplicates collapse by kind identity.
/// Most results hold one or two kinds, so storage is inline up to four.
///
/// The set doubles as the explicit dispatch predicate: `matches` reports
/// whether a propagating record's concrete type is a member.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ExceptionSet {
    kinds: SmallVec<[ExceptionKind; 4]>,
}

impl ExceptionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ExceptionSet {
            kinds: SmallVec::new(),
        }
    }

    /// Create a set holding a single kind.
    pub fn single(kind: ExceptionKind) -> Self {
        let mut set = ExceptionSet::new();
        set.insert(kind);
        set
    }

    /// Insert a kind, keeping first-seen order.
    ///
    /// Returns `false` if the kind was already present. Membership is by
    /// interned identity, so the scan is a few `u32` comparisons.
    pub fn insert(&mut self, kind: ExceptionKind) -> bool {
        if self.contains(kind) {
            return false;
        }
        self.kinds.push(kind);
        true
    }

    /// Whether `kind` is a member.
    pub fn contains(&self, kind: ExceptionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Dispatch predicate: does the record's concrete type belong here?
    pub fn matches(&self, record: &ErrorRecord) -> bool {
        self.contains(record.kind())
    }

    /// Number of distinct kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate kinds in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ExceptionKind> + '_ {
        self.kinds.iter().copied()
    }

    /// The kinds as an ordered slice.
    pub fn as_slice(&self) -> &[ExceptionKind] {
        &self.kinds
    }
}

impl FromIterator<ExceptionKind> for ExceptionSet {
    fn from_iter<I: IntoIterator<Item = ExceptionKind>>(iter: I) -> Self {
        let mut set = ExceptionSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<ExceptionKind> for ExceptionSet {
    fn extend<I: IntoIterator<Item = ExceptionKind>>(&mut self, iter: I) {
        for kind in iter {
            self.insert(kind);
        }
    }
}

impl<'a> IntoIterator for &'a ExceptionSet {
    type Item = ExceptionKind;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ExceptionKind>>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter().copied()
    }
}

impl fmt::Debug for ExceptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds.iter()).finish()
    }
}

impl fmt::Display for ExceptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}")?;
        }
        write!(f, "}}")
    }
}
