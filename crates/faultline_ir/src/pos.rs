//! Source positions for frame records.

use std::fmt;

/// Line/column position inside a code unit's source text.
///
/// Lines and columns are 1-based; `SourcePos::UNKNOWN` (0:0) marks frames
/// whose position could not be recovered.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    /// Position for frames with no recoverable location.
    pub const UNKNOWN: SourcePos = SourcePos { line: 0, column: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        SourcePos { line, column }
    }

    /// Position at the start of a line.
    #[inline]
    pub const fn line_start(line: u32) -> Self {
        SourcePos { line, column: 1 }
    }
}

impl fmt::Debug for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourcePos({}:{})", self.line, self.column)
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
