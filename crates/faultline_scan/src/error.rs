//! Scanner error types.

use faultline_ir::Name;

/// Failure to obtain a unit's source text.
///
/// Surfaced to the caller rather than swallowed: a unit that cannot be
/// read changes the completeness guarantee of the scan result.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The unit has no source backing at all (builtin / compiled-only).
    #[error("source for unit `{unit}` is unavailable: {reason}")]
    SourceUnavailable { unit: Name, reason: String },

    /// The unit's backing file could not be read.
    #[error("could not read source for unit `{unit}`")]
    Io {
        unit: Name,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// The unit the failure refers to.
    pub fn unit(&self) -> Name {
        match self {
            ScanError::SourceUnavailable { unit, .. } | ScanError::Io { unit, .. } => *unit,
        }
    }
}
