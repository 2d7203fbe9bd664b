//! Error taxonomy.
//!
//! Every failure is raised to the immediate caller; there are no retries
//! and no recovery. Classification is either possible or it reports why
//! not.

use faultline_ir::Name;
use faultline_scan::ScanError;

/// A supplied target could not be resolved to a code-unit identity.
///
/// Reported, non-fatal: callers may opt into skipping such targets with
/// the matcher's all-targets-optional mode.
#[derive(Clone, Debug, thiserror::Error)]
#[error("unit `{unit}` cannot be resolved: {reason}")]
pub struct InvalidUnitError {
    pub unit: Name,
    pub reason: String,
}

/// A cause/context chain that cannot be flattened: the links exceed the
/// traversal depth cap.
///
/// The cap bounds any pathological link structure, so a malformed chain
/// is a reported condition, never a hang.
#[derive(Clone, Debug, thiserror::Error)]
#[error("cause/context chain exceeds the depth cap of {cap}")]
pub struct MalformedChain {
    pub cap: usize,
}

/// Sentinel signaling "no classification produced".
///
/// Public only so callers can recognize it. It is not an exception kind
/// and can never appear inside an [`ExceptionSet`](faultline_ir::ExceptionSet),
/// so no dispatch decision can ever mistake it for a real matched type.
/// Unconstructible outside this crate; any path that let it masquerade as
/// a usable match would be an internal defect.
#[derive(Clone, Debug, thiserror::Error)]
#[error("no classification produced for the supplied targets")]
pub struct NoMatchGuard(pub(crate) ());

/// Any failure surfaced by this system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidUnit(#[from] InvalidUnitError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    MalformedChain(#[from] MalformedChain),

    #[error(transparent)]
    NoMatch(#[from] NoMatchGuard),
}

impl Error {
    /// Whether this is the "no classification possible" outcome, as
    /// opposed to an input or traversal failure.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch(_))
    }
}
