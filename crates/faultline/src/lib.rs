//! faultline - classify propagating errors by code-unit origin.
//!
//! Two capabilities compose the core:
//!
//! - **Origin matching** ([`OriginMatcher`]): given target code units and
//!   the calling context's active-error state, decide whether any frame in
//!   the error's causal chain belongs to those units and yield the set of
//!   concrete error types observed there.
//! - **Declaration scanning** ([`scan_declared_errors`]): absent an active
//!   error, statically extract the distinct error types a unit's source
//!   explicitly raises.
//!
//! Supporting pieces: [`flatten_chain`] follows cause/context links across
//! linked errors, [`is_error_active`] reports whether the calling context
//! has an unhandled error in flight, and [`FrameWalk`] traverses a frame
//! chain yielding each frame's owning unit.
//!
//! This system classifies and reports; it never recovers or suppresses.
//! The propagation side owns all records and the active-error table's
//! write half (see [`ActiveErrorTable::propagate`]); everything here reads.
//!
//! # Dispatch predicate
//!
//! Rust has no ambient catch-by-predicate hook, so the returned
//! [`ExceptionSet`] exposes an explicit [`ExceptionSet::matches`] predicate
//! and callers branch on it:
//!
//! ```
//! use faultline::{ExceptionKind, ErrorRecord, ExceptionSet};
//!
//! let set = ExceptionSet::single(ExceptionKind::new("TimeoutError"));
//! let active = ErrorRecord::new(ExceptionKind::new("TimeoutError"), "deadline passed");
//! assert!(set.matches(&active));
//! ```

mod active;
mod chain;
mod error;
mod matcher;
mod registry;
mod resolve;
mod walk;

pub use faultline_ir::{
    CodeUnitIdentity, ErrorRecord, ExceptionKind, ExceptionSet, FrameRecord, Name, SourcePos,
    SourceUnit,
};
pub use faultline_scan::{scan_declared_errors, DeclarationScanner, ScanError};

pub use active::{is_error_active, ActiveErrorTable, ContextId, Propagation};
pub use chain::{flatten_chain, Chain, MAX_CHAIN_DEPTH};
pub use error::{Error, InvalidUnitError, MalformedChain, NoMatchGuard};
pub use matcher::{MatchPolicy, OriginMatcher};
pub use registry::UnitRegistry;
pub use resolve::{ResolvedUnit, SourceUnitResolver, UnitRef};
pub use walk::{FrameOrigin, FrameWalk};
