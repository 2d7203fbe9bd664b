//! faultline IR - Core Data Model Types
//!
//! This crate contains the shared data structures for the faultline
//! origin-classification system:
//! - `Name` for interned identifiers
//! - `ExceptionKind` for error-type identity
//! - `ExceptionSet` for ordered, deduplicated result sets
//! - `SourceUnit` / `CodeUnitIdentity` for code-unit identity
//! - `ErrorRecord` / `FrameRecord` for propagating-error snapshots
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: exception kinds and unit names become `Name(u32)`,
//!   so set membership and identity checks are integer comparisons.
//! - **Share, don't own**: error and frame records are linked through `Arc`;
//!   this system holds traversal references while the propagation side owns
//!   the records themselves.
//! - **Identity over content**: deduplication and matching key on interned
//!   identity, never on message text.

mod kind;
mod name;
mod pos;
mod record;
mod set;
mod unit;

pub use kind::ExceptionKind;
pub use name::Name;
pub use pos::SourcePos;
pub use record::{ErrorRecord, FrameRecord};
pub use set::ExceptionSet;
pub use unit::{CodeUnitIdentity, SourceUnit};
