//! Static declaration scanning for faultline.
//!
//! Reads a code unit's source text and extracts the distinct error types it
//! explicitly raises, without executing or importing anything. The pass is
//! purely syntactic: a logos tokenizer produces a raw token stream, and a
//! collector walks it recognizing raise constructs and the handler/alias
//! bindings that make re-raised variables statically determinable.
//!
//! The result is an [`ExceptionSet`](faultline_ir::ExceptionSet) in
//! first-seen order across all scanned units.

mod error;
mod scanner;
mod token;

use faultline_ir::{ExceptionSet, SourceUnit};

pub use error::ScanError;
pub use scanner::DeclarationScanner;
pub use token::RawToken;

/// Scan one or more units and collect every statically declared error type.
///
/// Raw utility usable independent of origin matching. Fails with
/// [`ScanError`] when any unit's source text cannot be read, since a
/// partial scan would silently weaken the completeness of the result.
pub fn scan_declared_errors<'a>(
    units: impl IntoIterator<Item = &'a SourceUnit>,
) -> Result<ExceptionSet, ScanError> {
    DeclarationScanner::new().scan_units(units)
}
