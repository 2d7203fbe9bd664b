//! Raise-construct collector.
//!
//! Walks the raw token stream of a unit's source and extracts the error
//! type named by every explicit raise construct:
//!
//! - `raise Name`, `raise Name(...)`, `raise pkg.Name(...)` yield the full
//!   dotted path as the type identifier.
//! - `except T as v:` binds `v` to `T`; a later `raise v` yields `T`.
//! - `except (A, B) as v:` leaves `v` statically indeterminate; a later
//!   `raise v` is skipped.
//! - A simple alias assignment `v = T` (bare dotted path on the right)
//!   also binds `v`, transitively through earlier bindings.
//! - Bare `raise` names no new type and is skipped.
//!
//! Bindings are last-write-wins for the rest of the unit; block scope is
//! not tracked.

use faultline_ir::{ExceptionKind, ExceptionSet, SourceUnit};
use logos::Logos;
use rustc_hash::FxHashMap;

use crate::{RawToken, ScanError};

/// What a bound name is statically known to be.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Binding {
    /// A single error type, as a dotted path.
    Kind(String),
    /// Bound, but not to one statically determinable type.
    Indeterminate,
}

/// Static scanner over code-unit source text.
///
/// Purely syntactic: the scanned source is never executed or imported.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclarationScanner;

impl DeclarationScanner {
    /// Create a scanner.
    pub fn new() -> Self {
        DeclarationScanner
    }

    /// Scan several units into one deduplicated set.
    ///
    /// Order is first-seen across units in the order supplied. Fails with
    /// [`ScanError`] as soon as any unit's source cannot be read.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn scan_units<'a>(
        &self,
        units: impl IntoIterator<Item = &'a SourceUnit>,
    ) -> Result<ExceptionSet, ScanError> {
        let mut set = ExceptionSet::new();
        for unit in units {
            tracing::debug!(unit = %unit.name(), "scanning unit");
            let text = unit.source_text().map_err(|err| {
                if unit.path().is_none() {
                    ScanError::SourceUnavailable {
                        unit: unit.name(),
                        reason: "unit has no retrievable source".to_owned(),
                    }
                } else {
                    ScanError::Io {
                        unit: unit.name(),
                        source: err,
                    }
                }
            })?;
            collect(&text, &mut set);
        }
        Ok(set)
    }

    /// Scan a single source text.
    pub fn scan_source(&self, source: &str) -> ExceptionSet {
        let mut set = ExceptionSet::new();
        collect(source, &mut set);
        set
    }
}

/// Tokenize `source` and fold every recognized raise construct into `out`.
fn collect(source: &str, out: &mut ExceptionSet) {
    let tokens: Vec<(RawToken, &str)> = RawToken::lexer(source)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(RawToken::Junk), &source[span]))
        .collect();

    let mut bindings: FxHashMap<&str, Binding> = FxHashMap::default();
    let mut at_stmt_start = true;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].0 {
            RawToken::Raise => {
                i = handle_raise(&tokens, i + 1, &bindings, out);
                at_stmt_start = false;
            }
            RawToken::Except => {
                i = handle_except(&tokens, i + 1, &mut bindings);
                at_stmt_start = false;
            }
            RawToken::Ident if at_stmt_start && peek(&tokens, i + 1) == Some(RawToken::Eq) => {
                i = handle_assignment(&tokens, i, &mut bindings);
                at_stmt_start = false;
            }
            tok => {
                // Newlines and colons open a new simple statement; a colon
                // covers suites continued on the same line (`except X: raise`).
                at_stmt_start = tok.ends_statement() || tok == RawToken::Colon;
                i += 1;
            }
        }
    }
}

fn peek(tokens: &[(RawToken, &str)], i: usize) -> Option<RawToken> {
    tokens.get(i).map(|&(tok, _)| tok)
}

/// Parse a dotted identifier path at `i`.
///
/// Returns the joined path, the number of segments, and the index of the
/// first token past the path. `None` if `i` is not an identifier.
fn parse_path(tokens: &[(RawToken, &str)], i: usize) -> Option<(String, usize, usize)> {
    let &(first, text) = tokens.get(i)?;
    if first != RawToken::Ident {
        return None;
    }
    let mut path = text.to_owned();
    let mut segments = 1;
    let mut next = i + 1;
    while peek(tokens, next) == Some(RawToken::Dot) && peek(tokens, next + 1) == Some(RawToken::Ident)
    {
        path.push('.');
        path.push_str(tokens[next + 1].1);
        segments += 1;
        next += 2;
    }
    Some((path, segments, next))
}

/// Resolve a parsed path through the binding table.
///
/// A single-segment path that names a binding resolves to what the binding
/// holds; anything else is taken as a type identifier verbatim.
fn resolve_path(
    bindings: &FxHashMap<&str, Binding>,
    path: String,
    segments: usize,
) -> Binding {
    if segments == 1 {
        if let Some(binding) = bindings.get(path.as_str()) {
            return binding.clone();
        }
    }
    Binding::Kind(path)
}

/// Handle the tokens after a `raise` keyword. Returns the resume index.
fn handle_raise(
    tokens: &[(RawToken, &str)],
    i: usize,
    bindings: &FxHashMap<&str, Binding>,
    out: &mut ExceptionSet,
) -> usize {
    // Bare re-raise: no expression follows on this line.
    let Some((path, segments, next)) = parse_path(tokens, i) else {
        return i;
    };
    match resolve_path(bindings, path, segments) {
        Binding::Kind(kind) => {
            out.insert(ExceptionKind::new(&kind));
        }
        Binding::Indeterminate => {}
    }
    next
}

/// Handle the tokens after an `except` keyword, recording any `as` binding.
/// Returns the resume index.
fn handle_except<'src>(
    tokens: &[(RawToken, &'src str)],
    i: usize,
    bindings: &mut FxHashMap<&'src str, Binding>,
) -> usize {
    let mut next = i;
    let mut caught: Option<Binding> = None;

    match peek(tokens, next) {
        Some(RawToken::Ident) => {
            if let Some((path, segments, after)) = parse_path(tokens, next) {
                caught = Some(resolve_path(bindings, path, segments));
                next = after;
            }
        }
        Some(RawToken::LParen) => {
            // Parenthesized handler: a lone path is still one type; any
            // comma makes it a tuple, which is not a single static type.
            next += 1;
            let mut paths = 0;
            let mut only: Option<Binding> = None;
            loop {
                match peek(tokens, next) {
                    Some(RawToken::Ident) => {
                        if let Some((path, segments, after)) = parse_path(tokens, next) {
                            only = Some(resolve_path(bindings, path, segments));
                            paths += 1;
                            next = after;
                        } else {
                            next += 1;
                        }
                    }
                    Some(RawToken::Comma) => next += 1,
                    Some(RawToken::RParen) => {
                        next += 1;
                        break;
                    }
                    Some(RawToken::Newline) | None => break,
                    _ => {
                        paths = 2; // opaque expression, not a single type
                        next += 1;
                    }
                }
            }
            caught = if paths == 1 { only } else { Some(Binding::Indeterminate) };
        }
        _ => {}
    }

    if peek(tokens, next) == Some(RawToken::As) {
        if let Some(&(RawToken::Ident, var)) = tokens.get(next + 1) {
            let binding = caught.unwrap_or(Binding::Indeterminate);
            bindings.insert(var, binding);
            return next + 2;
        }
    }
    next
}

/// Handle a statement-initial `v = ...` alias assignment.
/// Returns the resume index.
fn handle_assignment<'src>(
    tokens: &[(RawToken, &'src str)],
    i: usize,
    bindings: &mut FxHashMap<&'src str, Binding>,
) -> usize {
    let var = tokens[i].1;
    let rhs = i + 2;

    // Only a bare dotted path terminated by end-of-statement binds a type;
    // calls, tuples, and arbitrary expressions are indeterminate.
    if let Some((path, segments, after)) = parse_path(tokens, rhs) {
        let terminated = matches!(peek(tokens, after), None | Some(RawToken::Newline));
        if terminated {
            let binding = resolve_path(bindings, path, segments);
            bindings.insert(var, binding);
            return after;
        }
    }
    bindings.insert(var, Binding::Indeterminate);
    rhs
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
