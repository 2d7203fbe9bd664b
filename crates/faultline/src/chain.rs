//! Causal-chain flattening.
//!
//! Follows cause/context links between successive errors into one ordered
//! sequence. Cause takes precedence when both links are present, matching
//! conventional chained-exception semantics.

use std::sync::Arc;

use faultline_ir::ErrorRecord;

use crate::error::MalformedChain;

/// Traversal cap for cause/context links. Chains deeper than this are
/// reported as malformed rather than walked further; the cap also bounds
/// traversal of any pathological link structure.
pub const MAX_CHAIN_DEPTH: usize = 128;

/// Flatten the causal chain headed by `head`.
///
/// Links are validated eagerly (an over-deep chain is a reported
/// [`MalformedChain`], never a hang) and the resulting [`Chain`] yields
/// records from the innermost cause to the originally raised, outermost
/// error — `head` itself comes last.
#[tracing::instrument(level = "debug", skip_all)]
pub fn flatten_chain(head: &Arc<ErrorRecord>) -> Result<Chain, MalformedChain> {
    let mut latest_first: Vec<Arc<ErrorRecord>> = Vec::new();
    let mut current = Arc::clone(head);

    loop {
        if latest_first.len() == MAX_CHAIN_DEPTH {
            return Err(MalformedChain {
                cap: MAX_CHAIN_DEPTH,
            });
        }
        latest_first.push(Arc::clone(&current));

        // Cause links (`raise X from e`) outrank context links (an error
        // raised while another was in flight).
        match current.cause().or_else(|| current.context()) {
            Some(next) => current = Arc::clone(next),
            None => break,
        }
    }

    latest_first.reverse();
    Ok(Chain {
        inner: latest_first.into_iter(),
    })
}

/// A flattened causal chain: a finite, consuming (non-restartable)
/// iterator from innermost cause to the originally raised error.
///
/// Latest-first order is available through [`Iterator::rev`].
#[derive(Debug)]
pub struct Chain {
    inner: std::vec::IntoIter<Arc<ErrorRecord>>,
}

impl Iterator for Chain {
    type Item = Arc<ErrorRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Chain {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Chain {}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
