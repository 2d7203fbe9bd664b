//! Per-context active-error state and the hot-state query.
//!
//! The table is process-wide but partitioned by execution context: each
//! matcher call reads only its own context's entry, so readers never
//! contend across contexts. Writes belong exclusively to the propagation
//! side, which installs a record for the duration of an unwind through
//! the RAII [`Propagation`] guard.

use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use faultline_ir::ErrorRecord;

/// Identifier of an execution context: a thread, or an explicit task id
/// for embeddings that multiplex tasks over threads.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContextId {
    Thread(ThreadId),
    Task(u64),
}

impl ContextId {
    /// The calling thread's context.
    pub fn current() -> Self {
        ContextId::Thread(thread::current().id())
    }

    /// An explicit task context.
    pub const fn task(id: u64) -> Self {
        ContextId::Task(id)
    }
}

/// Process-wide table of currently propagating errors, one slot per
/// execution context.
#[derive(Debug, Default)]
pub struct ActiveErrorTable {
    entries: DashMap<ContextId, Arc<ErrorRecord>>,
}

impl ActiveErrorTable {
    /// Create a standalone table (embeddings and tests).
    pub fn new() -> Self {
        ActiveErrorTable::default()
    }

    /// The process-global table.
    pub fn global() -> &'static ActiveErrorTable {
        static GLOBAL: OnceLock<ActiveErrorTable> = OnceLock::new();
        GLOBAL.get_or_init(ActiveErrorTable::new)
    }

    /// Propagation side: mark `record` as in flight for the calling
    /// context. The slot clears when the returned guard drops.
    #[must_use]
    pub fn propagate(&self, record: Arc<ErrorRecord>) -> Propagation<'_> {
        self.propagate_in(ContextId::current(), record)
    }

    /// Propagation side: mark `record` as in flight for `ctx`.
    #[must_use]
    pub fn propagate_in(&self, ctx: ContextId, record: Arc<ErrorRecord>) -> Propagation<'_> {
        self.entries.insert(ctx, record);
        Propagation { table: self, ctx }
    }

    /// The record propagating in `ctx`, if any. Read-only.
    pub fn active(&self, ctx: ContextId) -> Option<Arc<ErrorRecord>> {
        self.entries.get(&ctx).map(|entry| Arc::clone(&entry))
    }

    /// Hot-state query: whether `ctx` has an unhandled error in flight.
    /// Stateless, no side effects.
    pub fn is_active(&self, ctx: ContextId) -> bool {
        self.entries.contains_key(&ctx)
    }
}

/// RAII guard owned by the propagation side; clears its context's slot
/// when dropped.
#[derive(Debug)]
pub struct Propagation<'t> {
    table: &'t ActiveErrorTable,
    ctx: ContextId,
}

impl Drop for Propagation<'_> {
    fn drop(&mut self) {
        self.table.entries.remove(&self.ctx);
    }
}

/// Whether the calling execution context currently has an unhandled error
/// in flight, per the global table.
pub fn is_error_active() -> bool {
    ActiveErrorTable::global().is_active(ContextId::current())
}
