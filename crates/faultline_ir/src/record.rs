//! Error and frame records.
//!
//! These are read-only snapshots of a propagating error: the propagation
//! side builds and owns them, this system traverses them through `Arc`
//! references. A record never changes after construction.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::{ExceptionKind, SourcePos};

/// One entry in a propagating error's call-stack trace.
///
/// Frames form a singly linked chain from innermost (the raise site) to
/// outermost via `parent`. A frame with no `path` models dynamically
/// generated code that has no file backing.
#[derive(Clone, Debug)]
pub struct FrameRecord {
    path: Option<Arc<Path>>,
    pos: SourcePos,
    parent: Option<Arc<FrameRecord>>,
}

impl FrameRecord {
    /// Create an innermost frame with no parent.
    pub fn new(path: Option<Arc<Path>>, pos: SourcePos) -> Self {
        FrameRecord {
            path,
            pos,
            parent: None,
        }
    }

    /// Create a frame whose caller is `parent`.
    pub fn with_parent(path: Option<Arc<Path>>, pos: SourcePos, parent: Arc<FrameRecord>) -> Self {
        FrameRecord {
            path,
            pos,
            parent: Some(parent),
        }
    }

    /// File backing the frame's code, if any.
    pub fn path(&self) -> Option<&Arc<Path>> {
        self.path.as_ref()
    }

    /// Source position of the frame.
    pub fn pos(&self) -> SourcePos {
        self.pos
    }

    /// The next-outer frame, if any.
    pub fn parent(&self) -> Option<&Arc<FrameRecord>> {
        self.parent.as_ref()
    }
}

/// A raised error instance plus its causal metadata.
///
/// `cause` links to an error this one was explicitly raised from;
/// `context` links to an error that was in flight when this one was
/// raised. Both may be absent; cause takes precedence when following
/// the chain.
#[derive(Clone, Debug)]
pub struct ErrorRecord {
    kind: ExceptionKind,
    message: String,
    frames: Option<Arc<FrameRecord>>,
    cause: Option<Arc<ErrorRecord>>,
    context: Option<Arc<ErrorRecord>>,
}

impl ErrorRecord {
    /// Create a record with no frames and no causal links.
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        ErrorRecord {
            kind,
            message: message.into(),
            frames: None,
            cause: None,
            context: None,
        }
    }

    /// Attach the innermost frame of the record's trace.
    #[must_use]
    pub fn with_frames(mut self, head: Arc<FrameRecord>) -> Self {
        self.frames = Some(head);
        self
    }

    /// Link the error this record was raised from.
    #[must_use]
    pub fn caused_by(mut self, cause: Arc<ErrorRecord>) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Link the error that was in flight when this record was raised.
    #[must_use]
    pub fn in_context_of(mut self, context: Arc<ErrorRecord>) -> Self {
        self.context = Some(context);
        self
    }

    /// The concrete error type of this record.
    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    /// Human-readable message. Never used for identity.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Innermost frame of the attached trace, if any.
    pub fn frames(&self) -> Option<&Arc<FrameRecord>> {
        self.frames.as_ref()
    }

    /// Explicit cause link, if any.
    pub fn cause(&self) -> Option<&Arc<ErrorRecord>> {
        self.cause.as_ref()
    }

    /// Implicit context link, if any.
    pub fn context(&self) -> Option<&Arc<ErrorRecord>> {
        self.context.as_ref()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}
