//! Per-commit state.

use std::rc::Rc;

use super::cursor::Cursor;
use super::rollback::Rollback;
use crate::host::Host;

/// A saved position, restored by `Pop`.
#[derive(Debug, Clone)]
pub(crate) struct Frame<N> {
    pub parent: N,
    pub cursor: Cursor,
}

/// Everything one commit mutates while it runs.
///
/// Created fresh for each top-level commit and for each `React` re-commit,
/// never shared between them. Only the rollback log outlives the run.
pub(crate) struct TransactionState<H: Host> {
    pub host: Rc<H>,
    /// The branch whose children are being edited.
    pub parent: H::Node,
    pub cursor: Cursor,
    /// Nodes cut by the last `RemoveNode`, waiting for a `Put`.
    pub register: Vec<H::Node>,
    pub frames: Vec<Frame<H::Node>>,
    pub rollback: Rollback,
}

impl<H: Host> TransactionState<H> {
    pub fn new(host: Rc<H>, parent: H::Node, offset: usize) -> Self {
        let cursor = Cursor::Single(offset.min(host.child_count(&parent)));
        Self {
            host,
            parent,
            cursor,
            register: Vec::new(),
            frames: Vec::new(),
            rollback: Rollback::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        self.host.child_count(&self.parent)
    }

    pub fn child_at(&self, index: usize) -> Option<H::Node> {
        self.host.child_at(&self.parent, index)
    }
}
