//! Tree Builder Engine - Cursor, interpreter, rollback, reactive regions.
//!
//! The engine applies instruction lists to a live tree:
//! - Cursor: focus among the current parent's children (single or span)
//! - Interpreter: runs instructions in order, logging an inverse per edit
//! - Rollback: the LIFO undo log handed back by every commit
//! - React: regions re-committed whenever their source changes
//!
//! # Architecture
//!
//! ```text
//! TreeBuilder::commit(root, offset, instructions)
//!     └─ TransactionState { parent, cursor, register, frames, rollback }
//!          ├─ InsertBranch / InsertLeaf / Put / RemoveNode / SetLeafContent → host edits + inverses
//!          ├─ MoveCursor* / Push / Pop                                       → cursor + frame stack
//!          └─ React(source)                                                 → nested commit + subscription
//! ```
//!
//! There is no ambient "current builder": callers hold a [`TreeBuilder`] and
//! pass it to whatever generates instructions.

mod cursor;
mod interpreter;
mod react;
mod rollback;
mod state;

pub use cursor::*;
pub use rollback::Rollback;

use std::rc::Rc;

use crate::error::CommitError;
use crate::host::Host;
use crate::instruction::{Instruction, Transaction};

// =============================================================================
// TreeBuilder
// =============================================================================

/// Engine handle over a shared host.
pub struct TreeBuilder<H: Host> {
    host: Rc<H>,
}

impl<H: Host> Clone for TreeBuilder<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
        }
    }
}

impl<H: Host + 'static> TreeBuilder<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Apply `instructions` to the children of `root`, starting at child
    /// `offset` (clamped to the child count).
    ///
    /// On success, returns the rollback that undoes everything this commit
    /// did, reactive subscriptions included. On failure, the tree has
    /// already been restored.
    pub fn commit(
        &self,
        root: &H::Node,
        offset: usize,
        instructions: &[Instruction],
    ) -> Result<Rollback, CommitError> {
        interpreter::commit_at(self.host.clone(), root.clone(), offset, instructions)
    }

    /// [`commit`](Self::commit) a [`Transaction`] value.
    pub fn commit_transaction(
        &self,
        root: &H::Node,
        transaction: &Transaction,
    ) -> Result<Rollback, CommitError> {
        self.commit(root, transaction.offset, &transaction.instructions)
    }
}
