//! # spark-builder
//!
//! Transactional tree builder with reactive rollback.
//!
//! Renders and incrementally updates a tree of branch and leaf nodes from
//! explicit instruction lists, without diffing old and new trees.
//!
//! ## Architecture
//!
//! A caller builds an instruction list and commits it against a root node.
//! The commit edits the tree through a cursor and returns a [`Rollback`]
//! that undoes every edit in reverse order:
//!
//! ```text
//! Vec<Instruction> → TreeBuilder::commit(root, offset) → Host edits → Rollback
//!                                  │
//!                         React(source) ──subscribe──→ rollback + re-commit on change
//! ```
//!
//! `React` instructions bind a region of the tree to a time-varying
//! [`Transaction`]. Every change rolls back the region's previous commit and
//! applies the new one; rolling back the enclosing commit unsubscribes and
//! unwinds the region.
//!
//! ## Modules
//!
//! - [`types`] - Shared aliases (Tag, NodeKind, Cleanup)
//! - [`instruction`] - Instruction set, factories, Transaction
//! - [`engine`] - Cursor algebra, interpreter, rollback, reactive regions
//! - [`host`] - Backend contract and the in-memory tree
//! - [`reactive`] - Reactive value contract and helpers
//! - [`error`] - Commit errors
//!
//! ## Logging
//!
//! Uses [`tracing`]. Commits open a `commit` span; aborted commits log a
//! warning and failed reactive re-commits log an error. Install any
//! subscriber to see them.

pub mod engine;
pub mod error;
pub mod host;
pub mod instruction;
pub mod reactive;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{Cursor, Rollback, TreeBuilder};

pub use error::{CommitError, ErrorKind};

pub use host::{Host, MemoryTree, NodeFlags, NodeId};

pub use instruction::{
    insert_branch, insert_leaf, move_cursor, move_cursor_end, move_cursor_start, pop, push, put,
    react, remove_node, set_leaf_content, Instruction, Transaction,
};

pub use reactive::{bind, map, Constant, Map, Reactive, Unsubscribe, Value};
