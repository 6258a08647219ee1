//! Instruction set.
//!
//! Instructions are plain data: constructing one has no effect. They only
//! act on a tree when a list of them is committed through a
//! [`TreeBuilder`](crate::TreeBuilder).
//!
//! # Example
//!
//! ```ignore
//! use spark_builder::instruction::*;
//!
//! // <div><p></p></div><span></span>
//! let instructions = vec![
//!     insert_branch("div"),
//!     push(),
//!     insert_branch("p"),
//!     pop(),
//!     move_cursor(1),
//!     insert_branch("span"),
//! ];
//! let rollback = builder.commit(&root, 0, &instructions)?;
//! ```

use std::fmt;
use std::rc::Rc;

use crate::reactive::Reactive;
use crate::types::Tag;

// =============================================================================
// Instruction
// =============================================================================

/// One edit or navigation step.
#[derive(Clone)]
pub enum Instruction {
    /// Insert a new branch before the focused child. Over a span, the span
    /// is removed first. The cursor ends up single, focusing the new node.
    InsertBranch(Tag),
    /// Insert a new leaf before the focused child. Same cursor rules as
    /// `InsertBranch`.
    InsertLeaf(String),
    /// Replace the content of the focused leaf. Needs a single cursor.
    SetLeafContent(String),
    /// Remove the focused child, or every child of the span. The removed
    /// nodes replace the register.
    RemoveNode,
    /// Collapse to the start edge and move by the delta.
    MoveCursor(isize),
    /// Move the start edge of the span.
    MoveCursorStart(isize),
    /// Move the end edge of the span.
    MoveCursorEnd(isize),
    /// Descend into the focused branch.
    Push,
    /// Return to the parent saved by the matching `Push`.
    Pop,
    /// Insert the register's nodes at the cursor and clear the register.
    Put,
    /// Keep a region of the current parent in sync with a time-varying
    /// transaction.
    React(Rc<dyn Reactive<Transaction>>),
}

impl Instruction {
    /// Variant name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertBranch(_) => "InsertBranch",
            Self::InsertLeaf(_) => "InsertLeaf",
            Self::SetLeafContent(_) => "SetLeafContent",
            Self::RemoveNode => "RemoveNode",
            Self::MoveCursor(_) => "MoveCursor",
            Self::MoveCursorStart(_) => "MoveCursorStart",
            Self::MoveCursorEnd(_) => "MoveCursorEnd",
            Self::Push => "Push",
            Self::Pop => "Pop",
            Self::Put => "Put",
            Self::React(_) => "React",
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertBranch(tag) => f.debug_tuple("InsertBranch").field(tag).finish(),
            Self::InsertLeaf(content) => f.debug_tuple("InsertLeaf").field(content).finish(),
            Self::SetLeafContent(content) => {
                f.debug_tuple("SetLeafContent").field(content).finish()
            }
            Self::MoveCursor(delta) => f.debug_tuple("MoveCursor").field(delta).finish(),
            Self::MoveCursorStart(delta) => f.debug_tuple("MoveCursorStart").field(delta).finish(),
            Self::MoveCursorEnd(delta) => f.debug_tuple("MoveCursorEnd").field(delta).finish(),
            Self::React(_) => f.write_str("React(..)"),
            other => f.write_str(other.name()),
        }
    }
}

// =============================================================================
// Factories
// =============================================================================

pub fn insert_branch(tag: impl Into<Tag>) -> Instruction {
    Instruction::InsertBranch(tag.into())
}

pub fn insert_leaf(content: impl Into<String>) -> Instruction {
    Instruction::InsertLeaf(content.into())
}

/// Fails with `NotATextNode` if the cursor is not over a leaf, and with
/// `InvalidCursorMode` in span mode.
pub fn set_leaf_content(content: impl Into<String>) -> Instruction {
    Instruction::SetLeafContent(content.into())
}

/// A no-op when the cursor is past the last child.
pub fn remove_node() -> Instruction {
    Instruction::RemoveNode
}

pub fn move_cursor(delta: isize) -> Instruction {
    Instruction::MoveCursor(delta)
}

pub fn move_cursor_start(delta: isize) -> Instruction {
    Instruction::MoveCursorStart(delta)
}

pub fn move_cursor_end(delta: isize) -> Instruction {
    Instruction::MoveCursorEnd(delta)
}

/// Fails with `InvalidCursorMode` in span mode and with `NotABranch` if the
/// focused child is missing or a leaf.
pub fn push() -> Instruction {
    Instruction::Push
}

/// Fails with `EmptyFrameStack` without a matching `Push`.
pub fn pop() -> Instruction {
    Instruction::Pop
}

pub fn put() -> Instruction {
    Instruction::Put
}

/// Bind a region of the current parent to `source`.
///
/// Each value's `offset` is an index into the parent that is current when
/// the `React` instruction runs.
pub fn react(source: impl Reactive<Transaction> + 'static) -> Instruction {
    Instruction::React(Rc::new(source))
}

// =============================================================================
// Transaction
// =============================================================================

/// An instruction list together with the child index it starts at.
#[derive(Clone, Debug, Default)]
pub struct Transaction {
    pub offset: usize,
    pub instructions: Vec<Instruction>,
}

impl Transaction {
    pub fn new(offset: usize, instructions: Vec<Instruction>) -> Self {
        Self {
            offset,
            instructions,
        }
    }

    /// Empty transaction starting at `offset`.
    pub fn at(offset: usize) -> Self {
        Self::new(offset, Vec::new())
    }

    /// Append an instruction (builder style).
    pub fn then(mut self, instruction: Instruction) -> Self {
        self.instructions.push(instruction);
        self
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Instruction> for Transaction {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(0, iter.into_iter().collect())
    }
}
