//! Commit errors.
//!
//! Every error here is a usage error in instruction generation. The engine
//! never retries: the failing commit is rolled back and the error is
//! returned together with enough state to locate the bad instruction.

use thiserror::Error;

use crate::engine::Cursor;

/// What went wrong while running a single instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An instruction that needs a single-position cursor ran while a span
    /// was active.
    #[error("cannot {op} while the cursor spans {start}..={end}")]
    InvalidCursorMode {
        op: &'static str,
        start: usize,
        end: usize,
    },

    /// `Push` over a leaf, or over a position with no child.
    #[error("cannot push: no branch at index {index}")]
    NotABranch { index: usize },

    /// `SetLeafContent` over a branch, or over a position with no child.
    #[error("cannot set leaf content: no leaf at index {index}")]
    NotATextNode { index: usize },

    /// `Pop` with no saved frame.
    #[error("cannot pop: frame stack is empty")]
    EmptyFrameStack,
}

/// A failed commit.
///
/// By the time the caller sees this, everything the commit had done has
/// been rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("instruction #{index} ({instruction}) failed at depth {depth}: {kind}")]
pub struct CommitError {
    /// Position of the failing instruction in its list.
    pub index: usize,
    /// Name of the failing instruction.
    pub instruction: &'static str,
    /// Cursor at the moment of failure.
    pub cursor: Cursor,
    /// Number of saved frames (how many `Push`es deep the commit was).
    pub depth: usize,
    #[source]
    pub kind: ErrorKind,
    /// Set when the failure happened inside the initial commit of a `React`
    /// region. `kind` then repeats the nested kind.
    pub nested: Option<Box<CommitError>>,
}

impl CommitError {
    /// The innermost failure: follows `nested` down to the instruction that
    /// actually raised the error.
    pub fn root_cause(&self) -> &CommitError {
        let mut current = self;
        while let Some(nested) = &current.nested {
            current = nested;
        }
        current
    }
}
