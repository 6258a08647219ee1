//! Transaction interpreter.
//!
//! Runs instructions strictly in order. Each mutating step changes the host
//! tree immediately and pushes its inverse onto the rollback log. The first
//! failing instruction aborts the list and drains the log, so a commit is
//! all-or-nothing even though every step is eager.

use std::mem;
use std::rc::Rc;

use tracing::{debug_span, trace, warn};

use super::cursor::Cursor;
use super::react::run_react;
use super::rollback::Rollback;
use super::state::{Frame, TransactionState};
use crate::error::{CommitError, ErrorKind};
use crate::host::Host;
use crate::instruction::Instruction;

/// Why an instruction stopped the commit.
pub(crate) enum Fault {
    /// Raised by the instruction itself.
    Local(ErrorKind),
    /// Raised inside the initial commit of a `React` region.
    Nested(CommitError),
}

impl From<ErrorKind> for Fault {
    fn from(kind: ErrorKind) -> Self {
        Self::Local(kind)
    }
}

/// Commit `instructions` into `parent`, starting at child `offset`.
pub(crate) fn commit_at<H: Host + 'static>(
    host: Rc<H>,
    parent: H::Node,
    offset: usize,
    instructions: &[Instruction],
) -> Result<Rollback, CommitError> {
    let _span = debug_span!("commit", offset, instructions = instructions.len()).entered();
    let mut state = TransactionState::new(host, parent, offset);

    for (index, instruction) in instructions.iter().enumerate() {
        trace!(index, instruction = instruction.name(), cursor = ?state.cursor, "run");

        if let Err(fault) = run_instruction(&mut state, instruction) {
            let (kind, nested) = match fault {
                Fault::Local(kind) => (kind, None),
                Fault::Nested(error) => (error.kind.clone(), Some(Box::new(error))),
            };
            let error = CommitError {
                index,
                instruction: instruction.name(),
                cursor: state.cursor,
                depth: state.frames.len(),
                kind,
                nested,
            };
            warn!(%error, undo = state.rollback.len(), "commit aborted");
            state.rollback.run();
            return Err(error);
        }
    }

    Ok(state.rollback)
}

fn run_instruction<H: Host + 'static>(
    state: &mut TransactionState<H>,
    instruction: &Instruction,
) -> Result<(), Fault> {
    match instruction {
        Instruction::InsertBranch(tag) => {
            let node = state.host.create_branch(tag);
            insert(state, vec![node]);
        }
        Instruction::InsertLeaf(content) => {
            let node = state.host.create_leaf(content);
            insert(state, vec![node]);
        }
        Instruction::SetLeafContent(content) => set_leaf_content(state, content)?,
        Instruction::RemoveNode => remove_nodes(state),
        Instruction::MoveCursor(delta) => {
            state.cursor = state.cursor.moved(*delta, state.child_count());
        }
        Instruction::MoveCursorStart(delta) => {
            state.cursor = state.cursor.moved_start(*delta, state.child_count());
        }
        Instruction::MoveCursorEnd(delta) => {
            state.cursor = state.cursor.moved_end(*delta, state.child_count());
        }
        Instruction::Push => push(state)?,
        Instruction::Pop => pop(state)?,
        Instruction::Put => {
            let nodes = mem::take(&mut state.register);
            insert(state, nodes);
        }
        Instruction::React(source) => run_react(state, source).map_err(Fault::Nested)?,
    }
    Ok(())
}

// =============================================================================
// Structural edits
// =============================================================================

/// Insert `nodes` in order before the focused child.
///
/// A span is removed first (its nodes replace the register). The cursor is
/// left single, on the first inserted node.
fn insert<H: Host + 'static>(state: &mut TransactionState<H>, nodes: Vec<H::Node>) {
    if state.cursor.is_span() {
        remove_nodes(state);
    }
    let reference = state.child_at(state.cursor.start());

    for node in nodes {
        state
            .host
            .insert_before(&state.parent, &node, reference.as_ref());

        let host = state.host.clone();
        let parent = state.parent.clone();
        state.rollback.push(move || host.remove(&parent, &node));
    }
}

/// Remove the focused child, or the whole span.
///
/// Always removes at the start index, so the list shifts left under it.
/// Each removal is undone by re-inserting before the sibling that followed
/// the node. A reactive region may have re-committed in the meantime and
/// shifted indices; only when that sibling is gone does the undo fall back
/// to the original index.
fn remove_nodes<H: Host + 'static>(state: &mut TransactionState<H>) {
    let start = state.cursor.start();
    let end = state.cursor.end();
    let mut removed = Vec::new();

    for _ in start..=end {
        let Some(node) = state.child_at(start) else {
            break;
        };
        state.host.remove(&state.parent, &node);
        let following = state.child_at(start);

        let host = state.host.clone();
        let parent = state.parent.clone();
        let restored = node.clone();
        state.rollback.push(move || {
            let reference = match following {
                Some(next) if is_child(&*host, &parent, &next) => Some(next),
                Some(_) => host.child_at(&parent, start),
                None => None,
            };
            host.insert_before(&parent, &restored, reference.as_ref());
        });
        removed.push(node);
    }

    if !removed.is_empty() {
        state.register = removed;
    }
    state.cursor = Cursor::Single(start);
}

fn is_child<H: Host>(host: &H, parent: &H::Node, node: &H::Node) -> bool {
    (0..host.child_count(parent)).any(|index| host.child_at(parent, index).as_ref() == Some(node))
}

fn set_leaf_content<H: Host + 'static>(
    state: &mut TransactionState<H>,
    content: &str,
) -> Result<(), ErrorKind> {
    let index = single_index(state.cursor, "set leaf content")?;
    let node = state.child_at(index);
    let Some((node, previous)) =
        node.and_then(|node| state.host.leaf_content(&node).map(|text| (node, text)))
    else {
        return Err(ErrorKind::NotATextNode { index });
    };

    state.host.set_leaf_content(&node, content);

    let host = state.host.clone();
    state
        .rollback
        .push(move || host.set_leaf_content(&node, &previous));
    Ok(())
}

// =============================================================================
// Navigation
// =============================================================================

fn push<H: Host>(state: &mut TransactionState<H>) -> Result<(), ErrorKind> {
    let index = single_index(state.cursor, "push")?;
    let branch = state
        .child_at(index)
        .filter(|node| state.host.kind(node).is_branch())
        .ok_or(ErrorKind::NotABranch { index })?;

    let parent = mem::replace(&mut state.parent, branch);
    state.frames.push(Frame {
        parent,
        cursor: state.cursor,
    });
    state.cursor = Cursor::Single(0);
    Ok(())
}

fn pop<H: Host>(state: &mut TransactionState<H>) -> Result<(), ErrorKind> {
    let frame = state.frames.pop().ok_or(ErrorKind::EmptyFrameStack)?;
    state.parent = frame.parent;
    state.cursor = frame.cursor;
    Ok(())
}

fn single_index(cursor: Cursor, op: &'static str) -> Result<usize, ErrorKind> {
    match cursor {
        Cursor::Single(index) => Ok(index),
        Cursor::Span { start, end } => Err(ErrorKind::InvalidCursorMode { op, start, end }),
    }
}
