//! Core types shared by the builder, the hosts, and the reactive layer.

use std::rc::Rc;

// =============================================================================
// Tag
// =============================================================================

/// Tag of a branch node (the element name for DOM-like hosts).
///
/// Reference counted so instruction lists can be cloned into reactive
/// regions and replayed without reallocating every tag.
pub type Tag = Rc<str>;

// =============================================================================
// NodeKind
// =============================================================================

/// Structural kind of a host node.
///
/// The builder only ever asks two questions about a node: can it be
/// descended into (`Push`), and does it carry text (`SetLeafContent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A node with a tag and an ordered list of children.
    Branch,
    /// A text node. Has no children.
    Leaf,
}

impl NodeKind {
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Branch)
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Leaf)
    }
}

// =============================================================================
// Cleanup
// =============================================================================

/// Cleanup function.
///
/// Undoes one effect: a single tree mutation, a subscription, or a whole
/// committed transaction once converted from a [`Rollback`](crate::Rollback).
pub type Cleanup = Box<dyn FnOnce()>;
