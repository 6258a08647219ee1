//! Host backend contract.
//!
//! The builder mutates a live tree it does not own. Everything it needs from
//! that tree is listed in [`Host`]; a DOM, a terminal component registry or
//! the in-memory [`MemoryTree`] can all sit behind it.
//!
//! Hosts take `&self` everywhere and are shared through `Rc`: rollback tasks
//! and reactive regions keep a handle to the host long after the commit that
//! created them has returned.

mod memory;

pub use memory::*;

use std::fmt::Debug;

use crate::types::NodeKind;

/// The minimal capability set the interpreter requires.
pub trait Host {
    /// Handle to a node. Cheap to clone; equality is node identity.
    type Node: Clone + PartialEq + Debug + 'static;

    fn create_branch(&self, tag: &str) -> Self::Node;

    fn create_leaf(&self, content: &str) -> Self::Node;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// Text of a leaf, `None` for branches.
    fn leaf_content(&self, node: &Self::Node) -> Option<String>;

    fn set_leaf_content(&self, node: &Self::Node, content: &str);

    /// Insert `node` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A node attached elsewhere is moved.
    fn insert_before(&self, parent: &Self::Node, node: &Self::Node, reference: Option<&Self::Node>);

    /// Detach `node` from `parent`. The node stays alive and can be
    /// re-inserted later.
    fn remove(&self, parent: &Self::Node, node: &Self::Node);

    fn child_count(&self, parent: &Self::Node) -> usize;

    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;
}
