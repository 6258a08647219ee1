//! In-memory host.
//!
//! Nodes are indices into parallel arrays, one array per property. Indices
//! are never reused: nodes cut loose by a commit stay addressable for its
//! rollback.
//!
//! ```text
//! Index 0: BRANCH|ATTACHED  tag=root  parent=-  children=[1, 2]
//! Index 1: BRANCH|ATTACHED  tag=div   parent=0  children=[]
//! Index 2: LEAF|ATTACHED    text="hi" parent=0
//! ```

use std::cell::RefCell;

use tracing::warn;

use super::Host;
use crate::types::{NodeKind, Tag};

// =============================================================================
// Node Identity
// =============================================================================

/// Index of a node in a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

bitflags::bitflags! {
    /// Per-node state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        const NONE = 0;
        const BRANCH = 1 << 0;
        const LEAF = 1 << 1;
        /// Currently a child of some branch.
        const ATTACHED = 1 << 2;
    }
}

// =============================================================================
// Arrays
// =============================================================================

#[derive(Default)]
struct Arrays {
    flags: Vec<NodeFlags>,
    tags: Vec<Option<Tag>>,
    text: Vec<String>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
}

impl Arrays {
    fn allocate(&mut self, flags: NodeFlags, tag: Option<Tag>, text: String) -> NodeId {
        let id = NodeId(self.flags.len());
        self.flags.push(flags);
        self.tags.push(tag);
        self.text.push(text);
        self.parents.push(None);
        self.children.push(Vec::new());
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parents[node.0].take() {
            self.children[parent.0].retain(|child| *child != node);
        }
        self.flags[node.0].remove(NodeFlags::ATTACHED);
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        for &child in &self.children[node.0] {
            if self.flags[child.0].contains(NodeFlags::LEAF) {
                out.push_str(&self.text[child.0]);
            } else {
                let tag = self.tags[child.0].as_deref().unwrap_or("");
                out.push('<');
                out.push_str(tag);
                out.push('>');
                self.write_markup(child, out);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

// =============================================================================
// MemoryTree
// =============================================================================

/// A [`Host`] backed by plain vectors.
///
/// Used as the test backend and anywhere a tree is needed without a real
/// rendering target. Node ids from another tree are a programming error and
/// panic on use.
#[derive(Default)]
pub struct MemoryTree {
    arrays: RefCell<Arrays>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached branch to commit into.
    pub fn create_root(&self, tag: &str) -> NodeId {
        self.create_branch(tag)
    }

    /// Total number of nodes ever created.
    pub fn node_count(&self) -> usize {
        self.arrays.borrow().flags.len()
    }

    pub fn flags(&self, node: NodeId) -> NodeFlags {
        self.arrays.borrow().flags[node.0]
    }

    pub fn tag(&self, node: NodeId) -> Option<Tag> {
        self.arrays.borrow().tags[node.0].clone()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arrays.borrow().parents[node.0]
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arrays.borrow().children[node.0].clone()
    }

    /// Serialize the children of `node`, innerHTML style.
    ///
    /// Branches render as `<tag>...</tag>`, leaves as their raw text (no
    /// escaping).
    pub fn to_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.arrays.borrow().write_markup(node, &mut out);
        out
    }
}

impl Host for MemoryTree {
    type Node = NodeId;

    fn create_branch(&self, tag: &str) -> NodeId {
        self.arrays
            .borrow_mut()
            .allocate(NodeFlags::BRANCH, Some(Tag::from(tag)), String::new())
    }

    fn create_leaf(&self, content: &str) -> NodeId {
        self.arrays
            .borrow_mut()
            .allocate(NodeFlags::LEAF, None, content.to_string())
    }

    fn kind(&self, node: &NodeId) -> NodeKind {
        if self.flags(*node).contains(NodeFlags::BRANCH) {
            NodeKind::Branch
        } else {
            NodeKind::Leaf
        }
    }

    fn leaf_content(&self, node: &NodeId) -> Option<String> {
        let arrays = self.arrays.borrow();
        arrays.flags[node.0]
            .contains(NodeFlags::LEAF)
            .then(|| arrays.text[node.0].clone())
    }

    fn set_leaf_content(&self, node: &NodeId, content: &str) {
        let mut arrays = self.arrays.borrow_mut();
        if !arrays.flags[node.0].contains(NodeFlags::LEAF) {
            warn!(node = node.0, "set_leaf_content on a branch ignored");
            return;
        }
        arrays.text[node.0] = content.to_string();
    }

    fn insert_before(&self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) {
        let mut arrays = self.arrays.borrow_mut();
        arrays.detach(*node);

        let siblings = &mut arrays.children[parent.0];
        let position = reference
            .and_then(|reference| siblings.iter().position(|child| child == reference))
            .unwrap_or(siblings.len());
        siblings.insert(position, *node);

        arrays.parents[node.0] = Some(*parent);
        arrays.flags[node.0].insert(NodeFlags::ATTACHED);
    }

    fn remove(&self, parent: &NodeId, node: &NodeId) {
        let mut arrays = self.arrays.borrow_mut();
        if arrays.parents[node.0] != Some(*parent) {
            warn!(parent = parent.0, node = node.0, "remove of a node that is not a child ignored");
            return;
        }
        arrays.detach(*node);
    }

    fn child_count(&self, parent: &NodeId) -> usize {
        self.arrays.borrow().children[parent.0].len()
    }

    fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
        self.arrays.borrow().children[parent.0].get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_reference_and_append() {
        let tree = MemoryTree::new();
        let root = tree.create_root("root");
        let a = tree.create_branch("a");
        let b = tree.create_branch("b");
        let c = tree.create_leaf("c");

        tree.insert_before(&root, &a, None);
        tree.insert_before(&root, &c, None);
        tree.insert_before(&root, &b, Some(&c));

        assert_eq!(tree.children(root), vec![a, b, c]);
        assert_eq!(tree.to_markup(root), "<a></a><b></b>c");
        assert_eq!(tree.parent(b), Some(root));
        assert!(tree.flags(b).contains(NodeFlags::ATTACHED));
    }

    #[test]
    fn test_insert_moves_attached_node() {
        let tree = MemoryTree::new();
        let root = tree.create_root("root");
        let div = tree.create_branch("div");
        let text = tree.create_leaf("x");

        tree.insert_before(&root, &div, None);
        tree.insert_before(&root, &text, None);
        tree.insert_before(&div, &text, None);

        assert_eq!(tree.child_count(&root), 1);
        assert_eq!(tree.to_markup(root), "<div>x</div>");
        assert_eq!(tree.parent(text), Some(div));
    }

    #[test]
    fn test_remove_detaches_but_keeps_node() {
        let tree = MemoryTree::new();
        let root = tree.create_root("root");
        let leaf = tree.create_leaf("gone");
        tree.insert_before(&root, &leaf, None);

        tree.remove(&root, &leaf);
        assert_eq!(tree.child_count(&root), 0);
        assert_eq!(tree.parent(leaf), None);
        assert!(!tree.flags(leaf).contains(NodeFlags::ATTACHED));
        assert_eq!(tree.leaf_content(&leaf).as_deref(), Some("gone"));

        // Removing again from the wrong parent is ignored
        tree.remove(&root, &leaf);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_leaf_content_only_on_leaves() {
        let tree = MemoryTree::new();
        let branch = tree.create_branch("p");
        let leaf = tree.create_leaf("old");

        assert_eq!(tree.kind(&branch), NodeKind::Branch);
        assert_eq!(tree.kind(&leaf), NodeKind::Leaf);
        assert_eq!(tree.leaf_content(&branch), None);

        tree.set_leaf_content(&leaf, "new");
        tree.set_leaf_content(&branch, "ignored");
        assert_eq!(tree.leaf_content(&leaf).as_deref(), Some("new"));
        assert_eq!(tree.tag(branch).as_deref(), Some("p"));
    }

    #[test]
    fn test_child_at_out_of_range() {
        let tree = MemoryTree::new();
        let root = tree.create_root("root");
        assert_eq!(tree.child_at(&root, 0), None);
    }
}
