//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_builder::{Host, MemoryTree, NodeId, Reactive, TreeBuilder, Unsubscribe};

/// Install a tracing subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A fresh tree, its builder and an empty root.
pub fn setup() -> (TreeBuilder<MemoryTree>, Rc<MemoryTree>, NodeId) {
    init_tracing();
    let tree = Rc::new(MemoryTree::new());
    let root = tree.create_root("root");
    (TreeBuilder::new(tree.clone()), tree, root)
}

/// Append one leaf per label directly through the host.
pub fn fill(tree: &MemoryTree, parent: NodeId, labels: &[&str]) -> Vec<NodeId> {
    labels
        .iter()
        .map(|label| {
            let node = tree.create_leaf(label);
            tree.insert_before(&parent, &node, None);
            node
        })
        .collect()
}

/// Structural snapshot: markup plus node identities, recursively.
pub fn snapshot(tree: &MemoryTree, node: NodeId) -> (String, Vec<(NodeId, String)>) {
    fn walk(tree: &MemoryTree, node: NodeId, out: &mut Vec<(NodeId, String)>) {
        for child in tree.children(node) {
            out.push((child, tree.leaf_content(&child).unwrap_or_default()));
            walk(tree, child, out);
        }
    }
    let mut nodes = Vec::new();
    walk(tree, node, &mut nodes);
    (tree.to_markup(node), nodes)
}

// =============================================================================
// Source - settable reactive test double
// =============================================================================

type Listener<T> = Rc<RefCell<Box<dyn FnMut(T)>>>;

struct SourceInner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(usize, Listener<T>)>>,
    next_id: Cell<usize>,
}

/// A settable value with synchronous change delivery.
pub struct Source<T> {
    inner: Rc<SourceInner<T>>,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Source<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SourceInner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value.clone();
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            (listener.borrow_mut())(value.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<T: Clone + 'static> Reactive<T> for Source<T> {
    fn sample(&self) -> T {
        self.inner.value.borrow().clone()
    }

    fn subscribe(&self, on_change: Box<dyn FnMut(T)>) -> Unsubscribe {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(on_change))));

        let inner = Rc::downgrade(&self.inner);
        Box::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}
