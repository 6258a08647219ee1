//! Rollback log.
//!
//! Every mutating instruction pushes its inverse here. Draining the log in
//! LIFO order reverses the commit exactly, including any reactive
//! subscriptions the commit created.

use std::fmt;

use tracing::debug;

use crate::types::Cleanup;

/// Undo log of one commit.
///
/// Returned by [`TreeBuilder::commit`](crate::TreeBuilder::commit). Dropping
/// it without calling [`run`](Rollback::run) makes the commit permanent,
/// reactive regions included: their subscriptions stay live.
#[must_use = "dropping a Rollback leaves the commit applied forever"]
#[derive(Default)]
pub struct Rollback {
    tasks: Vec<Cleanup>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, task: impl FnOnce() + 'static) {
        self.tasks.push(Box::new(task));
    }

    /// Number of pending undo tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Undo everything, newest task first.
    pub fn run(mut self) {
        let count = self.tasks.len();
        while let Some(task) = self.tasks.pop() {
            task();
        }
        debug!(tasks = count, "rolled back");
    }

    /// Box into a plain [`Cleanup`].
    pub fn into_cleanup(self) -> Cleanup {
        Box::new(move || self.run())
    }
}

impl fmt::Debug for Rollback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rollback")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_run_is_lifo() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut rollback = Rollback::new();

        for i in 0..3 {
            let order = order.clone();
            rollback.push(move || order.borrow_mut().push(i));
        }
        assert_eq!(rollback.len(), 3);

        rollback.run();
        assert_eq!(*order.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn test_into_cleanup_defers_until_called() {
        let ran = Rc::new(RefCell::new(false));
        let mut rollback = Rollback::new();
        let ran_clone = ran.clone();
        rollback.push(move || *ran_clone.borrow_mut() = true);

        let cleanup = rollback.into_cleanup();
        assert!(!*ran.borrow(), "converting must not run the log");

        cleanup();
        assert!(*ran.borrow());
    }

    #[test]
    fn test_empty_rollback_is_noop() {
        let rollback = Rollback::new();
        assert!(rollback.is_empty());
        rollback.run();
    }
}
