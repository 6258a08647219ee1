//! Reactive regions.
//!
//! A `React` instruction binds a region of the current parent to a
//! time-varying [`Transaction`]:
//!
//! 1. Sample the source and commit its transaction into the current parent
//!    (a nested commit with its own cursor, register and frames).
//! 2. Subscribe. On every change, roll back the active nested commit, then
//!    commit the new transaction in its place.
//! 3. Push one composite task onto the enclosing log: unsubscribe, then roll
//!    back whatever nested commit is active at that time.
//!
//! Re-commits run synchronously inside the reactive runtime's notification.
//! They always start a fresh nested commit; the enclosing commit has long
//! returned by then.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error};

use super::interpreter::commit_at;
use super::rollback::Rollback;
use super::state::TransactionState;
use crate::error::CommitError;
use crate::host::Host;
use crate::instruction::Transaction;
use crate::reactive::Reactive;

pub(crate) fn run_react<H: Host + 'static>(
    state: &mut TransactionState<H>,
    source: &Rc<dyn Reactive<Transaction>>,
) -> Result<(), CommitError> {
    let host = state.host.clone();
    let parent = state.parent.clone();

    let initial = source.sample();
    let rollback = commit_at(
        host.clone(),
        parent.clone(),
        initial.offset,
        &initial.instructions,
    )?;

    // The nested commit currently applied to the tree
    let active: Rc<RefCell<Option<Rollback>>> = Rc::new(RefCell::new(Some(rollback)));

    let active_for_change = active.clone();
    let on_change = move |transaction: Transaction| {
        let previous = active_for_change.borrow_mut().take();
        if let Some(previous) = previous {
            previous.run();
        }

        debug!(
            offset = transaction.offset,
            instructions = transaction.len(),
            "reactive region re-commit"
        );
        match commit_at(
            host.clone(),
            parent.clone(),
            transaction.offset,
            &transaction.instructions,
        ) {
            Ok(rollback) => *active_for_change.borrow_mut() = Some(rollback),
            Err(err) => error!(error = %err, "reactive region re-commit failed, region left empty"),
        }
    };
    let unsubscribe = source.subscribe(Box::new(on_change));

    state.rollback.push(move || {
        unsubscribe();
        let current = active.borrow_mut().take();
        if let Some(current) = current {
            current.run();
        }
    });

    // The nested commit spliced our parent's children
    state.cursor = state.cursor.clamped(state.child_count());
    Ok(())
}
