//! spark-signals adapter.
//!
//! A `Signal<T>` is sampled with `get()` and observed through an `effect`
//! that only forwards values differing from the last one delivered (same
//! rule as `show()` skipping unchanged conditions).
//!
//! The listener runs inside `untrack` and the effect lives under its own
//! `effect_root`. A listener that re-commits a region reads and subscribes to
//! nested signals; without both, those reads would become dependencies of
//! this effect and the nested effects its children, destroyed on its next
//! re-run.

use spark_signals::{effect, effect_root, untrack, Signal};

use super::{Reactive, Unsubscribe};

impl<T: Clone + PartialEq + 'static> Reactive<T> for Signal<T> {
    fn sample(&self) -> T {
        self.get()
    }

    fn subscribe(&self, mut on_change: Box<dyn FnMut(T)>) -> Unsubscribe {
        let signal = self.clone();
        let mut last = self.get();

        let stop = effect_root(move || {
            // Destroyed along with the root
            let _stop = effect(move || {
                let current = signal.get();
                if current == last {
                    return;
                }
                last = current.clone();
                untrack(|| on_change(current));
            });
        });

        Box::new(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::{flush_sync, signal};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_subscribe_skips_current_value() {
        let count = signal(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        let unsubscribe = count.subscribe(Box::new(move |n| seen_clone.borrow_mut().push(n)));
        flush_sync();
        assert!(seen.borrow().is_empty(), "subscribing must not replay the current value");

        count.set(2);
        flush_sync();
        assert_eq!(*seen.borrow(), vec![2]);

        unsubscribe();
        count.set(3);
        flush_sync();
        assert_eq!(*seen.borrow(), vec![2], "no delivery after unsubscribe");
        assert_eq!(count.sample(), 3);
    }
}
