//! Reactive value contract.
//!
//! The builder does not ship a reactive runtime. It consumes any value that
//! can be sampled now and whose changes can be subscribed to:
//!
//! - [`Reactive::sample`] - read the current value
//! - [`Reactive::subscribe`] - get called on every change, until unsubscribed
//!
//! With the `signals` feature, `spark_signals::Signal<T>` implements the
//! contract directly.
//!
//! # Helpers
//!
//! - [`Constant`] - a value that never changes
//! - [`map`] - derive one reactive value from another
//! - [`Value`] - static or reactive, like a prop
//! - [`bind`] - run an update now and on every change

use std::marker::PhantomData;
use std::rc::Rc;

use crate::types::Cleanup;

#[cfg(feature = "signals")]
mod signals;

/// Handle returned by [`Reactive::subscribe`]. Calling it stops delivery.
pub type Unsubscribe = Cleanup;

// =============================================================================
// Contract
// =============================================================================

/// A value that can be sampled now and whose changes can be observed.
///
/// `subscribe` must not call `on_change` for the current value, only for
/// later changes. Callbacks run synchronously, inside whatever call caused
/// the change.
pub trait Reactive<T> {
    fn sample(&self) -> T;

    fn subscribe(&self, on_change: Box<dyn FnMut(T)>) -> Unsubscribe;
}

impl<T, R: Reactive<T> + ?Sized> Reactive<T> for Rc<R> {
    fn sample(&self) -> T {
        (**self).sample()
    }

    fn subscribe(&self, on_change: Box<dyn FnMut(T)>) -> Unsubscribe {
        (**self).subscribe(on_change)
    }
}

// =============================================================================
// Constant
// =============================================================================

/// A reactive value that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant<T>(T);

impl<T> Constant<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }
}

impl<T: Clone> Reactive<T> for Constant<T> {
    fn sample(&self) -> T {
        self.0.clone()
    }

    fn subscribe(&self, _on_change: Box<dyn FnMut(T)>) -> Unsubscribe {
        Box::new(|| {})
    }
}

// =============================================================================
// Map
// =============================================================================

/// A reactive value derived from another by a pure function.
///
/// Created by [`map`].
pub struct Map<R, F, T> {
    source: R,
    f: Rc<F>,
    _marker: PhantomData<fn(T)>,
}

/// Derive a reactive value: `f` is applied to every sample and every change.
///
/// ```ignore
/// let count = signal(2);
/// let leaves = map(count.clone(), |n: usize| {
///     Transaction::new(0, (0..n).map(|i| insert_leaf(i.to_string())).collect())
/// });
/// ```
pub fn map<T, U, R, F>(source: R, f: F) -> Map<R, F, T>
where
    R: Reactive<T>,
    F: Fn(T) -> U,
{
    Map {
        source,
        f: Rc::new(f),
        _marker: PhantomData,
    }
}

impl<T, U, R, F> Reactive<U> for Map<R, F, T>
where
    T: 'static,
    U: 'static,
    R: Reactive<T>,
    F: Fn(T) -> U + 'static,
{
    fn sample(&self) -> U {
        (self.f)(self.source.sample())
    }

    fn subscribe(&self, mut on_change: Box<dyn FnMut(U)>) -> Unsubscribe {
        let f = self.f.clone();
        self.source
            .subscribe(Box::new(move |value| on_change(f(value))))
    }
}

// =============================================================================
// Value
// =============================================================================

/// Either a plain value or a reactive one.
#[derive(Clone)]
pub enum Value<T> {
    Static(T),
    Reactive(Rc<dyn Reactive<T>>),
}

impl<T: Clone + 'static> Value<T> {
    /// Current value.
    pub fn get(&self) -> T {
        match self {
            Self::Static(value) => value.clone(),
            Self::Reactive(reactive) => reactive.sample(),
        }
    }

    pub fn is_reactive(&self) -> bool {
        matches!(self, Self::Reactive(_))
    }

    /// View as a reactive value. Static values become a [`Constant`].
    pub fn into_reactive(self) -> Rc<dyn Reactive<T>> {
        match self {
            Self::Static(value) => Rc::new(Constant::new(value)),
            Self::Reactive(reactive) => reactive,
        }
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

// =============================================================================
// bind
// =============================================================================

/// Call `update` with the current value, then again on every change.
///
/// Returns a cleanup that stops further updates. For a static value the
/// update runs once and the cleanup does nothing.
pub fn bind<T: Clone + 'static>(value: &Value<T>, mut update: impl FnMut(T) + 'static) -> Cleanup {
    match value {
        Value::Static(value) => {
            update(value.clone());
            Box::new(|| {})
        }
        Value::Reactive(reactive) => {
            update(reactive.sample());
            reactive.subscribe(Box::new(update))
        }
    }
}
