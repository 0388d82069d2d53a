//! Selector reads: a mounted observer reading a slice of the state

use crate::action::Action;
use crate::dispatch::Dispatch;
use crate::observer::{Mount, Observer};
use crate::store::Store;
use std::rc::Rc;

/// A selector bound to a mounted observer
///
/// No memoization: the observer re-runs on every store notification and
/// [`Selector::get`] recomputes the selection each time.
pub struct Selector<S, A, T> {
    mount: Mount<S, A>,
    select: Box<dyn Fn(&S) -> T>,
}

/// Subscribe `observer` to `store` and read it through `selector`
///
/// The subscription lives as long as the returned [`Selector`].
pub fn use_selector<S, A, T, O, F>(store: &Store<S, A>, observer: O, selector: F) -> Selector<S, A, T>
where
    S: Clone + 'static,
    A: Action,
    O: Observer,
    F: Fn(&S) -> T + 'static,
{
    Selector {
        mount: Mount::new(store, Rc::new(observer)),
        select: Box::new(selector),
    }
}

/// The store's public dispatch
pub fn use_dispatch<S: Clone + 'static, A: Action>(store: &Store<S, A>) -> Dispatch<S, A> {
    store.dispatcher()
}

impl<S: Clone + 'static, A: Action, T> Selector<S, A, T> {
    /// Select from the current state
    pub fn get(&self) -> T {
        let state = self.mount.store().get_state();
        (self.select)(&state)
    }

    pub fn store(&self) -> &Store<S, A> {
        self.mount.store()
    }

    /// Read from another store, re-subscribing only if it differs
    pub fn set_store(&mut self, store: &Store<S, A>) -> bool {
        self.mount.set_store(store)
    }
}
