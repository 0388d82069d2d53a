//! Provider - hands one store to the consumers that are given it
//!
//! There is no ambient or global store: whoever renders consumers passes
//! the provider (or the store) along explicitly.

use crate::action::Action;
use crate::connect::{Connected, ConnectedInstance};
use crate::dispatch::Dispatch;
use crate::observer::Observer;
use crate::selector::{use_selector, Selector};
use crate::store::Store;

pub struct Provider<S, A> {
    store: Store<S, A>,
}

impl<S, A> Clone for Provider<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Clone + 'static, A: Action> Provider<S, A> {
    pub fn new(store: Store<S, A>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    pub fn use_selector<T, O, F>(&self, observer: O, selector: F) -> Selector<S, A, T>
    where
        O: Observer,
        F: Fn(&S) -> T + 'static,
    {
        use_selector(&self.store, observer, selector)
    }

    pub fn use_dispatch(&self) -> Dispatch<S, A> {
        self.store.dispatcher()
    }

    pub fn mount<R, O: Observer>(
        &self,
        connected: &Connected<S, A, R>,
        observer: O,
    ) -> ConnectedInstance<S, A, R> {
        connected.mount(&self.store, observer)
    }
}
