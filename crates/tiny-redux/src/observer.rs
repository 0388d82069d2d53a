//! Subscription of a UI observer to a store
//!
//! The UI layer supplies an [`Observer`] that re-runs whatever reads the
//! store. A [`Mount`] keeps it subscribed for as long as the observer is
//! mounted and unsubscribes when dropped.

use crate::action::Action;
use crate::store::{Store, Unsubscribe};
use std::rc::Rc;

/// Re-evaluation hook supplied by the UI layer
pub trait Observer: 'static {
    /// Re-run the observer; it reads the store again
    fn force_update(&self);
}

impl<F> Observer for F
where
    F: Fn() + 'static,
{
    fn force_update(&self) {
        self()
    }
}

/// An observer subscribed to one store
///
/// Every store notification forces the observer to re-run, whether or not
/// what it reads has changed.
pub struct Mount<S, A> {
    store: Store<S, A>,
    observer: Rc<dyn Observer>,
    subscription: Unsubscribe,
}

impl<S: Clone + 'static, A: Action> Mount<S, A> {
    pub fn new(store: &Store<S, A>, observer: Rc<dyn Observer>) -> Self {
        let subscription = Self::subscribe(store, &observer);
        Self {
            store: store.clone(),
            observer,
            subscription,
        }
    }

    fn subscribe(store: &Store<S, A>, observer: &Rc<dyn Observer>) -> Unsubscribe {
        let observer = Rc::clone(observer);
        store.subscribe(move || observer.force_update())
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    /// Point the observer at `store`
    ///
    /// Re-subscribes only when `store` is a different store; returns whether
    /// it did.
    pub fn set_store(&mut self, store: &Store<S, A>) -> bool {
        if self.store.ptr_eq(store) {
            return false;
        }

        self.subscription.unsubscribe();
        self.store = store.clone();
        self.subscription = Self::subscribe(store, &self.observer);
        log::debug!("Observer moved to a new store");
        true
    }
}

impl<S, A> Drop for Mount<S, A> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::{counter, CounterAction};
    use crate::store::create_store;
    use std::cell::Cell;

    #[test]
    fn test_mount_forces_update_and_unsubscribes_on_drop() {
        let store: Store<i64, CounterAction> = create_store(counter).unwrap();
        let renders = Rc::new(Cell::new(0));
        let counter_renders = Rc::clone(&renders);
        let mount = Mount::new(
            &store,
            Rc::new(move || counter_renders.set(counter_renders.get() + 1)),
        );

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(renders.get(), 1);
        assert_eq!(store.listener_count(), 1);

        drop(mount);
        assert_eq!(store.listener_count(), 0);
        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(renders.get(), 1);
    }

    #[test]
    fn test_set_store() {
        let first: Store<i64, CounterAction> = create_store(counter).unwrap();
        let second: Store<i64, CounterAction> = create_store(counter).unwrap();
        let mut mount = Mount::new(&first, Rc::new(|| {}));

        assert!(!mount.set_store(&first.clone()));
        assert_eq!(first.listener_count(), 1);

        assert!(mount.set_store(&second));
        assert_eq!(first.listener_count(), 0);
        assert_eq!(second.listener_count(), 1);
    }
}
