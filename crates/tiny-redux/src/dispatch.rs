//! Cloneable handles for dispatching and reading state

use crate::action::Dispatchable;
use crate::error::StoreError;
use std::rc::{Rc, Weak};

/// Result of a dispatch: the raw store echoes the action back
pub type DispatchResult<S, A> = Result<Dispatchable<S, A>, StoreError>;

type DispatchFn<S, A> = dyn Fn(Dispatchable<S, A>) -> DispatchResult<S, A>;

/// Dispatch handle
///
/// Cheap to clone; every clone calls the same underlying function, so a
/// bound action creator keeps using the dispatch it was bound with.
pub struct Dispatch<S, A> {
    inner: Rc<DispatchFn<S, A>>,
}

impl<S, A> Dispatch<S, A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Dispatchable<S, A>) -> DispatchResult<S, A> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Dispatch an action, thunk or raw value
    pub fn dispatch(&self, action: impl Into<Dispatchable<S, A>>) -> DispatchResult<S, A> {
        (self.inner)(action.into())
    }

    /// Whether both handles call the same function
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakDispatch<S, A> {
        WeakDispatch {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning dispatch handle, see [`Dispatch::downgrade`]
pub struct WeakDispatch<S, A> {
    inner: Weak<DispatchFn<S, A>>,
}

impl<S, A> WeakDispatch<S, A> {
    pub fn upgrade(&self) -> Option<Dispatch<S, A>> {
        self.inner.upgrade().map(|inner| Dispatch { inner })
    }
}

impl<S, A> Clone for WeakDispatch<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A> Clone for Dispatch<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Reader for the current state snapshot
pub struct GetState<S> {
    inner: Rc<dyn Fn() -> S>,
}

impl<S> GetState<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> S + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    pub fn get(&self) -> S {
        (self.inner)()
    }
}

impl<S> Clone for GetState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}
