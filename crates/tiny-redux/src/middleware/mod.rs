//! Middleware system
//!
//! Middleware sits between `dispatch` and the reducer, allowing side
//! effects, async operations, logging, and other cross-cutting concerns to
//! be handled in a composable way.
//!
//! ```text
//! dispatch(action) → m1 → m2 → ... → raw dispatch → reducer → listeners
//! ```
//!
//! Each middleware can:
//! - Inspect actions and state
//! - Forward the action with `next`, before or after its own logic
//! - Swallow the action by not calling `next`
//! - Dispatch new actions through the full chain via the [`MiddlewareApi`]
//!
//! ## Example
//!
//! ```rust
//! use tiny_redux::{Dispatch, DispatchResult, Dispatchable, MiddlewareApi};
//!
//! fn log_kinds<S, A: tiny_redux::Action>(
//!     _api: &MiddlewareApi<S, A>,
//!     next: &Dispatch<S, A>,
//!     action: Dispatchable<S, A>,
//! ) -> DispatchResult<S, A> {
//!     log::debug!("Dispatching {}", action.describe());
//!     next.dispatch(action)
//! }
//! ```

use crate::action::{Action, Dispatchable};
use crate::dispatch::{Dispatch, DispatchResult, GetState, WeakDispatch};
use crate::error::StoreError;
use crate::store::{BoxedReducer, Enhancer, Store, StoreCreator};
use std::cell::OnceCell;
use std::rc::Rc;

pub mod logger;
pub mod record;
pub mod thunk;

/// Store API handed to middleware
///
/// `dispatch` always resolves to the fully composed dispatch, so actions
/// dispatched from middleware re-enter the chain from the top.
pub struct MiddlewareApi<S, A> {
    get_state: GetState<S>,
    dispatch: Dispatch<S, A>,
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            get_state: self.get_state.clone(),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<S, A> MiddlewareApi<S, A> {
    pub fn new(get_state: GetState<S>, dispatch: Dispatch<S, A>) -> Self {
        Self {
            get_state,
            dispatch,
        }
    }

    pub fn get_state(&self) -> S {
        self.get_state.get()
    }

    pub fn state_getter(&self) -> GetState<S> {
        self.get_state.clone()
    }

    /// Dispatch through the whole middleware chain
    pub fn dispatch(&self, action: impl Into<Dispatchable<S, A>>) -> DispatchResult<S, A> {
        self.dispatch.dispatch(action)
    }

    pub fn dispatcher(&self) -> Dispatch<S, A> {
        self.dispatch.clone()
    }
}

/// Middleware trait - intercepts everything dispatched to a store
///
/// Middleware is attached to exactly one store when that store is built with
/// [`apply_middleware`]. Handlers take `&self` because dispatch is
/// re-entrant; keep mutable bookkeeping in `Cell`/`RefCell`.
pub trait Middleware<S, A>: 'static {
    /// Called once while the store is being built, before the chain exists
    ///
    /// Dispatching from here fails with
    /// [`StoreError::DispatchWhileConstructing`].
    fn setup(&self, _api: &MiddlewareApi<S, A>) -> Result<(), StoreError> {
        Ok(())
    }

    /// Handle an action
    ///
    /// - `api`: read state, or dispatch through the full chain
    /// - `next`: the rest of the chain (ending in the raw store dispatch)
    /// - `action`: what was dispatched
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Dispatch<S, A>,
        action: Dispatchable<S, A>,
    ) -> DispatchResult<S, A>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<S, A>, Dispatchable<S, A>) -> DispatchResult<S, A>
        + 'static,
{
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Dispatch<S, A>,
        action: Dispatchable<S, A>,
    ) -> DispatchResult<S, A> {
        self(api, next, action)
    }
}

/// A dispatch wrapper: receives `next`, returns the augmented dispatch
pub type Layer<S, A> = Box<dyn Fn(Dispatch<S, A>) -> Dispatch<S, A>>;

/// Compose layers right to left
///
/// `compose([l1, l2, l3])(d)` is `l1(l2(l3(d)))`, so `l1` sees an action
/// first. No layers give the identity, one layer is returned as is.
pub fn compose<S: 'static, A: 'static>(mut layers: Vec<Layer<S, A>>) -> Layer<S, A> {
    if layers.len() <= 1 {
        return layers
            .pop()
            .unwrap_or_else(|| Box::new(|dispatch: Dispatch<S, A>| dispatch));
    }

    Box::new(move |dispatch| {
        layers
            .iter()
            .rev()
            .fold(dispatch, |next, layer| layer(next))
    })
}

/// Enhancer wrapping a store's dispatch with a middleware chain
pub struct ApplyMiddleware<S, A> {
    middleware: Vec<Rc<dyn Middleware<S, A>>>,
}

/// Build an enhancer from `middleware`, first entry outermost
pub fn apply_middleware<S, A>(middleware: Vec<Box<dyn Middleware<S, A>>>) -> ApplyMiddleware<S, A> {
    ApplyMiddleware {
        middleware: middleware.into_iter().map(Rc::from).collect(),
    }
}

impl<S, A> ApplyMiddleware<S, A> {
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
        }
    }

    /// Append a middleware; it runs after every middleware added before it
    pub fn with<M: Middleware<S, A>>(mut self, middleware: M) -> Self {
        self.middleware.push(Rc::new(middleware));
        self
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }
}

impl<S, A> Default for ApplyMiddleware<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + 'static, A: Action> Enhancer<S, A> for ApplyMiddleware<S, A> {
    fn enhance(
        self,
        create: StoreCreator<S, A>,
        reducer: BoxedReducer<S, A>,
    ) -> Result<Store<S, A>, StoreError> {
        let store = create(reducer)?;

        // Bound once the chain is composed
        let composed: Rc<OnceCell<WeakDispatch<S, A>>> = Rc::new(OnceCell::new());
        let lazy = Rc::clone(&composed);
        let api = MiddlewareApi::new(
            store.state_getter(),
            Dispatch::new(move |action| match lazy.get() {
                Some(weak) => weak
                    .upgrade()
                    .ok_or(StoreError::StoreDropped)?
                    .dispatch(action),
                None => Err(StoreError::DispatchWhileConstructing),
            }),
        );

        for middleware in &self.middleware {
            middleware.setup(&api)?;
        }

        let layers: Vec<Layer<S, A>> = self
            .middleware
            .into_iter()
            .map(|middleware| {
                let api = api.clone();
                Box::new(move |next: Dispatch<S, A>| {
                    let middleware = Rc::clone(&middleware);
                    let api = api.clone();
                    Dispatch::new(move |action| middleware.handle(&api, &next, action))
                }) as Layer<S, A>
            })
            .collect();
        log::trace!("Composing {} middleware layers", layers.len());

        let dispatch = compose(layers)(store.dispatcher());
        if composed.set(dispatch.downgrade()).is_err() {
            log::warn!("Middleware dispatch was already bound");
        }

        Ok(store.with_dispatch(dispatch))
    }
}
