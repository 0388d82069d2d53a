//! Actions and the values that travel through a dispatch chain
//!
//! Applications describe their actions as an enum implementing [`Action`].
//! What actually flows through `dispatch` is a [`Dispatchable`]: either a
//! typed action record, a [`Thunk`] (a deferred action that a middleware
//! has to run), or a raw JSON value that a middleware may decode.

use crate::dispatch::{Dispatch, GetState};
use std::fmt;
use std::rc::Rc;

/// Discriminant of the action the store dispatches once on construction
pub const INIT_KIND: &str = "@@tiny-redux/INIT";

/// Action trait - a plain record identified by its kind
///
/// Reducers must treat [`Action::init`] like any other unrecognized action:
/// return the default state when there is none yet, otherwise leave the
/// state unchanged.
pub trait Action: Clone + fmt::Debug + 'static {
    /// Discriminant naming this kind of action
    fn kind(&self) -> &str;

    /// The reserved action used to let the reducer install its initial state
    fn init() -> Self;
}

type ThunkFn<S, A> = dyn Fn(&Dispatch<S, A>, &GetState<S>) -> anyhow::Result<()>;

/// A deferred action
///
/// Thunks never reach the reducer. A thunk middleware calls them with the
/// store's dispatch and state reader instead of forwarding them.
pub struct Thunk<S, A> {
    run: Rc<ThunkFn<S, A>>,
}

impl<S, A> Thunk<S, A> {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&Dispatch<S, A>, &GetState<S>) -> anyhow::Result<()> + 'static,
    {
        Self { run: Rc::new(run) }
    }

    /// Run the thunk against a store API
    pub fn call(&self, dispatch: &Dispatch<S, A>, get_state: &GetState<S>) -> anyhow::Result<()> {
        (self.run)(dispatch, get_state)
    }
}

impl<S, A> Clone for Thunk<S, A> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<S, A> fmt::Debug for Thunk<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk")
    }
}

/// Anything that can be handed to `dispatch`
pub enum Dispatchable<S, A> {
    /// A typed action record, the only shape the reducer accepts
    Action(A),
    /// A deferred action for a thunk middleware
    Thunk(Thunk<S, A>),
    /// An untyped value (number, null, JSON object ...)
    Raw(serde_json::Value),
}

impl<S, A: Action> Dispatchable<S, A> {
    /// Short description used in logs and error messages
    pub fn describe(&self) -> String {
        match self {
            Dispatchable::Action(action) => format!("action '{}'", action.kind()),
            Dispatchable::Thunk(_) => "a thunk".to_string(),
            Dispatchable::Raw(value) => format!("'{}'", value),
        }
    }

    pub fn as_action(&self) -> Option<&A> {
        match self {
            Dispatchable::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn into_action(self) -> Option<A> {
        match self {
            Dispatchable::Action(action) => Some(action),
            _ => None,
        }
    }
}

impl<S, A: Clone> Clone for Dispatchable<S, A> {
    fn clone(&self) -> Self {
        match self {
            Dispatchable::Action(action) => Dispatchable::Action(action.clone()),
            Dispatchable::Thunk(thunk) => Dispatchable::Thunk(thunk.clone()),
            Dispatchable::Raw(value) => Dispatchable::Raw(value.clone()),
        }
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatchable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Dispatchable::Thunk(thunk) => f.debug_tuple("Thunk").field(thunk).finish(),
            Dispatchable::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

impl<S, A> From<A> for Dispatchable<S, A> {
    fn from(action: A) -> Self {
        Dispatchable::Action(action)
    }
}

impl<S, A> From<Thunk<S, A>> for Dispatchable<S, A> {
    fn from(thunk: Thunk<S, A>) -> Self {
        Dispatchable::Thunk(thunk)
    }
}
