//! Action creators bound to a dispatch
//!
//! An action creator turns call arguments into something dispatchable.
//! [`bind_action_creators`] wraps every creator of a map so that calling it
//! dispatches the produced action right away.

use crate::action::Dispatchable;
use crate::dispatch::{Dispatch, DispatchResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

type ActionCreator<S, A> = Rc<dyn Fn(&[Value]) -> Dispatchable<S, A>>;

/// Map from key to action creator
pub struct ActionCreators<S, A> {
    creators: BTreeMap<String, ActionCreator<S, A>>,
}

impl<S, A> ActionCreators<S, A> {
    pub fn new() -> Self {
        Self {
            creators: BTreeMap::new(),
        }
    }

    /// Add a creator; it receives the arguments the bound function is called with
    pub fn with<F, D>(mut self, key: impl Into<String>, creator: F) -> Self
    where
        S: 'static,
        A: 'static,
        F: Fn(&[Value]) -> D + 'static,
        D: Into<Dispatchable<S, A>> + 'static,
    {
        let creator: ActionCreator<S, A> =
            Rc::new(move |args: &[Value]| -> Dispatchable<S, A> { creator(args).into() });
        self.creators.insert(key.into(), creator);
        self
    }

    /// Build the action for `key` without dispatching it
    pub fn create(&self, key: &str, args: &[Value]) -> Option<Dispatchable<S, A>> {
        self.creators.get(key).map(|creator| creator(args))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.creators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }
}

impl<S, A> Default for ActionCreators<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Clone for ActionCreators<S, A> {
    fn clone(&self) -> Self {
        Self {
            creators: self.creators.clone(),
        }
    }
}

/// An action creator that dispatches what it creates
pub struct BoundActionCreator<S, A> {
    creator: ActionCreator<S, A>,
    dispatch: Dispatch<S, A>,
}

impl<S, A> BoundActionCreator<S, A> {
    /// Create the action from `args` and dispatch it
    pub fn call(&self, args: &[Value]) -> DispatchResult<S, A> {
        self.dispatch.dispatch((self.creator)(args))
    }

    /// The dispatch this creator was bound with
    pub fn dispatcher(&self) -> &Dispatch<S, A> {
        &self.dispatch
    }
}

impl<S, A> Clone for BoundActionCreator<S, A> {
    fn clone(&self) -> Self {
        Self {
            creator: Rc::clone(&self.creator),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Bound creators plus the dispatch they share
pub struct BoundActionCreators<S, A> {
    dispatch: Dispatch<S, A>,
    bound: BTreeMap<String, BoundActionCreator<S, A>>,
}

impl<S, A> BoundActionCreators<S, A> {
    pub fn get(&self, key: &str) -> Option<&BoundActionCreator<S, A>> {
        self.bound.get(key)
    }

    /// Call the creator under `key`, `None` if there is none
    pub fn call(&self, key: &str, args: &[Value]) -> Option<DispatchResult<S, A>> {
        self.bound.get(key).map(|creator| creator.call(args))
    }

    /// The captured dispatch, for dispatching directly
    pub fn dispatch(&self) -> &Dispatch<S, A> {
        &self.dispatch
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundActionCreator<S, A>)> {
        self.bound.iter().map(|(key, creator)| (key.as_str(), creator))
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

/// Bind every creator in `creators` to `dispatch`
pub fn bind_action_creators<S, A>(
    creators: &ActionCreators<S, A>,
    dispatch: &Dispatch<S, A>,
) -> BoundActionCreators<S, A> {
    let bound = creators
        .creators
        .iter()
        .map(|(key, creator)| {
            (
                key.clone(),
                BoundActionCreator {
                    creator: Rc::clone(creator),
                    dispatch: dispatch.clone(),
                },
            )
        })
        .collect();

    BoundActionCreators {
        dispatch: dispatch.clone(),
        bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::{counter, CounterAction};
    use crate::store::create_store;
    use serde_json::json;
    use std::cell::RefCell;

    fn counter_creators() -> ActionCreators<i64, CounterAction> {
        ActionCreators::new()
            .with("inc", |_args| CounterAction::Increment)
            .with("add", |args| CounterAction::Add {
                amount: args.first().and_then(Value::as_i64).unwrap_or(1),
            })
    }

    #[test]
    fn test_bound_creator_dispatches_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let dispatch: Dispatch<i64, CounterAction> = Dispatch::new(move |action| {
            recorder.borrow_mut().push(action.clone().into_action());
            Ok(action)
        });

        let bound = bind_action_creators(&counter_creators(), &dispatch);
        let returned = bound.call("inc", &[]).unwrap().unwrap();

        assert_eq!(*seen.borrow(), vec![Some(CounterAction::Increment)]);
        assert_eq!(returned.into_action(), Some(CounterAction::Increment));
    }

    #[test]
    fn test_arguments_reach_creator() {
        let store = create_store(counter).unwrap();
        let bound = bind_action_creators(&counter_creators(), &store.dispatcher());

        bound.call("add", &[json!(7)]).unwrap().unwrap();
        bound.call("add", &[]).unwrap().unwrap();

        assert_eq!(store.get_state(), 8);
    }

    #[test]
    fn test_unknown_key() {
        let store = create_store(counter).unwrap();
        let bound = bind_action_creators(&counter_creators(), &store.dispatcher());
        assert!(bound.call("missing", &[]).is_none());
        assert_eq!(bound.len(), 2);
    }

    #[test]
    fn test_dispatch_entry_is_the_bound_dispatch() {
        let store = create_store(counter).unwrap();
        let dispatch = store.dispatcher();
        let bound = bind_action_creators(&counter_creators(), &dispatch);

        assert!(bound.dispatch().ptr_eq(&dispatch));
        bound.dispatch().dispatch(CounterAction::Decrement).unwrap();
        assert_eq!(store.get_state(), -1);
    }

    #[test]
    fn test_creators_keep_their_dispatch() {
        let store = create_store(counter).unwrap();
        let raw = store.dispatcher();
        let bound = bind_action_creators(&counter_creators(), &raw);

        // Replacing the store's dispatch does not rebind existing creators
        let swallowed = store.with_dispatch(Dispatch::new(Ok));
        swallowed.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(store.get_state(), 0);

        bound.call("inc", &[]).unwrap().unwrap();
        assert_eq!(store.get_state(), 1);
        assert!(bound.get("inc").is_some_and(|c| c.dispatcher().ptr_eq(&raw)));
    }

    #[test]
    fn test_create_without_dispatch() {
        let creators = counter_creators();
        let action = creators.create("add", &[json!(3)]);
        assert_eq!(
            action.and_then(Dispatchable::into_action),
            Some(CounterAction::Add { amount: 3 })
        );
        assert_eq!(creators.keys().collect::<Vec<_>>(), vec!["add", "inc"]);
    }
}
