//! String-keyed property bags passed to connected render functions

use crate::bind::{BoundActionCreator, BoundActionCreators};
use crate::dispatch::Dispatch;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Key under which the dispatch handle is exposed
pub const DISPATCH_KEY: &str = "dispatch";

/// A single property
pub enum Prop<S, A> {
    Value(Value),
    Dispatch(Dispatch<S, A>),
    Callback(BoundActionCreator<S, A>),
}

impl<S, A> Clone for Prop<S, A> {
    fn clone(&self) -> Self {
        match self {
            Prop::Value(value) => Prop::Value(value.clone()),
            Prop::Dispatch(dispatch) => Prop::Dispatch(dispatch.clone()),
            Prop::Callback(callback) => Prop::Callback(callback.clone()),
        }
    }
}

impl<S, A> fmt::Debug for Prop<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Prop::Dispatch(_) => f.write_str("Dispatch"),
            Prop::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// Property bag
///
/// Merging is shallow: on a key collision the merged-in bag wins.
pub struct Props<S, A> {
    entries: BTreeMap<String, Prop<S, A>>,
}

impl<S, A> Props<S, A> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Prop::Value(value.into()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, prop: Prop<S, A>) {
        self.entries.insert(key.into(), prop);
    }

    pub fn get(&self, key: &str) -> Option<&Prop<S, A>> {
        self.entries.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(Prop::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn callback(&self, key: &str) -> Option<&BoundActionCreator<S, A>> {
        match self.entries.get(key) {
            Some(Prop::Callback(callback)) => Some(callback),
            _ => None,
        }
    }

    /// The dispatch handle stored under [`DISPATCH_KEY`]
    pub fn dispatch(&self) -> Option<&Dispatch<S, A>> {
        match self.entries.get(DISPATCH_KEY) {
            Some(Prop::Dispatch(dispatch)) => Some(dispatch),
            _ => None,
        }
    }

    /// Merge `other` into `self`, `other` wins on collisions
    pub fn merge(mut self, other: Props<S, A>) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, A> Default for Props<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Clone for Props<S, A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Props<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<S, A> From<serde_json::Map<String, Value>> for Props<S, A> {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, Prop::Value(value)))
                .collect(),
        }
    }
}

/// `dispatch` plus one callback per bound creator
impl<S, A> From<BoundActionCreators<S, A>> for Props<S, A> {
    fn from(bound: BoundActionCreators<S, A>) -> Self {
        let mut props = Props::new();
        props.insert(DISPATCH_KEY, Prop::Dispatch(bound.dispatch().clone()));
        for (key, creator) in bound.iter() {
            props.insert(key, Prop::Callback(creator.clone()));
        }
        props
    }
}
