//! Injection reads: wrap a render function so it receives store props
//!
//! [`connect`] takes a state projection and a [`MapDispatch`], and wraps a
//! render function. Each render merges the caller's own props, the
//! projected state props and the dispatch props (later wins on collisions)
//! and hands the result to the wrapped function.

use crate::action::Action;
use crate::bind::{bind_action_creators, ActionCreators};
use crate::dispatch::Dispatch;
use crate::observer::{Mount, Observer};
use crate::props::{Prop, Props, DISPATCH_KEY};
use crate::store::Store;
use std::rc::Rc;

type MapStateFn<S, A> = Rc<dyn Fn(&S, &Props<S, A>) -> Props<S, A>>;
type MapDispatchFn<S, A> = Rc<dyn Fn(&Dispatch<S, A>, &Props<S, A>) -> Props<S, A>>;
type RenderFn<S, A, R> = Rc<dyn Fn(&Props<S, A>) -> R>;

/// How dispatch props are produced
pub enum MapDispatch<S, A> {
    /// Only `dispatch` itself
    Default,
    /// A static creator map, bound to the store's dispatch
    Creators(ActionCreators<S, A>),
    /// Computed from the dispatch and the own props
    Function(MapDispatchFn<S, A>),
}

impl<S, A> MapDispatch<S, A> {
    pub fn function<F>(map: F) -> Self
    where
        F: Fn(&Dispatch<S, A>, &Props<S, A>) -> Props<S, A> + 'static,
    {
        MapDispatch::Function(Rc::new(map))
    }

    fn resolve(&self, dispatch: &Dispatch<S, A>, own_props: &Props<S, A>) -> Props<S, A> {
        match self {
            MapDispatch::Default => {
                let mut props = Props::new();
                props.insert(DISPATCH_KEY, Prop::Dispatch(dispatch.clone()));
                props
            }
            MapDispatch::Creators(creators) => bind_action_creators(creators, dispatch).into(),
            MapDispatch::Function(map) => map(dispatch, own_props),
        }
    }
}

impl<S, A> Default for MapDispatch<S, A> {
    fn default() -> Self {
        MapDispatch::Default
    }
}

/// State and dispatch projections, ready to wrap a render function
pub struct Connector<S, A> {
    map_state: Option<MapStateFn<S, A>>,
    map_dispatch: MapDispatch<S, A>,
}

/// Create a connector projecting state with `map_state`
pub fn connect<S, A, F>(map_state: F, map_dispatch: MapDispatch<S, A>) -> Connector<S, A>
where
    F: Fn(&S, &Props<S, A>) -> Props<S, A> + 'static,
{
    Connector {
        map_state: Some(Rc::new(map_state)),
        map_dispatch,
    }
}

impl<S: Clone + 'static, A: Action> Connector<S, A> {
    /// A connector that only injects dispatch props
    pub fn without_state(map_dispatch: MapDispatch<S, A>) -> Self {
        Self {
            map_state: None,
            map_dispatch,
        }
    }

    /// Wrap `render`
    pub fn wrap<R, F>(self, render: F) -> Connected<S, A, R>
    where
        F: Fn(&Props<S, A>) -> R + 'static,
    {
        Connected {
            connector: Rc::new(self),
            render: Rc::new(render),
        }
    }

    fn props(&self, store: &Store<S, A>, own_props: &Props<S, A>) -> Props<S, A> {
        let state_props = match &self.map_state {
            Some(map_state) => map_state(&store.get_state(), own_props),
            None => Props::new(),
        };
        let dispatch_props = self.map_dispatch.resolve(&store.dispatcher(), own_props);

        own_props.clone().merge(state_props).merge(dispatch_props)
    }
}

/// A wrapped render function; mount it to use it
pub struct Connected<S, A, R> {
    connector: Rc<Connector<S, A>>,
    render: RenderFn<S, A, R>,
}

impl<S, A, R> Clone for Connected<S, A, R> {
    fn clone(&self) -> Self {
        Self {
            connector: Rc::clone(&self.connector),
            render: Rc::clone(&self.render),
        }
    }
}

impl<S: Clone + 'static, A: Action, R> Connected<S, A, R> {
    /// Mount against `store`, subscribing `observer` until the instance is dropped
    pub fn mount<O: Observer>(
        &self,
        store: &Store<S, A>,
        observer: O,
    ) -> ConnectedInstance<S, A, R> {
        ConnectedInstance {
            connected: self.clone(),
            mount: Mount::new(store, Rc::new(observer)),
        }
    }
}

/// A mounted connected render function
pub struct ConnectedInstance<S, A, R> {
    connected: Connected<S, A, R>,
    mount: Mount<S, A>,
}

impl<S: Clone + 'static, A: Action, R> ConnectedInstance<S, A, R> {
    /// Render with the merged props
    pub fn render(&self, own_props: &Props<S, A>) -> R {
        let props = self
            .connected
            .connector
            .props(self.mount.store(), own_props);
        (self.connected.render)(&props)
    }

    pub fn store(&self) -> &Store<S, A> {
        self.mount.store()
    }

    /// Use another store, re-subscribing only if it differs
    pub fn set_store(&mut self, store: &Store<S, A>) -> bool {
        self.mount.set_store(store)
    }
}
