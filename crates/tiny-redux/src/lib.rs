//! Single-state store with pure reducers, subscribers and composable middleware
//!
//! This crate provides:
//! - [`Store`]: holds the state, dispatches actions to the reducer and
//!   notifies subscribers
//! - Middleware composition ([`apply_middleware`], [`compose`]) plus the
//!   logger, thunk and record middleware
//! - Action creator binding ([`bind_action_creators`])
//! - The read/subscribe contract for UI layers ([`use_selector`],
//!   [`connect`], [`Provider`])
//!
//! ```rust
//! use tiny_redux::{create_store, Action};
//!
//! #[derive(Debug, Clone)]
//! enum Counter {
//!     Init,
//!     Increment,
//!     Decrement,
//! }
//!
//! impl Action for Counter {
//!     fn kind(&self) -> &str {
//!         match self {
//!             Counter::Init => tiny_redux::INIT_KIND,
//!             Counter::Increment => "increment",
//!             Counter::Decrement => "decrement",
//!         }
//!     }
//!
//!     fn init() -> Self {
//!         Counter::Init
//!     }
//! }
//!
//! fn reduce(state: Option<i64>, action: &Counter) -> i64 {
//!     let state = state.unwrap_or(0);
//!     match action {
//!         Counter::Increment => state + 1,
//!         Counter::Decrement => state - 1,
//!         _ => state,
//!     }
//! }
//!
//! let store = create_store(reduce).unwrap();
//! store.dispatch(Counter::Increment).unwrap();
//! store.dispatch(Counter::Increment).unwrap();
//! store.dispatch(Counter::Decrement).unwrap();
//! assert_eq!(store.get_state(), 1);
//! ```

pub mod action;
pub mod bind;
pub mod connect;
pub mod dispatch;
pub mod error;
pub mod middleware;
pub mod observer;
pub mod props;
pub mod provider;
pub mod selector;
pub mod store;

pub use action::{Action, Dispatchable, Thunk, INIT_KIND};
pub use bind::{bind_action_creators, ActionCreators, BoundActionCreator, BoundActionCreators};
pub use connect::{connect, Connected, ConnectedInstance, Connector, MapDispatch};
pub use dispatch::{Dispatch, DispatchResult, GetState, WeakDispatch};
pub use error::StoreError;
pub use middleware::logger::LoggerMiddleware;
pub use middleware::record::RecordMiddleware;
pub use middleware::thunk::{delayed, ThunkMiddleware};
pub use middleware::{apply_middleware, compose, ApplyMiddleware, Layer, Middleware, MiddlewareApi};
pub use observer::{Mount, Observer};
pub use props::{Prop, Props, DISPATCH_KEY};
pub use provider::Provider;
pub use selector::{use_dispatch, use_selector, Selector};
pub use store::{
    create_store, create_store_with, fallible, BoxedReducer, Enhancer, Fallible, Reducer, Store,
    StoreCreator, Unsubscribe,
};
