//! RecordMiddleware - decodes untyped JSON records into typed actions
//!
//! `{"type": "increment"}` dispatched as [`Dispatchable::Raw`] is decoded
//! with serde and dispatched again through the whole chain. Values that are
//! not objects, or objects that don't decode, continue down the chain
//! unchanged and are rejected by the store.

use super::{Middleware, MiddlewareApi};
use crate::action::{Action, Dispatchable};
use crate::dispatch::{Dispatch, DispatchResult};
use serde::de::DeserializeOwned;

pub struct RecordMiddleware;

impl RecordMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecordMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for RecordMiddleware
where
    S: Clone + 'static,
    A: Action + DeserializeOwned,
{
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Dispatch<S, A>,
        action: Dispatchable<S, A>,
    ) -> DispatchResult<S, A> {
        match action {
            Dispatchable::Raw(value) if value.is_object() => {
                match serde_json::from_value::<A>(value.clone()) {
                    Ok(action) => api.dispatch(action),
                    Err(e) => {
                        log::warn!("RecordMiddleware: cannot decode {}: {}", value, e);
                        next.dispatch(Dispatchable::Raw(value))
                    }
                }
            }
            other => next.dispatch(other),
        }
    }
}
