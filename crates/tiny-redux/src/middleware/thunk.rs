//! ThunkMiddleware - runs deferred actions
//!
//! A [`Thunk`] is dispatched like an action. Instead of forwarding it down
//! the chain (where the raw store would reject it), this middleware calls it
//! with the store's dispatch and state reader. Everything else passes
//! through untouched.

use super::{Middleware, MiddlewareApi};
use crate::action::{Action, Dispatchable, Thunk};
use crate::dispatch::{Dispatch, DispatchResult};
use crate::error::StoreError;
use anyhow::{anyhow, Context};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

/// ThunkMiddleware - calls thunks, forwards everything else
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThunkMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for ThunkMiddleware
where
    S: Clone + 'static,
    A: Action,
{
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Dispatch<S, A>,
        action: Dispatchable<S, A>,
    ) -> DispatchResult<S, A> {
        match action {
            Dispatchable::Thunk(thunk) => {
                log::debug!("ThunkMiddleware: running thunk");
                thunk
                    .call(&api.dispatcher(), &api.state_getter())
                    .map_err(StoreError::Thunk)?;
                Ok(Dispatchable::Thunk(thunk))
            }
            other => next.dispatch(other),
        }
    }
}

/// Thunk that dispatches `action` once `delay` has passed
///
/// The timer runs as a local tokio task, so the thunk has to be dispatched
/// from within a [`tokio::task::LocalSet`]. Anywhere else it fails and the
/// thunk middleware reports [`StoreError::Thunk`].
pub fn delayed<S, A>(delay: Duration, action: A) -> Thunk<S, A>
where
    S: 'static,
    A: Action,
{
    Thunk::new(move |dispatch, _get_state| {
        tokio::runtime::Handle::try_current()
            .context("Delayed actions need a tokio runtime")?;

        let dispatch = dispatch.clone();
        let action = action.clone();
        let timer = async move {
            tokio::time::sleep(delay).await;
            log::debug!("Delayed dispatch of '{}' after {:?}", action.kind(), delay);
            if let Err(e) = dispatch.dispatch(action) {
                log::error!("Delayed dispatch failed: {}", e);
            }
        };

        // spawn_local panics outside of a LocalSet
        let _timer = panic::catch_unwind(AssertUnwindSafe(|| tokio::task::spawn_local(timer)))
            .map_err(|_| anyhow!("Delayed actions must be dispatched within a tokio LocalSet"))?;
        Ok(())
    })
}
