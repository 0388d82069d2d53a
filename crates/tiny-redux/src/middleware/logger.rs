//! LoggerMiddleware - logs every dispatch with the state around it

use super::{Middleware, MiddlewareApi};
use crate::action::{Action, Dispatchable};
use crate::dispatch::{Dispatch, DispatchResult};
use std::fmt::Debug;

/// LoggerMiddleware - logs previous state, action and next state
///
/// Put it first in the chain so it sees every action, including the ones
/// dispatched by later middleware.
pub struct LoggerMiddleware {
    level: log::Level,
    log_state: bool,
}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self {
            level: log::Level::Debug,
            log_state: true,
        }
    }

    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    /// Whether to log the state before and after each action
    pub fn with_state(mut self, log_state: bool) -> Self {
        self.log_state = log_state;
        self
    }
}

impl Default for LoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for LoggerMiddleware
where
    S: Clone + Debug + 'static,
    A: Action,
{
    fn handle(
        &self,
        api: &MiddlewareApi<S, A>,
        next: &Dispatch<S, A>,
        action: Dispatchable<S, A>,
    ) -> DispatchResult<S, A> {
        if !log::log_enabled!(self.level) {
            return next.dispatch(action);
        }

        if self.log_state {
            log::log!(self.level, "prev state: {:?}", api.get_state());
        }
        log::log!(self.level, "action: {:?}", action);

        let result = next.dispatch(action);

        match &result {
            Ok(_) if self.log_state => {
                log::log!(self.level, "next state: {:?}", api.get_state());
            }
            Ok(_) => {}
            Err(e) => log::log!(self.level, "dispatch failed: {}", e),
        }

        result
    }
}
