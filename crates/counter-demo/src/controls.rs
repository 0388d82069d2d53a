//! Key bindings of the counter demo
//!
//! | key | effect |
//! |-----|--------|
//! | `+` | dispatch `Increment` |
//! | `-` | dispatch a thunk that dispatches `Decrement` |
//! | `d` | decrement after the configured delay |
//! | `a` | bound `add` creator with the configured step |
//! | `r` | bound `reset` creator |
//! | `q` | quit |

use crate::actions::{self, CounterAction};
use crate::state::AppState;
use ratatui::crossterm::event::KeyCode;
use serde_json::json;
use std::time::Duration;
use tiny_redux::{
    bind_action_creators, delayed, BoundActionCreators, Dispatch, Dispatchable, StoreError, Thunk,
};

/// Translates key presses into dispatches
pub struct Controls {
    dispatch: Dispatch<AppState, CounterAction>,
    bound: BoundActionCreators<AppState, CounterAction>,
    step: i64,
    delay: Duration,
}

impl Controls {
    pub fn new(dispatch: Dispatch<AppState, CounterAction>, step: i64, delay: Duration) -> Self {
        let bound = bind_action_creators(&actions::creators(step), &dispatch);
        Self {
            dispatch,
            bound,
            step,
            delay,
        }
    }

    /// Handle a key press; unbound keys return `Ok(None)`
    ///
    /// `d` spawns a local task and must run inside a `LocalSet`.
    pub fn handle_key(
        &self,
        code: KeyCode,
    ) -> Result<Option<Dispatchable<AppState, CounterAction>>, StoreError> {
        let result = match code {
            KeyCode::Char('+') => self.dispatch.dispatch(CounterAction::Increment),
            KeyCode::Char('-') => self.dispatch.dispatch(decrement_thunk()),
            KeyCode::Char('d') => self
                .dispatch
                .dispatch(delayed(self.delay, CounterAction::Decrement)),
            KeyCode::Char('a') => return self.bound.call("add", &[json!(self.step)]).transpose(),
            KeyCode::Char('r') => return self.bound.call("reset", &[]).transpose(),
            KeyCode::Char('q') | KeyCode::Esc => self.dispatch.dispatch(CounterAction::Quit),
            _ => return Ok(None),
        };

        result.map(Some)
    }
}

/// Decrement through a thunk, the way a deferred handler would
fn decrement_thunk() -> Thunk<AppState, CounterAction> {
    Thunk::new(|dispatch, _get_state| {
        dispatch.dispatch(CounterAction::Decrement)?;
        Ok(())
    })
}
