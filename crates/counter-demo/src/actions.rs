use serde_json::Value;
use tiny_redux::{Action, ActionCreators, INIT_KIND};

/// Counter demo actions
#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    /// Store initialization
    Init,
    Increment,
    Decrement,
    Add(i64),
    Reset,
    Quit,
}

impl Action for CounterAction {
    fn kind(&self) -> &str {
        match self {
            CounterAction::Init => INIT_KIND,
            CounterAction::Increment => "increment",
            CounterAction::Decrement => "decrement",
            CounterAction::Add(_) => "add",
            CounterAction::Reset => "reset",
            CounterAction::Quit => "quit",
        }
    }

    fn init() -> Self {
        CounterAction::Init
    }
}

/// Action creators exposed to the counter panel
///
/// `add` takes the amount as first argument and falls back to `step`.
pub fn creators(step: i64) -> ActionCreators<crate::state::AppState, CounterAction> {
    ActionCreators::new()
        .with("add", move |args: &[Value]| {
            CounterAction::Add(args.first().and_then(Value::as_i64).unwrap_or(step))
        })
        .with("reset", |_args: &[Value]| CounterAction::Reset)
}
