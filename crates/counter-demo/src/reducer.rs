use crate::actions::CounterAction;
use crate::state::AppState;

/// Root reducer starting from `initial_count`
pub fn counter_reducer(
    initial_count: i64,
) -> impl Fn(Option<AppState>, &CounterAction) -> AppState + 'static {
    move |state, action| reduce(state.unwrap_or_else(|| AppState::new(initial_count)), action)
}

/// Reducer - pure function that produces new state from current state + action
pub fn reduce(mut state: AppState, action: &CounterAction) -> AppState {
    match action {
        CounterAction::Increment => state.count += 1,
        CounterAction::Decrement => state.count -= 1,
        CounterAction::Add(amount) => state.count += amount,
        CounterAction::Reset => state.count = state.initial_count,
        CounterAction::Quit => {
            log::debug!("Quit requested at count {}", state.count);
            state.running = false;
        }
        CounterAction::Init => {
            // Unhandled actions - no state change
        }
    }

    state
}
