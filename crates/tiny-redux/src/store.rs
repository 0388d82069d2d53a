use crate::action::{Action, Dispatchable, INIT_KIND};
use crate::dispatch::{Dispatch, DispatchResult, GetState};
use crate::error::StoreError;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

/// Reducer - pure function that produces new state from current state + action
///
/// `state` is `None` only for the initialization action dispatched when the
/// store is created; the reducer returns its default state then.
pub trait Reducer<S, A>: 'static {
    fn reduce(&self, state: Option<S>, action: &A) -> anyhow::Result<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<S>, &A) -> S + 'static,
{
    fn reduce(&self, state: Option<S>, action: &A) -> anyhow::Result<S> {
        Ok(self(state, action))
    }
}

/// Reducer that may fail, see [`fallible`]
pub struct Fallible<F>(F);

/// Wrap a reducer returning `anyhow::Result`
///
/// A failing reducer leaves the store state untouched and the error is
/// returned from `dispatch` as [`StoreError::Reducer`].
pub fn fallible<S, A, F>(reducer: F) -> Fallible<F>
where
    F: Fn(Option<S>, &A) -> anyhow::Result<S> + 'static,
{
    Fallible(reducer)
}

impl<S, A, F> Reducer<S, A> for Fallible<F>
where
    F: Fn(Option<S>, &A) -> anyhow::Result<S> + 'static,
{
    fn reduce(&self, state: Option<S>, action: &A) -> anyhow::Result<S> {
        (self.0)(state, action)
    }
}

pub type BoxedReducer<S, A> = Box<dyn Reducer<S, A>>;

/// Constructor handed to enhancers; builds an uninstrumented store
pub type StoreCreator<S, A> = fn(BoxedReducer<S, A>) -> Result<Store<S, A>, StoreError>;

/// Store enhancer - takes over store construction
///
/// An enhancer receives the raw store constructor and the reducer, and
/// returns a store with the same API. It may swap the public dispatch
/// (see [`Store::with_dispatch`]) while state and subscriptions stay with
/// the raw store.
pub trait Enhancer<S, A> {
    fn enhance(
        self,
        create: StoreCreator<S, A>,
        reducer: BoxedReducer<S, A>,
    ) -> Result<Store<S, A>, StoreError>;
}

impl<S, A, F> Enhancer<S, A> for F
where
    F: FnOnce(StoreCreator<S, A>, BoxedReducer<S, A>) -> Result<Store<S, A>, StoreError>,
{
    fn enhance(
        self,
        create: StoreCreator<S, A>,
        reducer: BoxedReducer<S, A>,
    ) -> Result<Store<S, A>, StoreError> {
        self(create, reducer)
    }
}

type Listener = Rc<dyn Fn()>;

struct StoreCore<S, A> {
    state: RefCell<S>,
    reducer: BoxedReducer<S, A>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
}

impl<S: Clone + 'static, A: Action> StoreCore<S, A> {
    fn dispatch(&self, action: Dispatchable<S, A>) -> DispatchResult<S, A> {
        let action = match action {
            Dispatchable::Action(action) => action,
            other => {
                return Err(StoreError::InvalidActionType {
                    found: other.describe(),
                })
            }
        };

        log::debug!("Dispatching action '{}'", action.kind());

        // No borrow is held while the reducer runs
        let current = self.state.borrow().clone();
        let next = self
            .reducer
            .reduce(Some(current), &action)
            .map_err(StoreError::Reducer)?;
        *self.state.borrow_mut() = next;

        self.notify();
        Ok(Dispatchable::Action(action))
    }

    fn notify(&self) {
        // Iterate a snapshot: subscribe/unsubscribe during notification only
        // affects the next dispatch
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| listener())) {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::error!("Store listener panicked: {}", message);
            }
        }
    }

    fn remove_listener(&self, id: u64) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(listener_id, _)| *listener_id == id) {
            listeners.remove(index);
            log::debug!("Listener {} unsubscribed", id);
        }
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Removes exactly the subscription it was created for. Calling
/// [`Unsubscribe::unsubscribe`] again is a no-op. Dropping the handle does
/// not unsubscribe.
pub struct Unsubscribe {
    remove: Cell<Option<Box<dyn FnOnce()>>>,
}

impl Unsubscribe {
    pub fn unsubscribe(&self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }

    /// Whether this subscription is still registered with its store
    pub fn is_active(&self) -> bool {
        let remove = self.remove.take();
        let active = remove.is_some();
        self.remove.set(remove);
        active
    }
}

/// Store - holds application state and manages the Redux loop
///
/// Cloning a store yields another handle to the same state and listeners.
pub struct Store<S, A> {
    core: Rc<StoreCore<S, A>>,
    dispatch: Dispatch<S, A>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Create a store around `reducer`
///
/// The reducer is called once with the initialization action to produce the
/// initial state.
pub fn create_store<S, A, R>(reducer: R) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
    R: Reducer<S, A>,
{
    create_raw_store(Box::new(reducer))
}

/// Create a store and let `enhancer` take over its construction
pub fn create_store_with<S, A, R, E>(reducer: R, enhancer: E) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
    R: Reducer<S, A>,
    E: Enhancer<S, A>,
{
    enhancer.enhance(create_raw_store::<S, A>, Box::new(reducer))
}

fn create_raw_store<S, A>(reducer: BoxedReducer<S, A>) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action,
{
    let initial = reducer
        .reduce(None, &A::init())
        .map_err(StoreError::Reducer)?;
    log::debug!("Store initialized via {}", INIT_KIND);

    let core = Rc::new(StoreCore {
        state: RefCell::new(initial),
        reducer,
        listeners: RefCell::new(Vec::new()),
        next_listener_id: Cell::new(0),
    });

    let raw = Rc::clone(&core);
    let dispatch = Dispatch::new(move |action| raw.dispatch(action));

    Ok(Store { core, dispatch })
}

impl<S: Clone + 'static, A: Action> Store<S, A> {
    /// Dispatch through the public dispatch (middleware included)
    pub fn dispatch(&self, action: impl Into<Dispatchable<S, A>>) -> DispatchResult<S, A> {
        self.dispatch.dispatch(action)
    }

    /// Get the public dispatch handle
    pub fn dispatcher(&self) -> Dispatch<S, A> {
        self.dispatch.clone()
    }

    /// Get the current state
    pub fn get_state(&self) -> S {
        self.core.state.borrow().clone()
    }

    /// Get a reader for the current state
    pub fn state_getter(&self) -> GetState<S> {
        let core = Rc::clone(&self.core);
        GetState::new(move || core.state.borrow().clone())
    }

    /// Register a listener, called after every successful dispatch
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn() + 'static,
    {
        let id = self.core.next_listener_id.get();
        self.core.next_listener_id.set(id + 1);
        let listener: Listener = Rc::new(listener);
        self.core.listeners.borrow_mut().push((id, listener));
        log::debug!("Listener {} subscribed", id);

        let core: Weak<StoreCore<S, A>> = Rc::downgrade(&self.core);
        let remove: Box<dyn FnOnce()> = Box::new(move || {
            if let Some(core) = core.upgrade() {
                core.remove_listener(id);
            }
        });
        Unsubscribe {
            remove: Cell::new(Some(remove)),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }

    /// The same store with its public dispatch replaced
    ///
    /// State and listeners are shared with `self`.
    pub fn with_dispatch(&self, dispatch: Dispatch<S, A>) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch,
        }
    }

    /// Whether both handles refer to the same store and dispatch
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.dispatch.ptr_eq(&other.dispatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::{counter, CounterAction};
    use serde_json::json;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    /// Records debug messages of the current test thread
    struct ThreadLogger;

    impl log::Log for ThreadLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Debug
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                RECORDS.with(|records| records.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            if log::set_logger(&ThreadLogger).is_ok() {
                log::set_max_level(log::LevelFilter::Debug);
            }
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    fn counter_store() -> Store<i64, CounterAction> {
        create_store(counter).unwrap()
    }

    #[test]
    fn test_initial_state_from_init_action() {
        let store = counter_store();
        assert_eq!(store.get_state(), 0);
    }

    #[test]
    fn test_increment_twice_decrement_once() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment).unwrap();
        store.dispatch(CounterAction::Increment).unwrap();
        store.dispatch(CounterAction::Decrement).unwrap();
        assert_eq!(store.get_state(), 1);
    }

    #[test]
    fn test_state_is_fold_of_actions() {
        let actions = vec![
            CounterAction::Add { amount: 5 },
            CounterAction::Decrement,
            CounterAction::Add { amount: -10 },
            CounterAction::Increment,
        ];
        let store = counter_store();
        for action in &actions {
            store.dispatch(action.clone()).unwrap();
        }

        let expected = actions
            .iter()
            .fold(counter(None, &CounterAction::Init), |state, action| {
                counter(Some(state), action)
            });
        assert_eq!(store.get_state(), expected);
    }

    #[test]
    fn test_dispatch_returns_action() {
        let store = counter_store();
        let returned = store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(returned.into_action(), Some(CounterAction::Increment));
    }

    #[test]
    fn test_non_record_actions_rejected() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment).unwrap();

        for value in [json!(42), json!(null), json!({"type": "increment"})] {
            let result = store.dispatch(Dispatchable::Raw(value));
            assert!(matches!(
                result,
                Err(StoreError::InvalidActionType { .. })
            ));
        }

        let thunk = crate::Thunk::new(|_, _| Ok(()));
        assert!(matches!(
            store.dispatch(thunk),
            Err(StoreError::InvalidActionType { .. })
        ));
        assert_eq!(store.get_state(), 1);
    }

    #[test]
    fn test_invalid_action_does_not_notify() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let counter_calls = Rc::clone(&calls);
        let _sub = store.subscribe(move || counter_calls.set(counter_calls.get() + 1));

        let _ = store.dispatch(Dispatchable::Raw(json!(42)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let counter_calls = Rc::clone(&calls);
        let sub = store.subscribe(move || counter_calls.set(counter_calls.get() + 1));

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);

        sub.unsubscribe();
        assert!(!sub.is_active());
        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_double_unsubscribe_is_noop() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let first = store.subscribe(|| {});
        let counter_calls = Rc::clone(&calls);
        let _second = store.subscribe(move || counter_calls.set(counter_calls.get() + 1));

        first.unsubscribe();
        first.unsubscribe();
        assert_eq!(store.listener_count(), 1);

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let store = counter_store();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Vec::new();
        for name in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            subs.push(store.subscribe(move || order.borrow_mut().push(name)));
        }

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_listener_added_during_notify_runs_next_time() {
        let store = counter_store();
        let late_calls = Rc::new(Cell::new(0));
        let added = Rc::new(RefCell::new(Vec::new()));

        let inner_store = store.clone();
        let inner_calls = Rc::clone(&late_calls);
        let inner_added = Rc::clone(&added);
        let _sub = store.subscribe(move || {
            if inner_added.borrow().is_empty() {
                let calls = Rc::clone(&inner_calls);
                let sub = inner_store.subscribe(move || calls.set(calls.get() + 1));
                inner_added.borrow_mut().push(sub);
            }
        });

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(late_calls.get(), 0);

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_listener_removed_during_notify_still_runs_this_pass() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Unsubscribe>>> = Rc::new(RefCell::new(None));

        let to_remove = Rc::clone(&victim);
        let _remover = store.subscribe(move || {
            if let Some(sub) = to_remove.borrow().as_ref() {
                sub.unsubscribe();
            }
        });
        let counter_calls = Rc::clone(&calls);
        *victim.borrow_mut() =
            Some(store.subscribe(move || counter_calls.set(counter_calls.get() + 1)));

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listener_may_dispatch_reentrantly() {
        let store = counter_store();
        let dispatch = store.dispatcher();
        let getter = store.state_getter();
        let _sub = store.subscribe(move || {
            if getter.get() == 1 {
                dispatch.dispatch(CounterAction::Add { amount: 10 }).unwrap();
            }
        });

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(store.get_state(), 11);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let _bad = store.subscribe(|| panic!("listener failure"));
        let counter_calls = Rc::clone(&calls);
        let _good = store.subscribe(move || counter_calls.set(counter_calls.get() + 1));

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(store.get_state(), 1);
    }

    #[test]
    fn test_reducer_error_keeps_state() {
        let reducer = fallible(|state: Option<i64>, action: &CounterAction| {
            let state = state.unwrap_or(0);
            match action {
                CounterAction::Decrement if state == 0 => anyhow::bail!("counter below zero"),
                _ => Ok(counter(Some(state), action)),
            }
        });
        let store = create_store(reducer).unwrap();
        store.dispatch(CounterAction::Increment).unwrap();
        store.dispatch(CounterAction::Decrement).unwrap();

        let result = store.dispatch(CounterAction::Decrement);
        assert!(matches!(result, Err(StoreError::Reducer(_))));
        assert_eq!(store.get_state(), 0);
    }

    #[test]
    fn test_failing_init_fails_construction() {
        let reducer = fallible(|_: Option<i64>, _: &CounterAction| -> anyhow::Result<i64> {
            anyhow::bail!("no initial state")
        });
        assert!(matches!(
            create_store(reducer),
            Err(StoreError::Reducer(_))
        ));
    }

    #[test]
    fn test_enhancer_replaces_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let enhancer = move |create: StoreCreator<i64, CounterAction>,
                             reducer: BoxedReducer<i64, CounterAction>|
              -> Result<Store<i64, CounterAction>, StoreError> {
            let store = create(reducer)?;
            let raw = store.dispatcher();
            let recorder = Rc::clone(&recorder);
            Ok(store.with_dispatch(Dispatch::new(move |action| {
                recorder.borrow_mut().push(action.describe());
                raw.dispatch(action)
            })))
        };

        let store = create_store_with(counter, enhancer).unwrap();
        store.dispatch(CounterAction::Increment).unwrap();

        assert_eq!(store.get_state(), 1);
        assert_eq!(*seen.borrow(), vec!["action 'increment'"]);
    }

    #[test]
    fn test_get_state_does_not_notify() {
        let store = counter_store();
        let calls = Rc::new(Cell::new(0));
        let counter_calls = Rc::clone(&calls);
        let _sub = store.subscribe(move || counter_calls.set(counter_calls.get() + 1));

        let _ = store.get_state();
        let _ = store.state_getter().get();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_ptr_eq() {
        let store = counter_store();
        let other = counter_store();
        assert!(store.ptr_eq(&store.clone()));
        assert!(!store.ptr_eq(&other));
    }

    #[test]
    fn test_dispatch_logs_action_kind() {
        capture_logs();
        let store = counter_store();
        store.dispatch(CounterAction::Increment).unwrap();

        let records = RECORDS.with(|records| records.borrow().clone());
        assert!(records.contains(&"Dispatching action 'increment'".to_string()));
    }
}
