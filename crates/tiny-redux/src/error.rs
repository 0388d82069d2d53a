use thiserror::Error;

/// Errors raised while dispatching through a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The raw dispatch only accepts action records
    #[error(
        "Actions must be records, got {found}. Add a middleware that handles this kind of value (e.g. ThunkMiddleware for thunks)"
    )]
    InvalidActionType { found: String },

    /// The reducer failed; the previous state is kept
    #[error("Reducer failed")]
    Reducer(#[source] anyhow::Error),

    /// A middleware tried to dispatch before the chain was composed
    #[error("Dispatching while constructing middleware is not allowed")]
    DispatchWhileConstructing,

    /// Every handle owning the store's dispatch has been dropped
    #[error("Store has been dropped")]
    StoreDropped,

    /// A thunk returned an error
    #[error("Thunk failed")]
    Thunk(#[source] anyhow::Error),
}
