/// Counter demo state
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub count: i64,
    /// Value `Reset` returns to
    pub initial_count: i64,
    pub running: bool,
}

impl AppState {
    pub fn new(initial_count: i64) -> Self {
        Self {
            count: initial_count,
            initial_count,
            running: true,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(0)
    }
}
