use std::sync::Arc;

use focusflow_db::store::RecordStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Session and project collections.
    pub store: Arc<dyn RecordStore>,
}
