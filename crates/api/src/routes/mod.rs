pub mod health;
pub mod project;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the record route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                                        list, create
/// /sessions/{id}                                   get
///
/// /projects                                        list, create
/// ```
///
/// There are no update or delete routes; records are immutable.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", session::router())
        .nest("/projects", project::router())
}
