//! Route definitions for the `/projects` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// POST   /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(project::create))
}
