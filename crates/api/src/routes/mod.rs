pub mod health;
pub mod project;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// GET  /           health check
/// POST /projects   create project (multipart)
/// POST /projects/  307 to /projects
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/projects", project::router())
        .route("/projects/", post(handlers::project::redirect_to_canonical))
}
