pub mod contact;
pub mod projects;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

/// Resource routes, nested under `/api` by [`crate::build_app`].
pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Contact submissions
        .route("/contact", get(contact::list).post(contact::create))
        .route("/contact/{id}", get(contact::get).delete(contact::delete))
        // Projects
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
}
