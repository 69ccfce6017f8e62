//! HTTP router.

use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{api, auth, auth::AppState, pages};

/// Builds the application router.
pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let api: Router<Arc<AppState>> = Router::new()
        .route("/namespaces", get(api::list_namespaces))
        .route("/namespaces/{namespace}", get(api::list_deployments))
        .route(
            "/namespaces/{namespace}/deployments/{deployment}/restart",
            post(api::restart_deployment),
        );

    Router::new()
        .route("/", get(pages::home))
        // Auth routes
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
