pub mod bookmarks;
pub mod content;
pub mod health;
pub mod notes;
pub mod progress;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Maximum request body size: 1 MiB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared validation message for class ids, used by every route that
/// takes one (path or body).
pub(crate) const CLASS_ID_RANGE_MSG: &str = "classId must be an integer between 1 and 24.";

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/health", health::router())
        .merge(content::router())
        .merge(progress::router())
        .merge(notes::router())
        .merge(bookmarks::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    let router = Router::new().nest("/api", api_routes);

    // The bundle is multi-page, not an SPA: each page route serves its
    // own HTML file, everything else comes from the asset tree or 404s
    let router = if state.config().serve_static {
        let dir = state.config().static_dir.clone();
        router
            .route_service("/", ServeFile::new(format!("{dir}/index.html")))
            .route_service("/topic", ServeFile::new(format!("{dir}/topic.html")))
            .route_service(
                "/modules/system-design",
                ServeFile::new(format!("{dir}/modules/system-design.html")),
            )
            .route_service(
                "/modules/lld",
                ServeFile::new(format!("{dir}/modules/lld.html")),
            )
            .fallback_service(ServeDir::new(&dir))
    } else {
        router
    };

    router.with_state(state)
}
