use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::services::ServeDir;

use super::{AppState, routes};

pub(crate) fn routes(state: AppState, static_dir: &str) -> Router {
    let static_files = ServeDir::new(static_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(landing_handler))
        .route("/healthz", get(health_handler))
        .merge(routes::router())
        .fallback_service(static_files)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn landing_handler() -> Html<&'static str> {
    Html(
        "<h1>Social feed</h1>\
         <p>Use <code>/api/posts</code> to work with posts, \
         or open <a href=\"/swagger-ui\">/swagger-ui</a>.</p>",
    )
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
