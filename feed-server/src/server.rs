use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::limits::apply_limits;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state, &settings.static_dir);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(http_handlers::routes(state, static_dir))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::feed_service::FeedService;
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::presentation::AppState;

    fn app() -> Router {
        let service = FeedService::new(InMemoryPostRepository::new());
        build_router(AppState::new(Arc::new(service)), "static-dir-that-does-not-exist")
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header("content-type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).expect("request must build"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(app: &Router, title: &str) -> Value {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/posts",
            Some(json!({ "title": title, "content": "World", "date": "2024-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn create_then_like_twice() {
        let app = app();

        let created = create(&app, "Hello").await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["likeCount"], 0);
        assert_eq!(created["date"], "2024-01-01T00:00:00Z");
        assert_eq!(
            created["reactions"],
            json!({ "Anger": 0, "Cry": 0, "Laugh": 0, "Surprise": 0 })
        );

        let (status, body) = send(&app, Method::POST, "/api/posts/1/like", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likeCount"], 1);

        let (_, body) = send(&app, Method::POST, "/api/posts/1/like", None).await;
        assert_eq!(body["likeCount"], 2);

        let (status, body) = send(&app, Method::GET, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likeCount"], 2);
    }

    #[tokio::test]
    async fn unknown_post_is_404_everywhere() {
        let app = app();
        let entry = json!({ "author": "bob", "text": "spam" });

        let cases = [
            (Method::GET, "/api/posts/999", None),
            (Method::DELETE, "/api/posts/999", None),
            (Method::POST, "/api/posts/999/like", None),
            (Method::POST, "/api/posts/999/reports", Some(entry.clone())),
            (Method::POST, "/api/posts/999/comments", Some(entry)),
            (Method::GET, "/api/posts/999/comments", None),
            (Method::GET, "/api/posts/999/reports", None),
            (
                Method::POST,
                "/api/posts/999/reactions",
                Some(json!({ "emoji": "Risos" })),
            ),
            (
                Method::PUT,
                "/api/posts/999",
                Some(json!({ "title": "t", "content": "c" })),
            ),
        ];
        for (method, uri, body) in cases {
            let (status, _) = send(&app, method.clone(), uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        }

        let (status, body) = send(&app, Method::GET, "/api/posts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn react_requires_emoji_and_tolerates_unknown_ones() {
        let app = app();
        create(&app, "Hello").await;

        let (status, _) =
            send(&app, Method::POST, "/api/posts/1/reactions", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/posts/1/reactions",
            Some(json!({ "emoji": "Risos" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reactions"]["Laugh"], 1);
        assert_eq!(body["reactions"]["Cry"], 0);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/posts/1/reactions",
            Some(json!({ "emoji": "Heart" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reactions"]["Laugh"], 1);
    }

    #[tokio::test]
    async fn comments_and_reports_round_trip_in_order() {
        let app = app();
        create(&app, "Hello").await;

        for text in ["first", "second"] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/posts/1/comments",
                Some(json!({ "author": "ana", "text": text })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/posts/1/reports",
            Some(json!({ "author": "bob", "text": "spam" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, comments) = send(&app, Method::GET, "/api/posts/1/comments", None).await;
        assert_eq!(
            comments,
            json!([
                { "author": "ana", "text": "first" },
                { "author": "ana", "text": "second" }
            ])
        );

        let (_, reports) = send(&app, Method::GET, "/api/posts/1/reports", None).await;
        assert_eq!(reports, json!([{ "author": "bob", "text": "spam" }]));
    }

    #[tokio::test]
    async fn update_keeps_omitted_like_count_and_ids_are_not_reused() {
        let app = app();
        create(&app, "one").await;
        create(&app, "two").await;
        send(&app, Method::POST, "/api/posts/1/like", None).await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/posts/1",
            Some(json!({ "title": "edited", "content": "body", "date": "2024-02-02" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, post) = send(&app, Method::GET, "/api/posts/1", None).await;
        assert_eq!(post["title"], "edited");
        assert_eq!(post["likeCount"], 1);
        assert_eq!(post["date"], "2024-02-02T00:00:00Z");

        let (status, _) = send(&app, Method::DELETE, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/api/posts/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let third = create(&app, "three").await;
        assert_eq!(third["id"], 3);
    }

    #[tokio::test]
    async fn invalid_date_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/posts",
            Some(json!({ "title": "t", "content": "c", "date": "someday" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid date: 'someday'");
    }

    #[tokio::test]
    async fn health_landing_and_unknown_routes() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, _) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, Method::GET, "/no/such/page", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/posts/{id}/like"].is_object());
    }
}
