//! HTTP route definitions.

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers::{self, AppState};
use super::middleware::{access_log, cors_layer, json_content_type, track_requests};

/// Create the service router with the full middleware chain, outermost to
/// innermost: CORS, JSON content-type, access log, metrics finalizer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/create", post(handlers::create))
        .route("/list", get(handlers::list))
        .route("/update/", put(handlers::update))
        .route("/delete/", delete(handlers::remove))
        .route("/count", get(handlers::count))
        .layer(from_fn_with_state(state.clone(), track_requests))
        .layer(from_fn(access_log))
        .layer(json_content_type())
        .layer(cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::metrics::Metrics;
    use crate::storage::SqliteStore;

    async fn test_state() -> AppState {
        let store = SqliteStore::in_memory().await.unwrap();
        AppState::new(Arc::new(store), Duration::from_secs(5), Metrics::new())
    }

    #[tokio::test]
    async fn list_responds_with_json_content_type() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(Request::builder().uri("/list").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn cors_headers_present_for_cross_origin_requests() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/count")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn preflight_is_answered() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/create")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nothing-here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
