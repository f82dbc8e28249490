//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::docs::swagger_ui;
use super::handlers::{generate, health, metrics_export, track_metrics, uppercase, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let cors_permissive = state.cors_permissive;

    let router = Router::new()
        // Text endpoints
        .route("/uppercase", get(uppercase))
        .route("/generate", get(generate))
        // Documentation
        .merge(swagger_ui())
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_export))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = get_json(create_router(AppState::new()), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn uppercase_endpoint_uppercases_text() {
        let (status, body) =
            get_json(create_router(AppState::new()), "/uppercase?text=hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": "HELLO" }));
    }

    #[tokio::test]
    async fn uppercase_endpoint_rejects_missing_text() {
        let (status, body) = get_json(create_router(AppState::new()), "/uppercase").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["parameter"], "text");
    }

    #[tokio::test]
    async fn generate_endpoint_applies_capitalization() {
        let (status, body) = get_json(
            create_router(AppState::new()),
            "/generate?message=Hi&duplication_factor=2&capitalization=UPPER",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "generated_text": "HIHI" }));
    }

    #[tokio::test]
    async fn generate_endpoint_enforces_output_limit() {
        let state = AppState {
            max_generated_bytes: 4,
            ..AppState::new()
        };
        let (status, body) = get_json(
            create_router(state),
            "/generate?message=abc&duplication_factor=2",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["parameter"], Value::Null);
        assert_eq!(body["error"], "generated text would be 6 bytes, limit is 4");
    }

    #[tokio::test]
    async fn metrics_endpoint_unavailable_without_recorder() {
        let response = create_router(AppState::new())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_matched_route_labels() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            prometheus: Some(recorder.handle()),
            ..AppState::new()
        };
        let _guard = metrics::set_default_local_recorder(&recorder);
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/uppercase?text=a").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("http_requests_total"));
        assert!(body.contains("endpoint=\"/uppercase\""));
        assert!(body.contains("status=\"200\""));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get_json(create_router(AppState::new()), "/apispec_1.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/uppercase"]["get"].is_object());
        assert!(body["paths"]["/generate"]["get"].is_object());
    }

    #[tokio::test]
    async fn cors_headers_present_when_enabled() {
        let state = AppState {
            cors_permissive: true,
            ..AppState::new()
        };
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/uppercase?text=a")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
