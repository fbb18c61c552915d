//! HTTP host for the conversion endpoint.
//!
//! - GET|POST /api/purchase-order/fixed-width - body is the HTML order
//! - GET /health - liveness probe

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use pofix_core::{OrderProcessor, PofixConfig, ProcessError};

/// Path of the conversion endpoint.
pub const ORDER_ROUTE: &str = "/api/purchase-order/fixed-width";

#[derive(Clone)]
struct AppState {
    processor: Arc<OrderProcessor>,
}

/// Build the application router.
pub fn router(config: &PofixConfig) -> Router {
    let state = AppState {
        processor: Arc::new(OrderProcessor::from_config(config)),
    };

    Router::new()
        .route(ORDER_ROUTE, get(convert_order).post(convert_order))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn convert_order(State(state): State<AppState>, body: Bytes) -> Result<String, ApiError> {
    info!("Purchase order conversion request ({} bytes)", body.len());

    let html = String::from_utf8_lossy(&body);
    let output = state.processor.process(&html)?;
    Ok(output)
}

async fn health() -> &'static str {
    "ok"
}

/// Maps processing failures onto HTTP statuses.
struct ApiError(ProcessError);

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ProcessError::EmptyBody => StatusCode::BAD_REQUEST,
            ProcessError::Malformed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        warn!("Rejected request with {}: {}", status, self.0);
        (status, self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    const ORDER_HTML: &str = "<table>\
        <tr><th>Customer</th><th>PO</th><th>Date</th><th>Promised</th><th>UNH</th></tr>\
        <tr><td>ACME</td><td>PO123</td><td>01-15-2024</td><td>01-20-2024</td><td>UNH1</td></tr>\
        </table><table>\
        <tr><th>Code</th><th>Qty</th><th>Price</th><th>Description</th></tr>\
        <tr><td>SKU1</td><td>5</td><td>12.5</td><td>Widget</td></tr>\
        </table>";

    async fn send(app: Router, method: &str, body: impl Into<Body>) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(ORDER_ROUTE)
                    .header(header::CONTENT_TYPE, "text/html")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn post_converts_order() {
        let app = router(&PofixConfig::default());
        let (status, body) = send(app, "POST", ORDER_HTML).await;

        assert_eq!(status, StatusCode::OK);
        let records: Vec<&str> = body.split('\n').collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], "UNH  UNH1  ");
        assert_eq!(records[2], "OLD  0001 SKU1            0000000005.0012.500");
    }

    #[tokio::test]
    async fn get_with_body_is_accepted() {
        let app = router(&PofixConfig::default());
        let (status, _) = send(app, "GET", ORDER_HTML).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_body_is_bad_request() {
        let app = router(&PofixConfig::default());
        let (status, body) = send(app, "POST", Body::empty()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request body.");
    }

    #[tokio::test]
    async fn single_table_is_unprocessable() {
        let app = router(&PofixConfig::default());
        let (status, body) = send(app, "POST", "<table><tr><td>x</td></tr></table>").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("expected at least 2 tables, found 1"));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let mut config = PofixConfig::default();
        config.server.max_body_bytes = 16;

        let app = router(&config);
        let (status, _) = send(app, "POST", ORDER_HTML).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn health_check() {
        let app = router(&PofixConfig::default());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
