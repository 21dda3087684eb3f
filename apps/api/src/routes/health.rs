use axum::Json;
use serde_json::{json, Value};

/// GET /api
/// Liveness message; needs no token.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "message": "Eduntra AI API v1.0",
        "status": "running"
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::TestApp;

    #[tokio::test]
    async fn test_liveness_without_token() {
        let app = TestApp::new();
        for uri in ["/api", "/api/"] {
            let (status, body) = app.get(uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "running");
            assert_eq!(body["message"], "Eduntra AI API v1.0");
        }
    }
}
