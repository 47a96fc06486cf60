//! `GET /health`: liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// Always `{"status":"ok"}`; does not touch any engine.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pagecast_tts::mock::MockSpeechEngine;
    use pagecast_understanding::mock::MockOcr;

    use crate::server::build_router;
    use crate::server::test_support::{send, state};

    #[tokio::test]
    async fn reports_ok_without_engines() {
        let router = build_router(
            state(
                Arc::new(MockOcr::failing("offline")),
                None,
                Arc::new(MockSpeechEngine::failing("offline")),
            ),
            1024,
        );
        let req = Request::get("/health").body(Body::empty()).unwrap();
        let (status, json) = send(router, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
