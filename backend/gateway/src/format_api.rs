//! `POST /format-text`: LLM cleanup of OCR text.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use pagecast_logging::{EventLogger, ServiceEvent};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub formatted_text: String,
}

/// Never fails once the input is valid: a formatter error, or no formatter at
/// all, returns the input unchanged.
#[instrument(skip_all)]
pub async fn format_text(
    State(state): State<GatewayState>,
    body: Result<Json<FormatRequest>, JsonRejection>,
) -> Result<Json<FormatResponse>, ApiError> {
    let text = body
        .ok()
        .and_then(|Json(req)| req.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No text provided"))?;

    let (formatted_text, fell_back) = match &state.formatter {
        Some(formatter) => match formatter.format_text(&text).await {
            Ok(formatted) => (formatted, false),
            Err(e) => {
                warn!(error = %e, "Formatting failed; returning original text");
                (text.clone(), true)
            }
        },
        None => (text.clone(), true),
    };

    EventLogger::log_event(ServiceEvent::Formatted {
        chars_in: text.len(),
        chars_out: formatted_text.len(),
        fell_back,
    });
    Ok(Json(FormatResponse { formatted_text }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use pagecast_tts::mock::MockSpeechEngine;
    use pagecast_understanding::TextFormatter;
    use pagecast_understanding::mock::{MockOcr, MockProvider};
    use serde_json::json;

    use crate::server::build_router;
    use crate::server::test_support::{json_request, send, state};

    fn router(formatter: Option<TextFormatter>) -> axum::Router {
        build_router(
            state(
                Arc::new(MockOcr::empty()),
                formatter,
                Arc::new(MockSpeechEngine::silent()),
            ),
            1024,
        )
    }

    #[tokio::test]
    async fn returns_formatted_text() {
        let provider = MockProvider::new("mock").with_response("The quick brown fox.\n");
        let fmt = TextFormatter::new(Arc::new(provider));
        let (status, json) = send(
            router(Some(fmt)),
            json_request("/format-text", json!({"text": "teh quick brwn fox"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["formatted_text"], "The quick brown fox.");
    }

    #[tokio::test]
    async fn provider_failure_returns_original() {
        let fmt = TextFormatter::new(Arc::new(MockProvider::failing("mock", "503 overloaded")));
        let (status, json) = send(
            router(Some(fmt)),
            json_request("/format-text", json!({"text": "raw page text"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["formatted_text"], "raw page text");
    }

    #[tokio::test]
    async fn no_formatter_echoes_input() {
        let (status, json) = send(
            router(None),
            json_request("/format-text", json!({"text": "as is"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["formatted_text"], "as is");
    }

    #[tokio::test]
    async fn blank_text_is_400() {
        let (status, json) = send(
            router(None),
            json_request("/format-text", json!({"text": "   \n"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No text provided");
    }

    #[tokio::test]
    async fn missing_text_is_400() {
        let (status, json) = send(router(None), json_request("/format-text", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No text provided");
    }
}
