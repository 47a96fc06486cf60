//! `POST /extract`: multipart image upload → text, blocks, optional image echo.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use pagecast_core::ExtractionResult;
use pagecast_logging::{EventLogger, ServiceEvent};
use pagecast_understanding::extract_document;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::server::GatewayState;

/// The `file` part of an upload.
struct Upload {
    filename: String,
    data: Bytes,
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A part without a filename is a plain form value, not a file.
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(ApiError::bad_request("No file provided"));
        };
        if filename.is_empty() {
            return Err(ApiError::bad_request("No file selected"));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        if data.is_empty() {
            return Err(ApiError::bad_request("Uploaded file is empty"));
        }
        return Ok(Upload { filename, data });
    }
    Err(ApiError::bad_request("No file provided"))
}

#[instrument(skip_all)]
pub async fn extract(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractionResult>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::bad_request("No file provided"))?;
    let upload = read_file_field(&mut multipart).await?;
    info!(filename = %upload.filename, bytes = upload.data.len(), "Received upload");

    let result = extract_document(
        state.ocr.as_ref(),
        state.formatter.as_ref(),
        &upload.data,
        state.options,
    )
    .await
    .map_err(|e| ApiError::from_service("/extract", e))?;

    EventLogger::log_event(ServiceEvent::Extracted {
        engine: state.ocr.name().to_string(),
        blocks: result.blocks.len(),
        chars: result.full_text.len(),
        image_bytes: upload.data.len(),
    });
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use base64::{Engine, engine::general_purpose::STANDARD};
    use pagecast_tts::mock::MockSpeechEngine;
    use pagecast_understanding::mock::{MockOcr, block, document, malformed_block};

    use crate::server::build_router;
    use crate::server::test_support::{multipart_request, send, state};

    fn router(ocr: MockOcr) -> axum::Router {
        build_router(
            state(Arc::new(ocr), None, Arc::new(MockSpeechEngine::silent())),
            1024 * 1024,
        )
    }

    #[tokio::test]
    async fn returns_blocks_in_order_with_image() {
        let doc = document(
            "Title\nBody text",
            vec![block("Title", 0), block("Body text", 40)],
        );
        let (status, json) =
            send(router(MockOcr::with_document(doc)), multipart_request("file", Some("page.png"), b"PNGDATA")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["full_text"], "Title\nBody text");
        let blocks = json["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["text"], "Title");
        assert_eq!(blocks[1]["text"], "Body text");
        assert_eq!(blocks[1]["vertices"].as_array().unwrap().len(), 4);
        assert_eq!(blocks[1]["vertices"][2], serde_json::json!({"x": 140, "y": 60}));
        assert_eq!(json["image_base64"], STANDARD.encode(b"PNGDATA"));
    }

    #[tokio::test]
    async fn malformed_block_is_dropped() {
        let doc = document("a b", vec![block("a", 0), malformed_block("b")]);
        let (status, json) =
            send(router(MockOcr::with_document(doc)), multipart_request("file", Some("p.jpg"), b"x")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["blocks"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_field_is_400() {
        let (status, json) =
            send(router(MockOcr::empty()), multipart_request("image", Some("p.png"), b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No file provided");
    }

    #[tokio::test]
    async fn empty_filename_is_400() {
        let (status, json) =
            send(router(MockOcr::empty()), multipart_request("file", Some(""), b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No file selected");
    }

    #[tokio::test]
    async fn empty_file_is_400() {
        let ocr = Arc::new(MockOcr::empty());
        let router = build_router(
            state(ocr.clone(), None, Arc::new(MockSpeechEngine::silent())),
            1024,
        );
        let (status, json) = send(router, multipart_request("file", Some("p.png"), b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Uploaded file is empty");
        assert_eq!(ocr.calls(), 0);
    }

    #[tokio::test]
    async fn non_multipart_body_is_400() {
        let req = crate::server::test_support::json_request("/extract", serde_json::json!({}));
        let (status, json) = send(router(MockOcr::empty()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No file provided");
    }

    #[tokio::test]
    async fn engine_failure_is_500_with_message() {
        let (status, json) = send(
            router(MockOcr::failing("PERMISSION_DENIED: billing disabled")),
            multipart_request("file", Some("p.png"), b"x"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json["error"],
            "Error extracting text: PERMISSION_DENIED: billing disabled"
        );
        assert!(json.get("blocks").is_none());
    }
}
