//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use pagecast_core::OcrEngine;
use pagecast_tts::LazySpeechEngine;
use pagecast_understanding::{ExtractOptions, TextFormatter};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use crate::{extract, format_api, health_api, tts_api};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub ocr: Arc<dyn OcrEngine>,
    /// `None` when no LLM is configured; formatting then echoes its input.
    pub formatter: Option<TextFormatter>,
    /// Built on the first `/tts` request.
    pub speech: Arc<LazySpeechEngine>,
    pub options: ExtractOptions,
    pub default_voice: String,
}

/// Build the router with all API routes.
pub fn build_router(state: GatewayState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/extract", post(extract::extract))
        .route("/format-text", post(format_api::format_text))
        .route("/tts", post(tts_api::tts))
        .route("/health", get(health_api::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the HTTP server and serves until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState, max_upload_bytes: usize) -> Result<()> {
    let app = build_router(state, max_upload_bytes);

    info!("Pagecast HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
