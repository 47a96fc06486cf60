//! Pagecast HTTP API Server
//!
//! `/extract`, `/format-text`, `/tts` and `/health` over axum.

pub mod error;
pub mod extract;
pub mod format_api;
pub mod health_api;
pub mod server;
pub mod tts_api;

pub use error::ApiError;
pub use server::{GatewayState, build_router, start_server};
