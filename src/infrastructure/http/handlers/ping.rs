//! Ping Handler
//!
//! 健康检查端点，附带上游服务可达性

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub knowledge_base: bool,
    pub speech: bool,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let knowledge_base = state.knowledge_base.health_check().await;
    let speech = state.speech.health_check().await;

    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        knowledge_base,
        speech,
    })
}
