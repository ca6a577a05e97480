//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                    GET   健康检查（含上游健康状态）
//! - /api/language/list           GET   列出支持的回答语言
//! - /api/session/open            POST  开启会话
//! - /api/session/change_language POST  切换回答语言
//! - /api/session/clear           POST  清空会话历史（会话保持打开）
//! - /api/session/close           POST  关闭会话（历史随之丢弃）
//! - /api/session/history         POST  获取会话历史
//! - /api/chat/ask                POST  提问（检索生成 + 可选语音合成）
//! - /api/audio                   POST  获取轮次音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/language/list", get(handlers::list_languages))
        .nest("/session", session_routes())
        .route("/chat/ask", post(handlers::ask_question))
        .route("/audio", post(handlers::get_turn_audio))
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_session))
        .route("/change_language", post(handlers::change_language))
        .route("/clear", post(handlers::clear_history))
        .route("/close", post(handlers::close_session))
        .route("/history", post(handlers::get_history))
}
