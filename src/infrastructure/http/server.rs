//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置，监听地址来自配置的 server 段

use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 构建带中间件的完整 Router
///
/// 浏览器前端跨域访问 API；上游凭证只出现在出站请求头中，
/// 入站 CORS 只需放行 Content-Type。
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([CONTENT_TYPE]);

    create_routes()
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let router = build_router(self.state);

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ChatUpstreamConfig;
    use crate::infrastructure::adapters::{FakeKnowledgeBaseClient, FakeSpeechClient};
    use crate::infrastructure::memory::InMemorySessionManager;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(
            Arc::new(InMemorySessionManager::new()),
            Arc::new(FakeKnowledgeBaseClient::with_defaults()),
            Arc::new(FakeSpeechClient::with_defaults()),
            ChatUpstreamConfig {
                knowledge_base_id: "KBTEST0001".to_string(),
                model_arn: "arn:bedrock:model/test".to_string(),
                voice_id: "Aditi".to_string(),
            },
            0,
        );
        build_router(Arc::new(state))
    }

    #[tokio::test]
    async fn test_ping_route() {
        let app = test_router();
        let request = Request::builder()
            .uri("/api/ping")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_open_session_envelope() {
        let app = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/session/open")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"language": "hindi"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["language"], "hindi");
        assert!(json["data"]["session_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_unknown_session_reports_business_error() {
        let app = test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/api/session/history")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"session_id": "missing"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        // 业务错误走统一信封，HTTP 层仍为 200
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["errno"], 404);
        assert!(json["error"].as_str().unwrap().contains("missing"));
    }
}
