//! HTTP Middleware
//!
//! 请求延迟与错误日志中间件

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 慢请求阈值（毫秒）
///
/// /api/chat/ask 串行等待检索生成与语音合成两个上游调用，
/// 正常耗时以秒计；超过该阈值说明上游接近超时。
const SLOW_REQUEST_MS: u128 = 10_000;

/// 请求延迟与错误日志中间件
///
/// 记录每个请求的耗时；4xx/5xx 响应连同耗时一并记录。
/// 注意：业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let latency_ms = started.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "HTTP client error"
        );
    } else if latency_ms > SLOW_REQUEST_MS {
        tracing::warn!(
            method = %method,
            path = %path,
            latency_ms,
            "Slow request"
        );
    } else {
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );
    }

    response
}
