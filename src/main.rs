//! SevaSetu - 政务服务问答助手
//!
//! 架构:
//! - Domain: conversation/ (Bounded Context)
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;
use std::time::Duration;

use sevasetu::application::{ChatUpstreamConfig, SessionManagerPort};
use sevasetu::config::{load_config, print_config};
use sevasetu::infrastructure::adapters::{
    HttpKnowledgeBaseClient, HttpKnowledgeBaseClientConfig, HttpSpeechClient,
    HttpSpeechClientConfig,
};
use sevasetu::infrastructure::http::{AppState, HttpServer};
use sevasetu::infrastructure::memory::InMemorySessionManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    // 必填项缺失时在此处直接退出
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},sevasetu={},tower_http=debug",
        config.log.level, config.log.level
    );
    let subscriber = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
    );
    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("SevaSetu - 政务服务问答助手");
    print_config(&config);

    // 创建 Knowledge Base HTTP 客户端
    let kb_config = HttpKnowledgeBaseClientConfig {
        base_url: config.knowledge_base.url.clone(),
        region: config.auth.region.clone(),
        access_key_id: config.auth.access_key_id.clone(),
        secret_access_key: config.auth.secret_access_key.clone(),
        timeout_secs: config.knowledge_base.timeout_secs,
    };
    let knowledge_base = Arc::new(HttpKnowledgeBaseClient::new(kb_config)?);

    // 创建 Speech HTTP 客户端
    let speech_config = HttpSpeechClientConfig {
        base_url: config.speech.url.clone(),
        region: config.auth.region.clone(),
        access_key_id: config.auth.access_key_id.clone(),
        secret_access_key: config.auth.secret_access_key.clone(),
        engine: config.speech.engine.clone(),
        output_format: config.speech.output_format,
        max_text_chars: config.speech.max_text_chars,
        timeout_secs: config.speech.timeout_secs,
    };
    let speech = Arc::new(HttpSpeechClient::new(speech_config)?);

    // 创建内存 Session 管理器
    let session_manager = Arc::new(InMemorySessionManager::new());

    // 启动会话过期清理任务
    let sweeper_manager = session_manager.clone();
    let expire_secs = config.session.expire_secs;
    let sweep_interval = Duration::from_secs(config.session.sweep_interval_secs);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            let expired = sweeper_manager.get_expired_sessions(expire_secs);
            for session_id in &expired {
                if let Err(e) = sweeper_manager.close(session_id) {
                    tracing::warn!(session_id = %session_id, error = %e, "Failed to close expired session");
                }
            }
            if !expired.is_empty() {
                tracing::info!(
                    expired = expired.len(),
                    active = sweeper_manager.list_all().len(),
                    "Expired sessions swept"
                );
            }
        }
    });

    // 创建 HTTP 服务器
    let upstream = ChatUpstreamConfig {
        knowledge_base_id: config.knowledge_base.knowledge_base_id.clone(),
        model_arn: config.knowledge_base.model_arn.clone(),
        voice_id: config.speech.voice_id.clone(),
    };
    let state = AppState::new(
        session_manager,
        knowledge_base,
        speech,
        upstream,
        config.session.max_turns,
    );

    let server = HttpServer::new(config.server.clone(), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
