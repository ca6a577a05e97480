//! Knowledge Base Port - 检索生成服务抽象
//!
//! 定义外部托管 RAG（检索增强生成）服务的抽象接口，
//! 具体实现在 infrastructure/adapters 层。
//! 每次调用相互独立：无重试、无缓存、无本地状态。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::Citation;

/// Knowledge Base 错误
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 检索生成请求
#[derive(Debug, Clone)]
pub struct RetrieveRequest {
    /// 组合后的查询文本（问题 + 语言指令后缀）
    pub query: String,
    /// 知识库 ID
    pub knowledge_base_id: String,
    /// 生成模型 ARN
    pub model_arn: String,
}

/// 检索生成响应
#[derive(Debug, Clone)]
pub struct RetrieveResponse {
    /// 生成的答案文本
    pub answer_text: String,
    /// 来源引用，按上游返回顺序
    pub citations: Vec<Citation>,
    /// 上游服务会话 ID（用于追踪）
    pub upstream_session_id: String,
}

/// Knowledge Base Port
///
/// 外部托管检索生成服务的抽象接口
#[async_trait]
pub trait KnowledgeBasePort: Send + Sync {
    /// 执行一次检索生成调用
    ///
    /// 发送组合后的查询到外部服务，返回生成的答案与引用列表
    async fn retrieve_and_generate(
        &self,
        request: RetrieveRequest,
    ) -> Result<RetrieveResponse, KnowledgeBaseError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
