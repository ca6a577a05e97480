//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::SessionError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误（空问题等，可恢复）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误（上游检索生成或语音合成失败）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl ToString) -> Self {
        Self::ValidationError(message.to_string())
    }

    /// 创建外部服务错误
    pub fn external_service(message: impl ToString) -> Self {
        Self::ExternalServiceError(message.to_string())
    }

    /// 创建内部错误
    pub fn internal(message: impl ToString) -> Self {
        Self::InternalError(message.to_string())
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => ApplicationError::not_found("Session", id),
            SessionError::TurnNotFound(id) => ApplicationError::not_found("Turn", id),
            SessionError::AlreadyExists(id) => {
                ApplicationError::internal(format!("Session already exists: {}", id))
            }
        }
    }
}
