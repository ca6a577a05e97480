//! Conversation Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("问题不能为空")]
    EmptyQuery,
}
