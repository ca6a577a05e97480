//! Conversation Context - 会话限界上下文
//!
//! 职责:
//! - 语言枚举与查询组合（问题 + 语言指令后缀）
//! - 轮次（问题 / 答案 / 引用 / 音频）建模
//! - 会话历史（内存中的有序轮次列表）

mod entities;
mod errors;
mod history;
mod value_objects;

pub use entities::{Answer, AudioClip, Citation, ConversationTurn, TurnOutcome};
pub use errors::ConversationError;
pub use history::ConversationHistory;
pub use value_objects::{AudioFormat, Language, QueryText};
