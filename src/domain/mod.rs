//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Conversation Context: 会话管理（语言、问题、答案、引用、音频、历史）

pub mod conversation;
