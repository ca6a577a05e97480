//! Session Commands - 会话相关命令

use crate::domain::conversation::Language;

/// 开启会话命令
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub language: Language,
}

/// 开启会话响应
#[derive(Debug, Clone)]
pub struct OpenSessionResponse {
    pub session_id: String,
    pub language: Language,
}

/// 切换回答语言命令
#[derive(Debug, Clone)]
pub struct ChangeLanguageCommand {
    pub session_id: String,
    pub language: Language,
}

/// 切换回答语言响应
#[derive(Debug, Clone)]
pub struct ChangeLanguageResponse {
    pub session_id: String,
    pub language: Language,
}

/// 清空历史命令 - 历史清空，会话保持打开
#[derive(Debug, Clone)]
pub struct ClearHistoryCommand {
    pub session_id: String,
}

/// 清空历史响应
#[derive(Debug, Clone)]
pub struct ClearHistoryResponse {
    pub session_id: String,
    pub cleared_turns: usize,
}

/// 关闭会话命令 - 会话与历史一并丢弃
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: String,
}

/// 关闭会话响应
#[derive(Debug, Clone)]
pub struct CloseSessionResponse {
    pub session_id: String,
}
