//! Session Queries - 会话相关查询

use uuid::Uuid;

/// 获取会话历史查询
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub session_id: String,
}

/// 获取轮次音频查询
#[derive(Debug, Clone)]
pub struct GetTurnAudioQuery {
    pub session_id: String,
    pub turn_id: Uuid,
}

/// 列出支持的语言查询
#[derive(Debug, Clone)]
pub struct ListLanguagesQuery;
