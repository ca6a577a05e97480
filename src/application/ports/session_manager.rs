//! Session Manager Port - 会话生命周期管理
//!
//! 定义会话管理的抽象接口，具体实现在 infrastructure/memory 层。
//! 会话历史只存在于内存中，会话结束即丢弃。

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::conversation::{
    AudioClip, ConversationHistory, ConversationTurn, Language,
};

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Turn not found: {0}")]
    TurnNotFound(String),
}

/// 会话状态（in-memory）
///
/// 会话拥有自己的历史容器；状态仅由单个请求处理流变更。
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// 当前回答语言，后续轮次默认使用
    pub language: Language,
    pub history: ConversationHistory,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    pub fn new(language: Language, max_turns: usize) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            language,
            history: ConversationHistory::new(max_turns),
            created_at: now,
            last_activity: now,
        }
    }
}

/// Session Manager Port
///
/// 管理会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: Session) -> Result<String, SessionError>;

    /// 获取会话当前语言
    fn language(&self, id: &str) -> Result<Language, SessionError>;

    /// 更新会话语言
    fn update_language(&self, id: &str, language: Language) -> Result<(), SessionError>;

    /// 追加轮次到会话历史
    fn append_turn(&self, id: &str, turn: ConversationTurn) -> Result<(), SessionError>;

    /// 清空会话历史，返回清除的轮次数
    fn clear_history(&self, id: &str) -> Result<usize, SessionError>;

    /// 获取会话历史快照（按时间顺序）
    fn history_snapshot(&self, id: &str) -> Result<Vec<ConversationTurn>, SessionError>;

    /// 获取指定轮次的音频片段；轮次存在但无音频时返回 None
    fn turn_audio(&self, id: &str, turn_id: Uuid) -> Result<Option<AudioClip>, SessionError>;

    /// 关闭会话，历史随之丢弃
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 获取所有过期会话的 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
