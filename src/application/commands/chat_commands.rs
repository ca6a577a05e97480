//! Chat Commands - 提问命令

use uuid::Uuid;

use crate::domain::conversation::{Citation, Language};

/// 提问命令
///
/// `language` 为 Some 时本轮使用该语言并更新会话语言
/// （对应 UI 上的语言选择控件），为 None 时沿用会话当前语言。
#[derive(Debug, Clone)]
pub struct AskQuestionCommand {
    pub session_id: String,
    pub question: String,
    pub language: Option<Language>,
}

/// 提问响应
///
/// 生成失败时 status = "failed"，answer 为 None，error 携带上游错误；
/// 生成成功但合成失败时 status = "partial"，has_audio = false。
#[derive(Debug, Clone)]
pub struct AskQuestionResponse {
    pub session_id: String,
    pub turn_id: Uuid,
    pub language: Language,
    pub status: String,
    pub answer: Option<String>,
    pub citations: Vec<Citation>,
    pub has_audio: bool,
    pub error: Option<String>,
}
