//! History Query Handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::session_queries::GetHistoryQuery;
use crate::domain::conversation::{Citation, ConversationTurn, Language};

/// 历史轮次视图
#[derive(Debug, Clone)]
pub struct TurnView {
    pub turn_id: Uuid,
    pub question: String,
    pub language: Language,
    pub status: String,
    pub answer: Option<String>,
    pub citations: Vec<Citation>,
    pub has_audio: bool,
    pub error: Option<String>,
    pub asked_at: DateTime<Utc>,
}

impl From<&ConversationTurn> for TurnView {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            turn_id: turn.id,
            question: turn.question.as_str().to_string(),
            language: turn.language,
            status: turn.status().to_string(),
            answer: turn.answer().map(|a| a.as_str().to_string()),
            citations: turn.citations().to_vec(),
            has_audio: turn.has_audio(),
            error: turn.error().map(str::to_string),
            asked_at: turn.asked_at,
        }
    }
}

/// 获取会话历史响应
#[derive(Debug, Clone)]
pub struct GetHistoryResponse {
    pub session_id: String,
    pub language: Language,
    pub turns: Vec<TurnView>,
}

/// GetHistory Handler - 获取会话历史（按时间顺序）
pub struct GetHistoryHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetHistoryHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        query: GetHistoryQuery,
    ) -> Result<GetHistoryResponse, ApplicationError> {
        let language = self.session_manager.language(&query.session_id)?;
        let turns = self.session_manager.history_snapshot(&query.session_id)?;
        self.session_manager.touch(&query.session_id);

        Ok(GetHistoryResponse {
            session_id: query.session_id,
            language,
            turns: turns.iter().map(TurnView::from).collect(),
        })
    }
}
