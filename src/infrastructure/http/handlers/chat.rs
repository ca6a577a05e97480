//! Chat Handlers
//!
//! 提问端点：生成失败作为业务数据返回（status = "failed"），
//! 会话保持打开，HTTP 层面不报错。

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::AskQuestionCommand;
use crate::domain::conversation::Language;
use crate::infrastructure::http::dto::{ApiResponse, CitationDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskQuestionRequest {
    pub session_id: String,
    pub question: String,
    /// 指定时本轮使用该语言并更新会话语言
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct AskQuestionResponseDto {
    pub session_id: String,
    pub turn_id: String,
    pub language: String,
    /// "answered" | "partial" | "failed"
    pub status: String,
    pub answer: Option<String>,
    pub citations: Vec<CitationDto>,
    pub has_audio: bool,
    pub error: Option<String>,
}

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskQuestionRequest>,
) -> Result<Json<ApiResponse<AskQuestionResponseDto>>, ApiError> {
    let cmd = AskQuestionCommand {
        session_id: req.session_id,
        question: req.question,
        language: req.language,
    };

    let result = state.ask_question_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(AskQuestionResponseDto {
        session_id: result.session_id,
        turn_id: result.turn_id.to_string(),
        language: result.language.as_str().to_string(),
        status: result.status,
        answer: result.answer,
        citations: result.citations.iter().map(CitationDto::from).collect(),
        has_audio: result.has_audio,
        error: result.error,
    })))
}
