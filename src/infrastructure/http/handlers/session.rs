//! Session Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    ChangeLanguageCommand, ClearHistoryCommand, CloseSessionCommand, GetHistoryQuery,
    OpenSessionCommand,
};
use crate::domain::conversation::Language;
use crate::infrastructure::http::dto::{ApiResponse, TurnDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Open Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct OpenSessionResponseDto {
    pub session_id: String,
    pub language: String,
}

pub async fn open_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<Json<ApiResponse<OpenSessionResponseDto>>, ApiError> {
    let cmd = OpenSessionCommand {
        language: req.language.unwrap_or(Language::English),
    };

    let result = state.open_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(OpenSessionResponseDto {
        session_id: result.session_id,
        language: result.language.as_str().to_string(),
    })))
}

// ============================================================================
// Change Language
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChangeLanguageRequest {
    pub session_id: String,
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct ChangeLanguageResponseDto {
    pub session_id: String,
    pub language: String,
}

pub async fn change_language(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChangeLanguageRequest>,
) -> Result<Json<ApiResponse<ChangeLanguageResponseDto>>, ApiError> {
    let cmd = ChangeLanguageCommand {
        session_id: req.session_id,
        language: req.language,
    };

    let result = state.change_language_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ChangeLanguageResponseDto {
        session_id: result.session_id,
        language: result.language.as_str().to_string(),
    })))
}

// ============================================================================
// Clear History
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClearHistoryRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponseDto {
    pub session_id: String,
    pub cleared_turns: usize,
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClearHistoryRequest>,
) -> Result<Json<ApiResponse<ClearHistoryResponseDto>>, ApiError> {
    let cmd = ClearHistoryCommand {
        session_id: req.session_id,
    };

    let result = state.clear_history_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ClearHistoryResponseDto {
        session_id: result.session_id,
        cleared_turns: result.cleared_turns,
    })))
}

// ============================================================================
// Close Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CloseSessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct CloseSessionResponseDto {
    pub session_id: String,
}

pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CloseSessionRequest>,
) -> Result<Json<ApiResponse<CloseSessionResponseDto>>, ApiError> {
    let cmd = CloseSessionCommand {
        session_id: req.session_id,
    };

    let result = state.close_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(CloseSessionResponseDto {
        session_id: result.session_id,
    })))
}

// ============================================================================
// Get History
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetHistoryRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct GetHistoryResponseDto {
    pub session_id: String,
    pub language: String,
    pub turns: Vec<TurnDto>,
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetHistoryRequest>,
) -> Result<Json<ApiResponse<GetHistoryResponseDto>>, ApiError> {
    let query = GetHistoryQuery {
        session_id: req.session_id,
    };

    let result = state.get_history_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(GetHistoryResponseDto {
        session_id: result.session_id,
        language: result.language.as_str().to_string(),
        turns: result.turns.iter().map(TurnDto::from).collect(),
    })))
}
