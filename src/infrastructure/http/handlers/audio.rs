//! Audio Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::GetTurnAudioQuery;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetTurnAudioRequest {
    pub session_id: String,
    pub turn_id: Uuid,
}

pub async fn get_turn_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetTurnAudioRequest>,
) -> Result<Response, ApiError> {
    let query = GetTurnAudioQuery {
        session_id: req.session_id,
        turn_id: req.turn_id,
    };

    let result = state.get_turn_audio_handler.handle(query).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
