//! Language Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListLanguagesQuery;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct LanguageDto {
    pub id: String,
    pub display_name: String,
    pub language_code: String,
}

#[derive(Debug, Serialize)]
pub struct ListLanguagesResponseDto {
    pub languages: Vec<LanguageDto>,
}

pub async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<ListLanguagesResponseDto>> {
    let languages = state
        .list_languages_handler
        .handle(ListLanguagesQuery)
        .into_iter()
        .map(|info| LanguageDto {
            id: info.id.as_str().to_string(),
            display_name: info.display_name.to_string(),
            language_code: info.language_code.to_string(),
        })
        .collect();

    Json(ApiResponse::success(ListLanguagesResponseDto { languages }))
}
