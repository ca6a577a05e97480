//! Data Transfer Objects

use serde::Serialize;

use crate::application::TurnView;
use crate::domain::conversation::Citation;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    #[allow(dead_code)]
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Chat DTOs
// ============================================================================

/// 引用来源视图
#[derive(Debug, Serialize)]
pub struct CitationDto {
    pub document: String,
    pub uri: String,
    pub excerpt: Option<String>,
}

impl From<&Citation> for CitationDto {
    fn from(citation: &Citation) -> Self {
        Self {
            document: citation.document.clone(),
            uri: citation.uri.clone(),
            excerpt: citation.excerpt.clone(),
        }
    }
}

/// 历史轮次视图
#[derive(Debug, Serialize)]
pub struct TurnDto {
    pub turn_id: String,
    pub question: String,
    pub language: String,
    pub status: String,
    pub answer: Option<String>,
    pub citations: Vec<CitationDto>,
    pub has_audio: bool,
    pub error: Option<String>,
    pub asked_at: String,
}

impl From<&TurnView> for TurnDto {
    fn from(view: &TurnView) -> Self {
        Self {
            turn_id: view.turn_id.to_string(),
            question: view.question.clone(),
            language: view.language.as_str().to_string(),
            status: view.status.clone(),
            answer: view.answer.clone(),
            citations: view.citations.iter().map(CitationDto::from).collect(),
            has_audio: view.has_audio,
            error: view.error.clone(),
            asked_at: view.asked_at.to_rfc3339(),
        }
    }
}
