//! Conversation Context - Entities
//!
//! 轮次（Turn）及其组成部分：答案、引用、音频

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{AudioFormat, Language, QueryText};

/// 引用摘录的最大字符数，超出部分截断并追加省略号
const EXCERPT_MAX_CHARS: usize = 300;

/// 生成的答案文本
///
/// 不变量: 每个答案恰好属于一个问题（通过所在轮次建立关联）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 来源引用
///
/// 按上游返回顺序保存，不去重（上游未定义顺序与幂等性保证）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// 来源文档名（URI 的最后一段）
    pub document: String,
    /// 来源 URI
    pub uri: String,
    /// 来源摘录（截断至 300 字符）
    pub excerpt: Option<String>,
}

impl Citation {
    /// 从上游引用记录构造
    ///
    /// 文档名取 URI 最后一个路径段；摘录超过 300 字符时截断并追加省略号。
    pub fn from_reference(uri: impl Into<String>, excerpt: Option<&str>) -> Self {
        let uri = uri.into();
        let document = uri
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&uri)
            .to_string();

        let excerpt = excerpt
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(truncate_excerpt);

        Self {
            document,
            uri,
            excerpt,
        }
    }
}

/// 按字符截断摘录（UTF-8 安全）
fn truncate_excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// 合成的音频片段
///
/// 瞬态数据：只存在于会话内存中，不持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// 音频字节流
    pub data: Vec<u8>,
    /// 音频格式
    pub format: AudioFormat,
    /// 生成该片段使用的音色 ID
    pub voice_id: String,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, format: AudioFormat, voice_id: impl Into<String>) -> Self {
        Self {
            data,
            format,
            voice_id: voice_id.into(),
        }
    }
}

/// 轮次结果
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// 生成成功；audio 为 None 表示语音合成失败（部分失败）
    Answered {
        answer: Answer,
        citations: Vec<Citation>,
        audio: Option<AudioClip>,
    },
    /// 生成失败；无答案、无引用、无音频
    Failed { error: String },
}

/// 会话轮次
///
/// 一次完整的 问题/答案/引用/音频 循环。
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub question: QueryText,
    pub language: Language,
    pub asked_at: DateTime<Utc>,
    pub outcome: TurnOutcome,
}

impl ConversationTurn {
    /// 创建生成成功的轮次
    pub fn answered(
        question: QueryText,
        language: Language,
        answer: Answer,
        citations: Vec<Citation>,
        audio: Option<AudioClip>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            language,
            asked_at: Utc::now(),
            outcome: TurnOutcome::Answered {
                answer,
                citations,
                audio,
            },
        }
    }

    /// 创建生成失败的轮次
    pub fn failed(question: QueryText, language: Language, error: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            language,
            asked_at: Utc::now(),
            outcome: TurnOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// 轮次状态: answered / partial / failed
    pub fn status(&self) -> &'static str {
        match &self.outcome {
            TurnOutcome::Answered { audio: Some(_), .. } => "answered",
            TurnOutcome::Answered { audio: None, .. } => "partial",
            TurnOutcome::Failed { .. } => "failed",
        }
    }

    pub fn answer(&self) -> Option<&Answer> {
        match &self.outcome {
            TurnOutcome::Answered { answer, .. } => Some(answer),
            TurnOutcome::Failed { .. } => None,
        }
    }

    pub fn citations(&self) -> &[Citation] {
        match &self.outcome {
            TurnOutcome::Answered { citations, .. } => citations,
            TurnOutcome::Failed { .. } => &[],
        }
    }

    pub fn audio(&self) -> Option<&AudioClip> {
        match &self.outcome {
            TurnOutcome::Answered { audio, .. } => audio.as_ref(),
            TurnOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            TurnOutcome::Failed { error } => Some(error),
            TurnOutcome::Answered { .. } => None,
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio().is_some()
    }
}
