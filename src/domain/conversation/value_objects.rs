//! Conversation Context - Value Objects

use serde::{Deserialize, Serialize};

use super::errors::ConversationError;

/// 支持的回答语言（固定枚举）
///
/// 每种语言携带展示名、BCP-47 语言代码和固定的语言指令后缀。
/// 组合后的查询始终以所选语言的指令文本结尾。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Bengali,
}

impl Language {
    /// 全部支持的语言，顺序即 UI 展示顺序
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Bengali,
    ];

    /// 语言标识（小写，用于 API 与配置）
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Tamil => "tamil",
            Language::Telugu => "telugu",
            Language::Bengali => "bengali",
        }
    }

    /// 展示名（含本地文字）
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi (हिंदी)",
            Language::Tamil => "Tamil (தமிழ்)",
            Language::Telugu => "Telugu (తెలుగు)",
            Language::Bengali => "Bengali (বাংলা)",
        }
    }

    /// BCP-47 语言代码，传给语音合成服务
    pub fn language_code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
            Language::Bengali => "bn-IN",
        }
    }

    /// 固定的语言指令后缀
    pub fn instruction(&self) -> &'static str {
        match self {
            Language::English => "Respond in English.",
            Language::Hindi => "Respond in Hindi (हिंदी में जवाब दें).",
            Language::Tamil => "Respond in Tamil (தமிழில் பதிலளிக்கவும்).",
            Language::Telugu => "Respond in Telugu (తెలుగులో సమాధానం ఇవ్వండి).",
            Language::Bengali => "Respond in Bengali (বাংলায় উত্তর দিন).",
        }
    }

    /// 组合查询：原始问题 + 语言指令后缀
    ///
    /// 无副作用；组合结果恰好以 `instruction()` 结尾。
    pub fn compose_query(&self, query: &QueryText) -> String {
        format!("{} {}", query.as_str(), self.instruction())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 用户问题文本
///
/// 不变量: 非空（去除首尾空白后）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryText(String);

impl QueryText {
    pub fn new(text: impl Into<String>) -> Result<Self, ConversationError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConversationError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for QueryText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Mp3,
    OggVorbis,
    Pcm,
    Wav,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::Mp3
    }
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::OggVorbis => "ogg_vorbis",
            Self::Pcm => "pcm",
            Self::Wav => "wav",
        }
    }

    /// HTTP 响应的 Content-Type
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::OggVorbis => "audio/ogg",
            Self::Pcm => "audio/pcm",
            Self::Wav => "audio/wav",
        }
    }

    /// 从 Content-Type 推断格式
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.split(';').next().unwrap_or("").trim() {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" => Some(Self::OggVorbis),
            "audio/pcm" | "audio/l16" => Some(Self::Pcm),
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            _ => None,
        }
    }
}
