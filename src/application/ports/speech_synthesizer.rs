//! Speech Synthesizer Port - 语音合成服务抽象
//!
//! 定义外部托管语音合成服务的抽象接口，具体实现在
//! infrastructure/adapters 层。合成失败不影响当轮答案与引用的展示。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::AudioFormat;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesizeRequest {
    /// 要合成的答案文本
    pub text: String,
    /// 音色 ID
    pub voice_id: String,
    /// BCP-47 语言代码
    pub language_code: String,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeResponse {
    /// 合成的音频字节流
    pub audio_data: Vec<u8>,
    /// 音频格式
    pub format: AudioFormat,
}

/// Speech Synthesizer Port
///
/// 外部托管语音合成服务的抽象接口
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 执行一次语音合成调用
    async fn synthesize(
        &self,
        request: SynthesizeRequest,
    ) -> Result<SynthesizeResponse, SpeechError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
