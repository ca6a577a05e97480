//! Fake Speech 客户端 - 测试用

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    SpeechError, SpeechSynthesizerPort, SynthesizeRequest, SynthesizeResponse,
};
use crate::domain::conversation::AudioFormat;

/// Fake Speech 客户端，返回预设音频或预设错误
pub struct FakeSpeechClient {
    audio_data: Vec<u8>,
    format: AudioFormat,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl FakeSpeechClient {
    /// 返回固定 MP3 字节的客户端
    pub fn with_defaults() -> Self {
        Self {
            audio_data: vec![0xFF, 0xFB, 0x90, 0x00, 0x01, 0x02, 0x03],
            format: AudioFormat::Mp3,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// 每次合成都失败的客户端
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            audio_data: Vec::new(),
            format: AudioFormat::Mp3,
            fail_with: Some(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 已收到的合成请求次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSpeechClient {
    async fn synthesize(
        &self,
        _request: SynthesizeRequest,
    ) -> Result<SynthesizeResponse, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.fail_with {
            return Err(SpeechError::ServiceError(message.clone()));
        }

        Ok(SynthesizeResponse {
            audio_data: self.audio_data.clone(),
            format: self.format,
        })
    }

    async fn health_check(&self) -> bool {
        self.fail_with.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_defaults_returns_audio() {
        let client = FakeSpeechClient::with_defaults();
        let response = client
            .synthesize(SynthesizeRequest {
                text: "hello".to_string(),
                voice_id: "Aditi".to_string(),
                language_code: "en-IN".to_string(),
            })
            .await
            .unwrap();

        assert!(!response.audio_data.is_empty());
        assert_eq!(response.format, AudioFormat::Mp3);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_returns_error() {
        let client = FakeSpeechClient::failing("voice unavailable");
        let result = client
            .synthesize(SynthesizeRequest {
                text: "hello".to_string(),
                voice_id: "Aditi".to_string(),
                language_code: "en-IN".to_string(),
            })
            .await;

        assert!(matches!(result, Err(SpeechError::ServiceError(_))));
        assert_eq!(client.call_count(), 1);
    }
}
