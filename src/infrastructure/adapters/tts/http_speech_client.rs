//! HTTP Speech Client - 调用外部语音合成服务
//!
//! 实现 SpeechSynthesizerPort trait，通过 HTTP 调用托管语音合成服务
//! （经统一网关转发，凭证与区域随请求头发送）
//!
//! 外部 API:
//! POST {base}/v1/speech
//! Request: {"text": "...", "voiceId": "...", "languageCode": "...",
//!           "engine": "...", "outputFormat": "..."}  (JSON)
//! Response: 音频二进制流，Content-Type 标识格式

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    SpeechError, SpeechSynthesizerPort, SynthesizeRequest, SynthesizeResponse,
};
use crate::domain::conversation::AudioFormat;

/// 语音合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest {
    /// 要合成的文本（超长部分已截断）
    text: String,
    #[serde(rename = "voiceId")]
    voice_id: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    engine: String,
    #[serde(rename = "outputFormat")]
    output_format: String,
}

/// HTTP Speech 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 语音合成服务基础 URL
    pub base_url: String,
    /// 区域标识
    pub region: String,
    /// 访问密钥 ID
    pub access_key_id: String,
    /// 访问密钥
    pub secret_access_key: String,
    /// 合成引擎
    pub engine: String,
    /// 输出音频格式
    pub output_format: AudioFormat,
    /// 单次合成的最大文本长度（字符数）
    pub max_text_chars: usize,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8200".to_string(),
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            engine: "standard".to_string(),
            output_format: AudioFormat::Mp3,
            max_text_chars: 3000,
            timeout_secs: 30,
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Speech 客户端
///
/// 通过 HTTP 调用外部托管语音合成服务
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    /// 创建新的 HTTP Speech 客户端
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        format!("{}/v1/speech", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    /// 按字符截断文本至配置上限（UTF-8 安全）
    fn truncate_text(&self, text: &str) -> String {
        match text.char_indices().nth(self.config.max_text_chars) {
            Some((byte_index, _)) => text[..byte_index].to_string(),
            None => text.to_string(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizerPort for HttpSpeechClient {
    async fn synthesize(
        &self,
        request: SynthesizeRequest,
    ) -> Result<SynthesizeResponse, SpeechError> {
        let body = SpeechHttpRequest {
            text: self.truncate_text(&request.text),
            voice_id: request.voice_id,
            language_code: request.language_code,
            engine: self.config.engine.clone(),
            output_format: self.config.output_format.as_str().to_string(),
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_len = body.text.len(),
            voice_id = %body.voice_id,
            language_code = %body.language_code,
            "Sending speech synthesis request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .header("x-region", &self.config.region)
            .header("x-access-key-id", &self.config.access_key_id)
            .header("x-secret-access-key", &self.config.secret_access_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else if e.is_connect() {
                    SpeechError::NetworkError(format!(
                        "Cannot connect to speech service: {}",
                        e
                    ))
                } else {
                    SpeechError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 从 Content-Type 推断实际格式，缺失时退回配置格式
        let format = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(AudioFormat::from_content_type)
            .unwrap_or(self.config.output_format);

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Empty audio stream".to_string(),
            ));
        }

        tracing::info!(
            audio_size = audio_data.len(),
            format = format.as_str(),
            "Speech synthesis completed"
        );

        Ok(SynthesizeResponse { audio_data, format })
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpSpeechClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8200");
        assert_eq!(config.engine, "standard");
        assert_eq!(config.max_text_chars, 3000);
        assert_eq!(config.output_format, AudioFormat::Mp3);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpSpeechClientConfig::new("http://speech.internal:9100").with_timeout(10);
        assert_eq!(config.base_url, "http://speech.internal:9100");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_truncate_text() {
        let mut config = HttpSpeechClientConfig::default();
        config.max_text_chars = 5;
        let client = HttpSpeechClient::new(config).unwrap();

        assert_eq!(client.truncate_text("short"), "short");
        assert_eq!(client.truncate_text("longer text"), "longe");
        // 多字节字符按字符数截断
        assert_eq!(client.truncate_text("नमस्ते दुनिया"), "नमस्ते");
    }

    #[test]
    fn test_request_body_wire_format() {
        let body = SpeechHttpRequest {
            text: "answer".to_string(),
            voice_id: "Aditi".to_string(),
            language_code: "hi-IN".to_string(),
            engine: "standard".to_string(),
            output_format: "mp3".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["voiceId"], "Aditi");
        assert_eq!(json["languageCode"], "hi-IN");
        assert_eq!(json["outputFormat"], "mp3");
    }
}
