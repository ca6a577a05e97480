//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::conversation::AudioFormat;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 知识库（检索生成）服务配置
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 上游服务凭证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            knowledge_base: KnowledgeBaseConfig::default(),
            speech: SpeechConfig::default(),
            auth: AuthConfig::default(),
            session: SessionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 知识库（检索生成）服务配置
///
/// `knowledge_base_id` 与 `model_arn` 无默认值，必须通过配置文件或
/// 环境变量提供。
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// 知识库服务基础 URL
    #[serde(default = "default_kb_url")]
    pub url: String,

    /// 知识库 ID（必填）
    #[serde(default)]
    pub knowledge_base_id: String,

    /// 生成模型 ARN（必填）
    #[serde(default)]
    pub model_arn: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_kb_timeout")]
    pub timeout_secs: u64,
}

fn default_kb_url() -> String {
    "http://localhost:8100".to_string()
}

fn default_kb_timeout() -> u64 {
    60
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            url: default_kb_url(),
            knowledge_base_id: String::new(),
            model_arn: String::new(),
            timeout_secs: default_kb_timeout(),
        }
    }
}

/// 语音合成服务配置
///
/// `voice_id` 无默认值，必须通过配置文件或环境变量提供。
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 语音合成服务基础 URL
    #[serde(default = "default_speech_url")]
    pub url: String,

    /// 音色 ID（必填）
    #[serde(default)]
    pub voice_id: String,

    /// 合成引擎
    #[serde(default = "default_engine")]
    pub engine: String,

    /// 输出音频格式
    /// 可选: mp3, ogg_vorbis, pcm, wav
    #[serde(default)]
    pub output_format: AudioFormat,

    /// 单次合成的最大文本长度（字符数），超出部分截断
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// 请求超时时间（秒）
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

fn default_speech_url() -> String {
    "http://localhost:8200".to_string()
}

fn default_engine() -> String {
    "standard".to_string()
}

fn default_max_text_chars() -> usize {
    3000
}

fn default_speech_timeout() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: default_speech_url(),
            voice_id: String::new(),
            engine: default_engine(),
            output_format: AudioFormat::Mp3,
            max_text_chars: default_max_text_chars(),
            timeout_secs: default_speech_timeout(),
        }
    }
}

/// 上游服务凭证配置
///
/// 区域与访问凭证均为必填项，随请求头发送给上游网关。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// 区域标识（必填）
    #[serde(default)]
    pub region: String,

    /// 访问密钥 ID（必填）
    #[serde(default)]
    pub access_key_id: String,

    /// 访问密钥（必填）
    #[serde(default)]
    pub secret_access_key: String,
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话空闲过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub expire_secs: u64,

    /// 过期会话清理间隔（秒）
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// 单个会话保留的最大轮次数，0 表示不限制
    #[serde(default)]
    pub max_turns: usize,
}

fn default_session_expire() -> u64 {
    1800 // 30 分钟
}

fn default_sweep_interval() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expire_secs: default_session_expire(),
            sweep_interval_secs: default_sweep_interval(),
            max_turns: 0,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.knowledge_base.url, "http://localhost:8100");
        assert_eq!(config.speech.engine, "standard");
        assert_eq!(config.speech.max_text_chars, 3000);
        assert!(config.knowledge_base.knowledge_base_id.is_empty());
        assert!(config.speech.voice_id.is_empty());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5070");
    }

    #[test]
    fn test_default_session_config() {
        let config = SessionConfig::default();
        assert_eq!(config.expire_secs, 1800);
        assert_eq!(config.max_turns, 0);
    }
}
