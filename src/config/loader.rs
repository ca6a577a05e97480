//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SEVASETU_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SEVASETU_SERVER__PORT=8080`
/// - `SEVASETU_KNOWLEDGE_BASE__KNOWLEDGE_BASE_ID=KB12345678`
/// - `SEVASETU_KNOWLEDGE_BASE__MODEL_ARN=arn:bedrock:...`
/// - `SEVASETU_SPEECH__VOICE_ID=Aditi`
/// - `SEVASETU_AUTH__REGION=us-east-1`
///
/// # 返回
/// - `Ok(AppConfig)` - 成功加载并通过验证的配置
/// - `Err(ConfigError)` - 加载失败或必填项缺失
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    // 必填项（knowledge_base_id / model_arn / 凭证 / voice_id）不设默认值，
    // 缺失时在 validate_config 中报错
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("knowledge_base.url", "http://localhost:8100")?
        .set_default("knowledge_base.timeout_secs", 60)?
        .set_default("speech.url", "http://localhost:8200")?
        .set_default("speech.engine", "standard")?
        .set_default("speech.output_format", "mp3")?
        .set_default("speech.max_text_chars", 3000)?
        .set_default("speech.timeout_secs", 30)?
        .set_default("session.expire_secs", 1800)?
        .set_default("session.sweep_interval_secs", 300)?
        .set_default("session.max_turns", 0)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: SEVASETU_
    // 层级分隔符: __ (双下划线)
    // 例如: SEVASETU_SPEECH__VOICE_ID=Aditi
    builder = builder.add_source(
        Environment::with_prefix("SEVASETU")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置（必填项缺失时在任何网络调用之前失败）
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 必填项：knowledge_base_id、model_arn、region、access_key_id、
/// secret_access_key、voice_id。任一缺失即启动失败。
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.knowledge_base.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Knowledge base URL cannot be empty".to_string(),
        ));
    }

    if config.knowledge_base.knowledge_base_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "knowledge_base.knowledge_base_id is required".to_string(),
        ));
    }

    if config.knowledge_base.model_arn.is_empty() {
        return Err(ConfigError::ValidationError(
            "knowledge_base.model_arn is required".to_string(),
        ));
    }

    if config.speech.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Speech URL cannot be empty".to_string(),
        ));
    }

    if config.speech.voice_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "speech.voice_id is required".to_string(),
        ));
    }

    if config.auth.region.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.region is required".to_string(),
        ));
    }

    if config.auth.access_key_id.is_empty() || config.auth.secret_access_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.access_key_id and auth.secret_access_key are required".to_string(),
        ));
    }

    if config.session.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session sweep interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，凭证脱敏）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Knowledge Base URL: {}", config.knowledge_base.url);
    tracing::info!(
        "Knowledge Base ID: {}",
        config.knowledge_base.knowledge_base_id
    );
    tracing::info!("Model ARN: {}", config.knowledge_base.model_arn);
    tracing::info!("Speech URL: {}", config.speech.url);
    tracing::info!("Voice ID: {}", config.speech.voice_id);
    tracing::info!("Speech Engine: {}", config.speech.engine);
    tracing::info!("Region: {}", config.auth.region);
    tracing::info!("Access Key: {}***", redact(&config.auth.access_key_id));
    tracing::info!("Session Expire: {}s", config.session.expire_secs);
    tracing::info!("Session Sweep Interval: {}s", config.session.sweep_interval_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

/// 凭证脱敏，只保留前 4 个字符
fn redact(value: &str) -> &str {
    let end = value
        .char_indices()
        .nth(4)
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.knowledge_base.knowledge_base_id = "KB12345678".to_string();
        config.knowledge_base.model_arn = "arn:bedrock:model/test".to_string();
        config.speech.voice_id = "Aditi".to_string();
        config.auth.region = "us-east-1".to_string();
        config.auth.access_key_id = "AKIATEST".to_string();
        config.auth.secret_access_key = "secret".to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_missing_knowledge_base_id() {
        let mut config = valid_config();
        config.knowledge_base.knowledge_base_id = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_missing_model_arn() {
        let mut config = valid_config();
        config.knowledge_base.model_arn = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_missing_voice_id() {
        let mut config = valid_config();
        config.speech.voice_id = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_missing_credentials() {
        let mut config = valid_config();
        config.auth.secret_access_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 6080

[knowledge_base]
knowledge_base_id = "KBFILE0001"
model_arn = "arn:bedrock:model/from-file"

[speech]
voice_id = "Kajal"

[auth]
region = "ap-south-1"
access_key_id = "AKIAFILE"
secret_access_key = "filesecret"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 6080);
        assert_eq!(config.knowledge_base.knowledge_base_id, "KBFILE0001");
        assert_eq!(config.speech.voice_id, "Kajal");
        assert_eq!(config.auth.region, "ap-south-1");
        // 未覆盖的字段保持默认值
        assert_eq!(config.speech.engine, "standard");
        assert_eq!(config.speech.max_text_chars, 3000);
    }

    #[test]
    fn test_load_config_fails_without_required_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 6080
"#
        )
        .unwrap();

        let result = load_config_from_path(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_redact_short_value() {
        assert_eq!(redact("AK"), "AK");
        assert_eq!(redact("AKIATEST1234"), "AKIA");
    }
}
