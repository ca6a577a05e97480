//! HTTP Knowledge Base Client - 调用外部检索生成服务
//!
//! 实现 KnowledgeBasePort trait，通过 HTTP 调用托管检索生成服务
//! （经统一网关转发，凭证与区域随请求头发送）
//!
//! 外部 API:
//! POST {base}/retrieveAndGenerate
//! Request:
//!   {"input": {"text": "..."},
//!    "retrieveAndGenerateConfiguration": {
//!       "type": "KNOWLEDGE_BASE",
//!       "knowledgeBaseConfiguration": {"knowledgeBaseId": "...", "modelArn": "..."}}}
//! Response:
//!   {"output": {"text": "..."},
//!    "citations": [{"retrievedReferences": [
//!       {"location": {"s3Location": {"uri": "..."}}, "content": {"text": "..."}}]}],
//!    "sessionId": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    KnowledgeBaseError, KnowledgeBasePort, RetrieveRequest, RetrieveResponse,
};
use crate::domain::conversation::Citation;

/// 检索生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct RetrieveAndGenerateBody {
    input: InputBody,
    #[serde(rename = "retrieveAndGenerateConfiguration")]
    configuration: RagConfiguration,
}

#[derive(Debug, Serialize)]
struct InputBody {
    text: String,
}

#[derive(Debug, Serialize)]
struct RagConfiguration {
    #[serde(rename = "type")]
    config_type: &'static str,
    #[serde(rename = "knowledgeBaseConfiguration")]
    knowledge_base: KbConfiguration,
}

#[derive(Debug, Serialize)]
struct KbConfiguration {
    #[serde(rename = "knowledgeBaseId")]
    knowledge_base_id: String,
    #[serde(rename = "modelArn")]
    model_arn: String,
}

/// 检索生成响应体 (JSON)
#[derive(Debug, Deserialize)]
struct RetrieveAndGenerateResult {
    output: OutputBody,
    #[serde(default)]
    citations: Vec<CitationBody>,
    #[serde(rename = "sessionId", default)]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct OutputBody {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct CitationBody {
    #[serde(rename = "retrievedReferences", default)]
    retrieved_references: Vec<ReferenceBody>,
}

#[derive(Debug, Deserialize)]
struct ReferenceBody {
    #[serde(default)]
    location: Option<LocationBody>,
    #[serde(default)]
    content: Option<ContentBody>,
}

#[derive(Debug, Deserialize)]
struct LocationBody {
    #[serde(rename = "s3Location", default)]
    s3_location: Option<S3LocationBody>,
}

#[derive(Debug, Deserialize)]
struct S3LocationBody {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    #[serde(default)]
    text: Option<String>,
}

/// HTTP Knowledge Base 客户端配置
#[derive(Debug, Clone)]
pub struct HttpKnowledgeBaseClientConfig {
    /// 检索生成服务基础 URL
    pub base_url: String,
    /// 区域标识
    pub region: String,
    /// 访问密钥 ID
    pub access_key_id: String,
    /// 访问密钥
    pub secret_access_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpKnowledgeBaseClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            region: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl HttpKnowledgeBaseClientConfig {
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

/// HTTP Knowledge Base 客户端
///
/// 通过 HTTP 调用外部托管检索生成服务；每次调用独立、无重试、无缓存
pub struct HttpKnowledgeBaseClient {
    client: Client,
    config: HttpKnowledgeBaseClientConfig,
}

impl HttpKnowledgeBaseClient {
    /// 创建新的 HTTP Knowledge Base 客户端
    pub fn new(config: HttpKnowledgeBaseClientConfig) -> Result<Self, KnowledgeBaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KnowledgeBaseError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取检索生成 URL
    fn retrieve_url(&self) -> String {
        format!("{}/retrieveAndGenerate", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }

    /// 把上游引用记录压平为领域引用列表
    fn map_citations(result: &RetrieveAndGenerateResult) -> Vec<Citation> {
        let mut citations = Vec::new();
        for citation in &result.citations {
            for reference in &citation.retrieved_references {
                let uri = reference
                    .location
                    .as_ref()
                    .and_then(|l| l.s3_location.as_ref())
                    .and_then(|s| s.uri.as_deref())
                    .unwrap_or("Unknown");
                let excerpt = reference
                    .content
                    .as_ref()
                    .and_then(|c| c.text.as_deref());
                citations.push(Citation::from_reference(uri, excerpt));
            }
        }
        citations
    }
}

#[async_trait]
impl KnowledgeBasePort for HttpKnowledgeBaseClient {
    async fn retrieve_and_generate(
        &self,
        request: RetrieveRequest,
    ) -> Result<RetrieveResponse, KnowledgeBaseError> {
        let body = RetrieveAndGenerateBody {
            input: InputBody {
                text: request.query,
            },
            configuration: RagConfiguration {
                config_type: "KNOWLEDGE_BASE",
                knowledge_base: KbConfiguration {
                    knowledge_base_id: request.knowledge_base_id,
                    model_arn: request.model_arn,
                },
            },
        };

        tracing::debug!(
            url = %self.retrieve_url(),
            query_len = body.input.text.len(),
            knowledge_base_id = %body.configuration.knowledge_base.knowledge_base_id,
            "Sending retrieve-and-generate request"
        );

        let response = self
            .client
            .post(self.retrieve_url())
            .header("x-region", &self.config.region)
            .header("x-access-key-id", &self.config.access_key_id)
            .header("x-secret-access-key", &self.config.secret_access_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    KnowledgeBaseError::Timeout
                } else if e.is_connect() {
                    KnowledgeBaseError::NetworkError(format!(
                        "Cannot connect to knowledge base service: {}",
                        e
                    ))
                } else {
                    KnowledgeBaseError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(KnowledgeBaseError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let result: RetrieveAndGenerateResult = response.json().await.map_err(|e| {
            KnowledgeBaseError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let citations = Self::map_citations(&result);

        tracing::info!(
            upstream_session_id = %result.session_id,
            answer_len = result.output.text.len(),
            citations = citations.len(),
            "Retrieve-and-generate completed"
        );

        Ok(RetrieveResponse {
            answer_text: result.output.text,
            citations,
            upstream_session_id: result.session_id,
        })
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
        let config = HttpKnowledgeBaseClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8100");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpKnowledgeBaseClientConfig::new("http://kb.internal:9000").with_timeout(30);
        assert_eq!(config.base_url, "http://kb.internal:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_request_body_wire_format() {
        let body = RetrieveAndGenerateBody {
            input: InputBody {
                text: "What is PM-Kisan scheme? Respond in English.".to_string(),
            },
            configuration: RagConfiguration {
                config_type: "KNOWLEDGE_BASE",
                knowledge_base: KbConfiguration {
                    knowledge_base_id: "KB12345678".to_string(),
                    model_arn: "arn:bedrock:model/test".to_string(),
                },
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["input"]["text"],
            "What is PM-Kisan scheme? Respond in English."
        );
        assert_eq!(
            json["retrieveAndGenerateConfiguration"]["type"],
            "KNOWLEDGE_BASE"
        );
        assert_eq!(
            json["retrieveAndGenerateConfiguration"]["knowledgeBaseConfiguration"]
                ["knowledgeBaseId"],
            "KB12345678"
        );
    }

    #[test]
    fn test_response_parsing_and_citation_mapping() {
        let raw = serde_json::json!({
            "output": {"text": "PM-Kisan provides ₹6,000/year to small farmers."},
            "citations": [
                {"retrievedReferences": [
                    {"location": {"s3Location": {"uri": "s3://schemes/pm_kisan.md"}},
                     "content": {"text": "PM-Kisan details..."}},
                    {"location": {"s3Location": {"uri": "s3://schemes/farmers/overview.md"}}}
                ]},
                {"retrievedReferences": []}
            ],
            "sessionId": "session-123"
        });

        let result: RetrieveAndGenerateResult = serde_json::from_value(raw).unwrap();
        assert_eq!(
            result.output.text,
            "PM-Kisan provides ₹6,000/year to small farmers."
        );
        assert_eq!(result.session_id, "session-123");

        let citations = HttpKnowledgeBaseClient::map_citations(&result);
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].document, "pm_kisan.md");
        assert_eq!(citations[0].excerpt.as_deref(), Some("PM-Kisan details..."));
        assert_eq!(citations[1].document, "overview.md");
        assert!(citations[1].excerpt.is_none());
    }

    #[test]
    fn test_response_parsing_without_citations() {
        let raw = serde_json::json!({"output": {"text": "answer"}});
        let result: RetrieveAndGenerateResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.output.text, "answer");
        assert!(result.citations.is_empty());
        assert!(result.session_id.is_empty());
    }
}
