//! Fake Knowledge Base Client - 用于测试的检索生成客户端
//!
//! 返回固定答案与引用，不实际调用外部服务；
//! 记录调用次数与最后一次查询，供测试断言。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{
    KnowledgeBaseError, KnowledgeBasePort, RetrieveRequest, RetrieveResponse,
};
use crate::domain::conversation::Citation;

/// Fake Knowledge Base Client
pub struct FakeKnowledgeBaseClient {
    answer: String,
    citations: Vec<Citation>,
    fail_with: Option<String>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl FakeKnowledgeBaseClient {
    /// 返回指定答案与引用
    pub fn with_answer(answer: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            answer: answer.into(),
            citations,
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// 返回固定示例答案
    pub fn with_defaults() -> Self {
        Self::with_answer(
            "PM-Kisan provides ₹6,000/year to small farmers.",
            vec![Citation::from_reference("s3://schemes/pm_kisan.md", None)],
        )
    }

    /// 始终以指定错误失败
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            answer: String::new(),
            citations: Vec::new(),
            fail_with: Some(message.into()),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// 已发起的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最后一次收到的查询文本
    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeBasePort for FakeKnowledgeBaseClient {
    async fn retrieve_and_generate(
        &self,
        request: RetrieveRequest,
    ) -> Result<RetrieveResponse, KnowledgeBaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(request.query.clone());

        if let Some(message) = &self.fail_with {
            return Err(KnowledgeBaseError::ServiceError(message.clone()));
        }

        tracing::debug!(
            query_len = request.query.len(),
            knowledge_base_id = %request.knowledge_base_id,
            "FakeKnowledgeBaseClient: returning fixed answer"
        );

        Ok(RetrieveResponse {
            answer_text: self.answer.clone(),
            citations: self.citations.clone(),
            upstream_session_id: format!("fake-{}", uuid::Uuid::new_v4()),
        })
    }
}
