//! Knowledge Base Adapters

mod fake_kb_client;
mod http_kb_client;

pub use fake_kb_client::FakeKnowledgeBaseClient;
pub use http_kb_client::{HttpKnowledgeBaseClient, HttpKnowledgeBaseClientConfig};
