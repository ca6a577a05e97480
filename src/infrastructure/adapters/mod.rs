//! Infrastructure Adapters
//!
//! 出站端口的具体实现：
//! - kb: Knowledge Base (检索生成) HTTP 客户端
//! - tts: Speech Synthesizer (语音合成) HTTP 客户端

pub mod kb;
pub mod tts;

pub use kb::{
    FakeKnowledgeBaseClient, HttpKnowledgeBaseClient, HttpKnowledgeBaseClientConfig,
};
pub use tts::{FakeSpeechClient, HttpSpeechClient, HttpSpeechClientConfig};
