//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod knowledge_base;
mod session_manager;
mod speech_synthesizer;

pub use knowledge_base::{
    KnowledgeBaseError, KnowledgeBasePort, RetrieveRequest, RetrieveResponse,
};
pub use session_manager::{Session, SessionError, SessionManagerPort};
pub use speech_synthesizer::{
    SpeechError, SpeechSynthesizerPort, SynthesizeRequest, SynthesizeResponse,
};
