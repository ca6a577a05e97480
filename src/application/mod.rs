//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（KnowledgeBase、SpeechSynthesizer、SessionManager）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Chat commands
    AskQuestionCommand,
    AskQuestionResponse,
    // Session commands
    ChangeLanguageCommand,
    ChangeLanguageResponse,
    ClearHistoryCommand,
    ClearHistoryResponse,
    CloseSessionCommand,
    CloseSessionResponse,
    OpenSessionCommand,
    OpenSessionResponse,
    // Handlers
    handlers::{
        AskQuestionHandler, ChangeLanguageHandler, ChatUpstreamConfig, ClearHistoryHandler,
        CloseSessionHandler, OpenSessionHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Knowledge base
    KnowledgeBaseError,
    KnowledgeBasePort,
    RetrieveRequest,
    RetrieveResponse,
    // Session manager
    Session,
    SessionError,
    SessionManagerPort,
    // Speech synthesizer
    SpeechError,
    SpeechSynthesizerPort,
    SynthesizeRequest,
    SynthesizeResponse,
};

pub use queries::{
    // Session queries
    GetHistoryQuery,
    GetTurnAudioQuery,
    ListLanguagesQuery,
    // Handlers
    handlers::{
        GetHistoryHandler, GetHistoryResponse, GetTurnAudioHandler, GetTurnAudioResponse,
        LanguageInfo, ListLanguagesHandler, TurnView,
    },
};
