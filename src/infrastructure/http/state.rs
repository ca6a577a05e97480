//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AskQuestionHandler, ChangeLanguageHandler, ChatUpstreamConfig, ClearHistoryHandler,
    CloseSessionHandler, OpenSessionHandler,
    // Query handlers
    GetHistoryHandler, GetTurnAudioHandler, ListLanguagesHandler,
    // Ports
    KnowledgeBasePort, SessionManagerPort, SpeechSynthesizerPort,
};

/// 应用状态
///
/// SessionManager 为内存实现，上游服务通过 HTTP 适配器接入
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,
    pub knowledge_base: Arc<dyn KnowledgeBasePort>,
    pub speech: Arc<dyn SpeechSynthesizerPort>,

    // ========== Command Handlers ==========
    pub open_session_handler: OpenSessionHandler,
    pub change_language_handler: ChangeLanguageHandler,
    pub clear_history_handler: ClearHistoryHandler,
    pub close_session_handler: CloseSessionHandler,
    pub ask_question_handler: AskQuestionHandler,

    // ========== Query Handlers ==========
    pub get_history_handler: GetHistoryHandler,
    pub get_turn_audio_handler: GetTurnAudioHandler,
    pub list_languages_handler: ListLanguagesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        knowledge_base: Arc<dyn KnowledgeBasePort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
        upstream: ChatUpstreamConfig,
        max_turns: usize,
    ) -> Self {
        Self {
            // Ports
            session_manager: session_manager.clone(),
            knowledge_base: knowledge_base.clone(),
            speech: speech.clone(),

            // Command handlers
            open_session_handler: OpenSessionHandler::new(session_manager.clone(), max_turns),
            change_language_handler: ChangeLanguageHandler::new(session_manager.clone()),
            clear_history_handler: ClearHistoryHandler::new(session_manager.clone()),
            close_session_handler: CloseSessionHandler::new(session_manager.clone()),
            ask_question_handler: AskQuestionHandler::new(
                session_manager.clone(),
                knowledge_base.clone(),
                speech.clone(),
                upstream,
            ),

            // Query handlers
            get_history_handler: GetHistoryHandler::new(session_manager.clone()),
            get_turn_audio_handler: GetTurnAudioHandler::new(session_manager.clone()),
            list_languages_handler: ListLanguagesHandler::new(),
        }
    }
}
