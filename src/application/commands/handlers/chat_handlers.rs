//! Chat Command Handlers
//!
//! 提问的编排核心：验证 → 组合查询 → 检索生成 → 语音合成 → 记录轮次。
//! 三步上游调用严格串行，彼此之间无重试、无并发。

use std::sync::Arc;

use crate::application::commands::chat_commands::{AskQuestionCommand, AskQuestionResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    KnowledgeBasePort, RetrieveRequest, SessionManagerPort, SpeechSynthesizerPort,
    SynthesizeRequest,
};
use crate::domain::conversation::{Answer, AudioClip, ConversationTurn, QueryText};

/// 提问处理器的上游参数（来自配置）
#[derive(Debug, Clone)]
pub struct ChatUpstreamConfig {
    /// 知识库 ID
    pub knowledge_base_id: String,
    /// 生成模型 ARN
    pub model_arn: String,
    /// 语音合成音色 ID
    pub voice_id: String,
}

/// AskQuestion Handler - 提问编排
///
/// 执行顺序（严格串行）：
/// 1. 验证问题非空（任何网络调用之前）
/// 2. 解析会话与语言，组合查询
/// 3. 调用检索生成服务；失败则记录失败轮次并跳过合成
/// 4. 调用语音合成服务；失败不影响答案与引用（部分失败）
/// 5. 追加轮次到会话历史
pub struct AskQuestionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    knowledge_base: Arc<dyn KnowledgeBasePort>,
    speech: Arc<dyn SpeechSynthesizerPort>,
    upstream: ChatUpstreamConfig,
}

impl AskQuestionHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        knowledge_base: Arc<dyn KnowledgeBasePort>,
        speech: Arc<dyn SpeechSynthesizerPort>,
        upstream: ChatUpstreamConfig,
    ) -> Self {
        Self {
            session_manager,
            knowledge_base,
            speech,
            upstream,
        }
    }

    pub async fn handle(
        &self,
        cmd: AskQuestionCommand,
    ) -> Result<AskQuestionResponse, ApplicationError> {
        // 验证问题非空（在任何网络调用之前）
        let question = QueryText::new(cmd.question).map_err(ApplicationError::validation)?;

        // 解析语言：命令指定时更新会话语言，否则沿用会话当前语言
        let language = match cmd.language {
            Some(language) => {
                self.session_manager
                    .update_language(&cmd.session_id, language)?;
                language
            }
            None => self.session_manager.language(&cmd.session_id)?,
        };
        self.session_manager.touch(&cmd.session_id);

        // 组合查询：问题 + 语言指令后缀
        let composed = language.compose_query(&question);

        tracing::info!(
            session_id = %cmd.session_id,
            language = %language,
            question_len = question.as_str().len(),
            "Querying knowledge base"
        );

        let retrieve = self
            .knowledge_base
            .retrieve_and_generate(RetrieveRequest {
                query: composed,
                knowledge_base_id: self.upstream.knowledge_base_id.clone(),
                model_arn: self.upstream.model_arn.clone(),
            })
            .await;

        let response = match retrieve {
            Err(e) => {
                // 生成失败：记录失败轮次，不调用语音合成，会话继续存活
                let error = e.to_string();
                tracing::error!(
                    session_id = %cmd.session_id,
                    error = %error,
                    "Knowledge base query failed"
                );

                let turn = ConversationTurn::failed(question, language, error.clone());
                let turn_id = turn.id;
                self.session_manager.append_turn(&cmd.session_id, turn)?;

                AskQuestionResponse {
                    session_id: cmd.session_id,
                    turn_id,
                    language,
                    status: "failed".to_string(),
                    answer: None,
                    citations: Vec::new(),
                    has_audio: false,
                    error: Some(error),
                }
            }
            Ok(generated) => {
                tracing::info!(
                    session_id = %cmd.session_id,
                    upstream_session_id = %generated.upstream_session_id,
                    answer_len = generated.answer_text.len(),
                    citations = generated.citations.len(),
                    "Knowledge base query completed"
                );

                // 语音合成：失败为非致命（部分失败），答案与引用照常返回
                let audio = match self
                    .speech
                    .synthesize(SynthesizeRequest {
                        text: generated.answer_text.clone(),
                        voice_id: self.upstream.voice_id.clone(),
                        language_code: language.language_code().to_string(),
                    })
                    .await
                {
                    Ok(synthesized) => {
                        tracing::info!(
                            session_id = %cmd.session_id,
                            audio_size = synthesized.audio_data.len(),
                            format = synthesized.format.as_str(),
                            "Speech synthesis completed"
                        );
                        Some(AudioClip::new(
                            synthesized.audio_data,
                            synthesized.format,
                            self.upstream.voice_id.clone(),
                        ))
                    }
                    Err(e) => {
                        tracing::warn!(
                            session_id = %cmd.session_id,
                            error = %e,
                            "Speech synthesis failed, answer remains available"
                        );
                        None
                    }
                };

                let turn = ConversationTurn::answered(
                    question,
                    language,
                    Answer::new(generated.answer_text.clone()),
                    generated.citations.clone(),
                    audio,
                );
                let turn_id = turn.id;
                let status = turn.status().to_string();
                let has_audio = turn.has_audio();
                self.session_manager.append_turn(&cmd.session_id, turn)?;

                AskQuestionResponse {
                    session_id: cmd.session_id,
                    turn_id,
                    language,
                    status,
                    answer: Some(generated.answer_text),
                    citations: generated.citations,
                    has_audio,
                    error: None,
                }
            }
        };

        Ok(response)
    }
}
