//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionManagerPort;
use crate::application::queries::session_queries::GetTurnAudioQuery;

/// 获取轮次音频响应
#[derive(Debug, Clone)]
pub struct GetTurnAudioResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

/// GetTurnAudio Handler - 获取轮次音频数据（用于播放）
pub struct GetTurnAudioHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetTurnAudioHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        query: GetTurnAudioQuery,
    ) -> Result<GetTurnAudioResponse, ApplicationError> {
        let clip = self
            .session_manager
            .turn_audio(&query.session_id, query.turn_id)?
            .ok_or_else(|| {
                ApplicationError::not_found("Audio", query.turn_id.to_string())
            })?;

        Ok(GetTurnAudioResponse {
            content_type: clip.format.content_type().to_string(),
            audio_data: clip.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Session;
    use crate::domain::conversation::{
        Answer, AudioClip, AudioFormat, ConversationTurn, Language, QueryText,
    };
    use crate::infrastructure::memory::InMemorySessionManager;

    #[tokio::test]
    async fn test_get_turn_audio() {
        let manager = Arc::new(InMemorySessionManager::new());
        let session_id = manager
            .create(Session::new(Language::English, 0))
            .unwrap();

        let turn = ConversationTurn::answered(
            QueryText::new("question").unwrap(),
            Language::English,
            Answer::new("answer"),
            vec![],
            Some(AudioClip::new(vec![7, 8, 9], AudioFormat::Mp3, "Aditi")),
        );
        let turn_id = turn.id;
        manager.append_turn(&session_id, turn).unwrap();

        let handler = GetTurnAudioHandler::new(manager);
        let response = handler
            .handle(GetTurnAudioQuery {
                session_id,
                turn_id,
            })
            .await
            .unwrap();

        assert_eq!(response.audio_data, vec![7, 8, 9]);
        assert_eq!(response.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_turn_without_audio_is_not_found() {
        let manager = Arc::new(InMemorySessionManager::new());
        let session_id = manager
            .create(Session::new(Language::English, 0))
            .unwrap();

        let turn = ConversationTurn::answered(
            QueryText::new("question").unwrap(),
            Language::English,
            Answer::new("answer"),
            vec![],
            None,
        );
        let turn_id = turn.id;
        manager.append_turn(&session_id, turn).unwrap();

        let handler = GetTurnAudioHandler::new(manager);
        let result = handler
            .handle(GetTurnAudioQuery {
                session_id,
                turn_id,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
