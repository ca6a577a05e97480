//! Session Command Handlers

use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{Session, SessionManagerPort};

/// OpenSession Handler - 开启新会话
pub struct OpenSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    /// 单个会话保留的最大轮次数，0 表示不限制
    max_turns: usize,
}

impl OpenSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>, max_turns: usize) -> Self {
        Self {
            session_manager,
            max_turns,
        }
    }

    pub async fn handle(
        &self,
        cmd: OpenSessionCommand,
    ) -> Result<OpenSessionResponse, ApplicationError> {
        let session = Session::new(cmd.language, self.max_turns);
        let session_id = self.session_manager.create(session)?;

        tracing::info!(
            session_id = %session_id,
            language = %cmd.language,
            "Session opened"
        );

        Ok(OpenSessionResponse {
            session_id,
            language: cmd.language,
        })
    }
}

/// ChangeLanguage Handler - 切换会话的回答语言
pub struct ChangeLanguageHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl ChangeLanguageHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        cmd: ChangeLanguageCommand,
    ) -> Result<ChangeLanguageResponse, ApplicationError> {
        self.session_manager
            .update_language(&cmd.session_id, cmd.language)?;

        tracing::info!(
            session_id = %cmd.session_id,
            language = %cmd.language,
            "Session language changed"
        );

        Ok(ChangeLanguageResponse {
            session_id: cmd.session_id,
            language: cmd.language,
        })
    }
}

/// ClearHistory Handler - 清空会话历史
pub struct ClearHistoryHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl ClearHistoryHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        cmd: ClearHistoryCommand,
    ) -> Result<ClearHistoryResponse, ApplicationError> {
        let cleared_turns = self.session_manager.clear_history(&cmd.session_id)?;

        tracing::info!(
            session_id = %cmd.session_id,
            cleared_turns = cleared_turns,
            "Session history cleared"
        );

        Ok(ClearHistoryResponse {
            session_id: cmd.session_id,
            cleared_turns,
        })
    }
}

/// CloseSession Handler - 关闭会话
pub struct CloseSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl CloseSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        cmd: CloseSessionCommand,
    ) -> Result<CloseSessionResponse, ApplicationError> {
        self.session_manager.close(&cmd.session_id)?;

        tracing::info!(session_id = %cmd.session_id, "Session closed");

        Ok(CloseSessionResponse {
            session_id: cmd.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Language;
    use crate::infrastructure::memory::InMemorySessionManager;

    #[tokio::test]
    async fn test_open_and_close_session() {
        let manager = Arc::new(InMemorySessionManager::new());
        let open = OpenSessionHandler::new(manager.clone(), 0);
        let close = CloseSessionHandler::new(manager.clone());

        let opened = open
            .handle(OpenSessionCommand {
                language: Language::Hindi,
            })
            .await
            .unwrap();
        assert_eq!(opened.language, Language::Hindi);
        assert_eq!(manager.language(&opened.session_id).unwrap(), Language::Hindi);

        close
            .handle(CloseSessionCommand {
                session_id: opened.session_id.clone(),
            })
            .await
            .unwrap();
        assert!(manager.language(&opened.session_id).is_err());
    }

    #[tokio::test]
    async fn test_change_language() {
        let manager = Arc::new(InMemorySessionManager::new());
        let open = OpenSessionHandler::new(manager.clone(), 0);
        let change = ChangeLanguageHandler::new(manager.clone());

        let opened = open
            .handle(OpenSessionCommand {
                language: Language::English,
            })
            .await
            .unwrap();

        let changed = change
            .handle(ChangeLanguageCommand {
                session_id: opened.session_id.clone(),
                language: Language::Bengali,
            })
            .await
            .unwrap();
        assert_eq!(changed.language, Language::Bengali);
        assert_eq!(
            manager.language(&opened.session_id).unwrap(),
            Language::Bengali
        );
    }

    #[tokio::test]
    async fn test_clear_history_on_unknown_session() {
        let manager = Arc::new(InMemorySessionManager::new());
        let clear = ClearHistoryHandler::new(manager);

        let result = clear
            .handle(ClearHistoryCommand {
                session_id: "missing".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
