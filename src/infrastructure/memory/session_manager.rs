//! In-Memory Session Manager Implementation

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{Session, SessionError, SessionManagerPort};
use crate::domain::conversation::{AudioClip, ConversationTurn, Language};

/// 内存会话管理器
pub struct InMemorySessionManager {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManagerPort for InMemorySessionManager {
    fn create(&self, session: Session) -> Result<String, SessionError> {
        let session_id = session.id.clone();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionError::AlreadyExists(session_id));
        }
        self.sessions.insert(session_id.clone(), session);
        tracing::info!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    fn language(&self, id: &str) -> Result<Language, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.language)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn update_language(&self, id: &str, language: Language) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.language = language;
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, language = language.as_str(), "Session language updated");
        Ok(())
    }

    fn append_turn(&self, id: &str, turn: ConversationTurn) -> Result<(), SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        session.history.append(turn);
        session.last_activity = Utc::now();
        tracing::debug!(session_id = %id, turns = session.history.len(), "Turn appended");
        Ok(())
    }

    fn clear_history(&self, id: &str) -> Result<usize, SessionError> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let cleared = session.history.clear();
        session.last_activity = Utc::now();
        tracing::info!(session_id = %id, cleared = cleared, "Session history cleared");
        Ok(cleared)
    }

    fn history_snapshot(&self, id: &str) -> Result<Vec<ConversationTurn>, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.history.turns().to_vec())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn turn_audio(&self, id: &str, turn_id: Uuid) -> Result<Option<AudioClip>, SessionError> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        let turn = session
            .history
            .find_turn(turn_id)
            .ok_or_else(|| SessionError::TurnNotFound(turn_id.to_string()))?;
        Ok(turn.audio().cloned())
    }

    fn close(&self, id: &str) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Session closed");
            })
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn touch(&self, id: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.last_activity = Utc::now();
        }
    }

    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String> {
        let now = Utc::now();
        let timeout = chrono::Duration::seconds(idle_timeout_secs as i64);

        self.sessions
            .iter()
            .filter_map(|entry| {
                let elapsed = now - entry.last_activity;
                if elapsed > timeout {
                    Some(entry.key().clone())
                } else {
                    None
                }
            })
            .collect()
    }

    fn list_all(&self) -> Vec<String> {
        self.sessions.iter().map(|e| e.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Answer, QueryText};

    fn sample_turn(question: &str) -> ConversationTurn {
        ConversationTurn::answered(
            QueryText::new(question).unwrap(),
            Language::Hindi,
            Answer::new("एक उत्तर"),
            vec![],
            None,
        )
    }

    #[test]
    fn test_session_lifecycle() {
        let manager = InMemorySessionManager::new();
        let session = Session::new(Language::English, 0);
        let session_id = session.id.clone();

        // Create
        let result = manager.create(session);
        assert!(result.is_ok());

        // Language
        assert_eq!(manager.language(&session_id).unwrap(), Language::English);

        // Update language
        manager
            .update_language(&session_id, Language::Tamil)
            .unwrap();
        assert_eq!(manager.language(&session_id).unwrap(), Language::Tamil);

        // Close
        let result = manager.close(&session_id);
        assert!(result.is_ok());
        assert!(manager.language(&session_id).is_err());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let manager = InMemorySessionManager::new();
        let session = Session::new(Language::English, 0);
        let duplicate = session.clone();

        manager.create(session).unwrap();
        assert!(matches!(
            manager.create(duplicate),
            Err(SessionError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_append_and_clear_history() {
        let manager = InMemorySessionManager::new();
        let session = Session::new(Language::Hindi, 0);
        let session_id = session.id.clone();
        manager.create(session).unwrap();

        manager
            .append_turn(&session_id, sample_turn("पहला सवाल"))
            .unwrap();
        manager
            .append_turn(&session_id, sample_turn("दूसरा सवाल"))
            .unwrap();

        let snapshot = manager.history_snapshot(&session_id).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].question.as_str(), "पहला सवाल");

        let cleared = manager.clear_history(&session_id).unwrap();
        assert_eq!(cleared, 2);
        assert!(manager.history_snapshot(&session_id).unwrap().is_empty());

        // 清空后会话仍然可用
        manager
            .append_turn(&session_id, sample_turn("तीसरा सवाल"))
            .unwrap();
        assert_eq!(manager.history_snapshot(&session_id).unwrap().len(), 1);
    }

    #[test]
    fn test_turn_audio_lookup() {
        let manager = InMemorySessionManager::new();
        let session = Session::new(Language::English, 0);
        let session_id = session.id.clone();
        manager.create(session).unwrap();

        let turn = sample_turn("a question");
        let turn_id = turn.id;
        manager.append_turn(&session_id, turn).unwrap();

        // 轮次存在但没有音频
        assert!(manager.turn_audio(&session_id, turn_id).unwrap().is_none());

        // 未知轮次
        assert!(matches!(
            manager.turn_audio(&session_id, Uuid::new_v4()),
            Err(SessionError::TurnNotFound(_))
        ));
    }

    #[test]
    fn test_expired_sessions() {
        let manager = InMemorySessionManager::new();
        let session = Session::new(Language::English, 0);
        let session_id = session.id.clone();
        manager.create(session).unwrap();

        // 刚创建的会话不会立即过期
        assert!(manager.get_expired_sessions(3600).is_empty());

        // 超时为零时一切都过期
        if let Some(mut s) = manager.sessions.get_mut(&session_id) {
            s.last_activity = Utc::now() - chrono::Duration::seconds(10);
        }
        assert_eq!(manager.get_expired_sessions(5), vec![session_id]);
    }
}
