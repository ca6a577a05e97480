//! Conversation Context - History
//!
//! 会话历史：内存中的有序轮次列表。
//! 生命周期：会话创建时建立，显式清空或会话结束时丢弃。

use uuid::Uuid;

use super::entities::ConversationTurn;

/// 会话历史
///
/// 有序的轮次列表，仅保存在内存中。可选的轮次上限用于限制
/// 单个会话占用的内存（音频字节保存在轮次上）。
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
    /// 保留的最大轮次数，0 表示不限制
    max_turns: usize,
}

impl ConversationHistory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Vec::new(),
            max_turns,
        }
    }

    /// 追加轮次；超出上限时丢弃最旧的轮次
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if self.max_turns > 0 && self.turns.len() > self.max_turns {
            let overflow = self.turns.len() - self.max_turns;
            self.turns.drain(..overflow);
        }
    }

    /// 清空历史，返回清除的轮次数
    pub fn clear(&mut self) -> usize {
        let cleared = self.turns.len();
        self.turns.clear();
        cleared
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn find_turn(&self, turn_id: Uuid) -> Option<&ConversationTurn> {
        self.turns.iter().find(|t| t.id == turn_id)
    }

    /// 最新一个轮次
    pub fn latest(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{Answer, Language, QueryText};

    fn turn(text: &str) -> ConversationTurn {
        ConversationTurn::answered(
            QueryText::new(text).unwrap(),
            Language::English,
            Answer::new("answer"),
            vec![],
            None,
        )
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = ConversationHistory::new(0);
        history.append(turn("first"));
        history.append(turn("second"));
        history.append(turn("third"));

        let questions: Vec<&str> = history
            .turns()
            .iter()
            .map(|t| t.question.as_str())
            .collect();
        assert_eq!(questions, vec!["first", "second", "third"]);
        assert_eq!(history.latest().unwrap().question.as_str(), "third");
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = ConversationHistory::new(0);
        for i in 0..5 {
            history.append(turn(&format!("question {}", i)));
        }
        assert_eq!(history.len(), 5);

        let cleared = history.clear();
        assert_eq!(cleared, 5);
        assert!(history.is_empty());

        // 再次清空仍然为空
        assert_eq!(history.clear(), 0);
        assert!(history.is_empty());
    }

    #[test]
    fn test_max_turns_drops_oldest() {
        let mut history = ConversationHistory::new(2);
        history.append(turn("first"));
        history.append(turn("second"));
        history.append(turn("third"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].question.as_str(), "second");
        assert_eq!(history.turns()[1].question.as_str(), "third");
    }

    #[test]
    fn test_find_turn() {
        let mut history = ConversationHistory::new(0);
        let t = turn("findable");
        let id = t.id;
        history.append(t);

        assert!(history.find_turn(id).is_some());
        assert!(history.find_turn(uuid::Uuid::new_v4()).is_none());
    }
}
