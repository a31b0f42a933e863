//! In-memory chat history implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use chathistory_core::{ChatMessage, ChatMessageHistory, Result};

/// Process-local table of conversations, keyed by primary key value.
///
/// Cloning shares the underlying rows. Data is not persisted and is lost when
/// the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    rows: Arc<RwLock<HashMap<String, Vec<ChatMessage>>>>,
}

impl InMemoryTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a history bound to one conversation in this table.
    pub fn history(&self, primary_key_value: impl Into<String>) -> InMemoryChatHistory {
        InMemoryChatHistory {
            table: self.clone(),
            primary_key_value: primary_key_value.into(),
        }
    }

    /// Number of conversations with at least one message.
    pub async fn conversation_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

/// In-memory history for one conversation.
///
/// Mirrors the DynamoDB backend: appends create the row on demand and
/// `clear` empties the whole table.
#[derive(Debug, Clone)]
pub struct InMemoryChatHistory {
    table: InMemoryTable,
    primary_key_value: String,
}

impl InMemoryChatHistory {
    /// Creates a history in a fresh, unshared table.
    pub fn new(primary_key_value: impl Into<String>) -> Self {
        InMemoryTable::new().history(primary_key_value)
    }

    pub fn primary_key_value(&self) -> &str {
        &self.primary_key_value
    }

    pub fn table(&self) -> &InMemoryTable {
        &self.table
    }
}

#[async_trait]
impl ChatMessageHistory for InMemoryChatHistory {
    async fn add_message(&self, message: &ChatMessage) -> Result<()> {
        let mut rows = self.table.rows.write().await;
        rows.entry(self.primary_key_value.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .get(&self.primary_key_value)
            .cloned()
            .unwrap_or_default())
    }

    /// Empties the whole table, not only this conversation.
    async fn clear(&self) -> Result<()> {
        let mut rows = self.table.rows.write().await;
        tracing::debug!(conversations = rows.len(), "Clearing in-memory table");
        rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_conversation() {
        let history = InMemoryChatHistory::new("42");
        assert!(history.messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_and_ai_messages() {
        let history = InMemoryTable::new().history("42");

        history.add_user_message("hi").await.unwrap();
        history.add_ai_message("hello!").await.unwrap();

        assert_eq!(
            history.messages().await.unwrap(),
            vec![ChatMessage::human("hi"), ChatMessage::ai("hello!")]
        );
    }

    #[tokio::test]
    async fn test_last_message_has_added_role() {
        let history = InMemoryChatHistory::new("42");

        history.add_user_message("question").await.unwrap();
        let last = history.messages().await.unwrap().pop().unwrap();
        assert_eq!(last, ChatMessage::human("question"));

        history.add_ai_message("answer").await.unwrap();
        let last = history.messages().await.unwrap().pop().unwrap();
        assert_eq!(last, ChatMessage::ai("answer"));
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let history = InMemoryChatHistory::new("42");
        let expected = vec![
            ChatMessage::human("m1"),
            ChatMessage::ai("m2"),
            ChatMessage::human("m3"),
        ];

        for message in &expected {
            history.add_message(message).await.unwrap();
        }

        assert_eq!(history.messages().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let history = InMemoryChatHistory::new("42");
        history.add_user_message("hi").await.unwrap();

        let first = history.messages().await.unwrap();
        let second = history.messages().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicates_are_appended() {
        let history = InMemoryChatHistory::new("42");
        history.add_user_message("again").await.unwrap();
        history.add_user_message("again").await.unwrap();

        assert_eq!(history.messages().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_set_messages_matches_sequential_adds() {
        let table = InMemoryTable::new();
        let via_set = table.history("a");
        let via_add = table.history("b");
        let messages = vec![ChatMessage::human("a"), ChatMessage::ai("b")];

        via_set.set_messages(&messages).await.unwrap();
        for message in &messages {
            via_add.add_message(message).await.unwrap();
        }

        assert_eq!(
            via_set.messages().await.unwrap(),
            via_add.messages().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let table = InMemoryTable::new();
        let first = table.history("42");
        let second = table.history("43");

        first.add_user_message("hi").await.unwrap();

        assert!(second.messages().await.unwrap().is_empty());
        assert_eq!(table.conversation_count().await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_every_conversation() {
        let table = InMemoryTable::new();
        let first = table.history("42");
        let second = table.history("43");

        first.add_user_message("hi").await.unwrap();
        second.add_ai_message("hello!").await.unwrap();

        first.clear().await.unwrap();

        assert!(first.messages().await.unwrap().is_empty());
        assert!(second.messages().await.unwrap().is_empty());
        assert_eq!(table.conversation_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let table = InMemoryTable::new();
        let mut handles = Vec::new();

        for i in 0..16 {
            let history = table.history("42");
            handles.push(tokio::spawn(async move {
                history.add_user_message(&format!("m{i}")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(table.history("42").messages().await.unwrap().len(), 16);
    }
}
