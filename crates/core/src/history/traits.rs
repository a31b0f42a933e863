use async_trait::async_trait;

use crate::message::ChatMessage;

use super::Result;

/// Durable, appendable history for one conversation.
///
/// Implementations are bound to a single conversation at construction; the
/// methods take no conversation identifier.
#[async_trait]
pub trait ChatMessageHistory: Send + Sync {
    /// Appends one message to the end of the conversation.
    async fn add_message(&self, message: &ChatMessage) -> Result<()>;

    /// Appends a user message.
    async fn add_user_message(&self, text: &str) -> Result<()> {
        self.add_message(&ChatMessage::human(text)).await
    }

    /// Appends a model message.
    async fn add_ai_message(&self, text: &str) -> Result<()> {
        self.add_message(&ChatMessage::ai(text)).await
    }

    /// Appends each message in order, one call per message.
    ///
    /// Not atomic. The first failure is returned and the remaining messages
    /// are not written; messages already appended stay.
    async fn set_messages(&self, messages: &[ChatMessage]) -> Result<()> {
        for message in messages {
            self.add_message(message).await?;
        }
        Ok(())
    }

    /// Returns every stored message in conversation order.
    async fn messages(&self) -> Result<Vec<ChatMessage>>;

    /// Removes stored history. See the implementation for its scope.
    async fn clear(&self) -> Result<()>;
}
