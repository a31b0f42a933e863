use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The speaker of a message turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// A message written by the user.
    Human,
    /// A message produced by the model.
    Ai,
}

impl MessageRole {
    /// Returns the tag stored in the `type` field of a persisted message.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::Human => "human",
            MessageRole::Ai => "ai",
        }
    }

    /// Returns true if this is a user message.
    pub fn is_human(&self) -> bool {
        matches!(self, MessageRole::Human)
    }

    /// Returns true if this is a model message.
    pub fn is_ai(&self) -> bool {
        matches!(self, MessageRole::Ai)
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored `type` tag is not a known role.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown message role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for MessageRole {
    type Err = UnknownRole;

    /// Tags are matched exactly; `"Human"` is not `"human"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(MessageRole::Human),
            "ai" => Ok(MessageRole::Ai),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with the given role and content.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Human, content)
    }

    /// Creates a model message.
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Ai, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags() {
        assert_eq!(MessageRole::Human.as_str(), "human");
        assert_eq!(MessageRole::Ai.as_str(), "ai");
        assert_eq!(MessageRole::Ai.to_string(), "ai");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("human".parse::<MessageRole>(), Ok(MessageRole::Human));
        assert_eq!("ai".parse::<MessageRole>(), Ok(MessageRole::Ai));
        assert_eq!(
            "system".parse::<MessageRole>(),
            Err(UnknownRole("system".to_string()))
        );
    }

    #[test]
    fn test_role_from_str_is_case_sensitive() {
        assert!("Human".parse::<MessageRole>().is_err());
        assert!("AI".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_constructors() {
        let msg = ChatMessage::human("hi");
        assert!(msg.role.is_human());
        assert_eq!(msg.content, "hi");

        let msg = ChatMessage::ai("hello!");
        assert!(msg.role.is_ai());
        assert_eq!(msg.content, "hello!");
    }

    #[test]
    fn test_json_uses_stored_field_names() {
        let json = serde_json::to_value(ChatMessage::ai("hello!")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "ai", "content": "hello!"}));

        let parsed: ChatMessage =
            serde_json::from_str(r#"{"type":"human","content":"hi"}"#).unwrap();
        assert_eq!(parsed, ChatMessage::human("hi"));
    }

    #[test]
    fn test_unknown_role_display() {
        assert_eq!(
            UnknownRole("tool".to_string()).to_string(),
            "Unknown message role: tool"
        );
    }
}
