//! Durable, appendable chat message history.
//!
//! A conversation is stored as one row of a DynamoDB table; its messages are
//! a list attribute appended to atomically. Histories implement
//! [`ChatMessageHistory`] so pipelines can swap backends.
//!
//! ```no_run
//! use chathistory::{ChatMessageHistory, ConfigOptions, DynamoDbChatHistory};
//!
//! # async fn run() -> chathistory::Result<()> {
//! let history = DynamoDbChatHistory::new(
//!     "us-east-1",
//!     ConfigOptions::default()
//!         .with_table_name("T")
//!         .with_primary_key_name("chat_id")
//!         .with_primary_key_value("42"),
//! )
//! .await?;
//!
//! history.add_user_message("hi").await?;
//! history.add_ai_message("hello!").await?;
//! let messages = history.messages().await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "dynamodb")]
pub mod config;
pub mod storage;

pub use chathistory_core::{
    ChatMessage, ChatMessageHistory, HistoryError, MessageRole, Result, StoreErrorKind,
};

#[cfg(feature = "dynamodb")]
pub use config::{ConfigOptions, UnknownRolePolicy};

#[cfg(feature = "dynamodb")]
pub use storage::DynamoDbChatHistory;

#[cfg(feature = "inmemory")]
pub use storage::{InMemoryChatHistory, InMemoryTable};
