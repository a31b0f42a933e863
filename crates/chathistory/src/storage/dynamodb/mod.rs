//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! `ChatMessageHistory` using `aws-sdk-dynamodb`. A conversation is one row;
//! its messages are a list attribute appended to with a single `UpdateItem`.

mod conversions;
mod error;
mod history;
mod keys;

pub use history::DynamoDbChatHistory;
pub use keys::{
    primary_key, APPEND_MESSAGE_EXPRESSION, CONTENT_FIELD, MESSAGES_ATTRIBUTE, TYPE_FIELD,
};
