//! Error types for DynamoDB table management.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur while managing the chat history table.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' is keyed by '{existing}', expected '{expected}'")]
    KeyMismatch {
        table_name: String,
        existing: String,
        expected: String,
    },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table '{0}' to become active")]
    TableActivationTimeout(String),

    #[error("Timeout waiting for table '{0}' to be deleted")]
    TableDeletionTimeout(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
