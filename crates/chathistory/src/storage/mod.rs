//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `ChatMessageHistory`
//! trait defined in `chathistory_core`. The implementations are selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): process-local backend with the same semantics
//!
//! Both can be enabled at once.
//!
//! # Examples
//!
//! Build with DynamoDB only:
//! ```bash
//! cargo build -p chathistory --no-default-features --features dynamodb
//! ```

#[cfg(not(any(feature = "dynamodb", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'dynamodb' or 'inmemory' feature. \
    Example: cargo build -p chathistory --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbChatHistory;

#[cfg(feature = "inmemory")]
pub use inmemory::{InMemoryChatHistory, InMemoryTable};
