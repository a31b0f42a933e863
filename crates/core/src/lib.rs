//! Core types for chathistory.
//!
//! Everything in this crate is backend-agnostic and free of I/O: the message
//! model, the `ChatMessageHistory` trait that storage backends implement, and
//! the error type they return.

pub mod history;
pub mod message;

pub use history::{ChatMessageHistory, HistoryError, Result, StoreErrorKind};
pub use message::{ChatMessage, MessageRole, UnknownRole};
