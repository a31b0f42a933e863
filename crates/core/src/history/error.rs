use std::error::Error as StdError;

use thiserror::Error;

/// Boxed cause forwarded from a storage backend.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Coarse classification of a storage failure.
///
/// Backends derive the kind from the underlying client's error variants so
/// callers can pick a retry policy without depending on the backend crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The backing table does not exist.
    TableNotFound,
    /// The store rejected the request because of throughput or request limits.
    Throttled,
    /// The request never produced a response (timeout, connection failure).
    Transport,
    /// The store reported an internal error.
    Internal,
    /// Anything else: permissions, validation, malformed requests.
    Other,
}

impl StoreErrorKind {
    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreErrorKind::Throttled | StoreErrorKind::Transport | StoreErrorKind::Internal
        )
    }
}

/// Errors that can occur during chat history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{operation} failed: {source}")]
    Store {
        operation: &'static str,
        kind: StoreErrorKind,
        #[source]
        source: BoxError,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HistoryError {
    /// Wraps a backend failure without reinterpreting it.
    pub fn store(
        operation: &'static str,
        kind: StoreErrorKind,
        source: impl Into<BoxError>,
    ) -> Self {
        HistoryError::Store {
            operation,
            kind,
            source: source.into(),
        }
    }

    /// Returns the store classification, if this is a store failure.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            HistoryError::Store { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if the failure is transient. Nothing in this crate retries;
    /// this is for callers deciding their own policy.
    pub fn is_retryable(&self) -> bool {
        self.store_kind().is_some_and(|kind| kind.is_retryable())
    }
}

/// Result type for chat history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
