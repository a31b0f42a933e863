mod error;
mod traits;

pub use error::{BoxError, HistoryError, Result, StoreErrorKind};
pub use traits::ChatMessageHistory;
