mod history;

pub use history::{InMemoryChatHistory, InMemoryTable};
