//! Table configuration types (Functional Core - pure data).

/// Default table name for `cargo xtask dynamodb deploy`.
pub const DEFAULT_TABLE_NAME: &str = "chathistory";

/// Default partition key attribute name.
pub const DEFAULT_PRIMARY_KEY_NAME: &str = "chat_id";

/// Table schema configuration.
///
/// A chat history table has a single string partition key and no sort key;
/// each conversation is one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub primary_key_name: String,
    pub billing_mode: BillingMode,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl BillingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingMode::PayPerRequest => "PAY_PER_REQUEST",
        }
    }
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Sets the partition key attribute name.
    pub fn with_primary_key_name(mut self, name: &str) -> Self {
        self.primary_key_name = name.to_string();
        self
    }
}

/// Returns the default chat history table configuration.
pub fn chathistory_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        primary_key_name: DEFAULT_PRIMARY_KEY_NAME.to_string(),
        billing_mode: BillingMode::PayPerRequest,
    }
}
