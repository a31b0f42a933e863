use std::time::Duration;

use aws_sdk_dynamodb::Client;
use chathistory_core::{HistoryError, Result};

/// What to do with a stored message whose `type` is not a known role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownRolePolicy {
    /// Drop the message and keep reading (default).
    #[default]
    Skip,
    /// Fail the read with a serialization error.
    Reject,
}

/// Construction options for `DynamoDbChatHistory`.
///
/// Table name, primary key name and primary key value are required. The
/// remaining options only apply when no client is supplied, except for
/// `unknown_roles`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Target table.
    pub table_name: String,
    /// Attribute name of the table's partition key.
    pub primary_key_name: String,
    /// Partition key value identifying the conversation.
    pub primary_key_value: String,
    /// Pre-built client. When absent one is built from ambient configuration.
    pub client: Option<Client>,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    pub endpoint_url: Option<String>,
    /// Per-operation timeout applied to a constructed client.
    pub operation_timeout: Option<Duration>,
    pub unknown_roles: UnknownRolePolicy,
}

impl ConfigOptions {
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_primary_key_name(mut self, primary_key_name: impl Into<String>) -> Self {
        self.primary_key_name = primary_key_name.into();
        self
    }

    pub fn with_primary_key_value(mut self, primary_key_value: impl Into<String>) -> Self {
        self.primary_key_value = primary_key_value.into();
        self
    }

    /// Uses an existing client instead of building one.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    pub fn with_unknown_roles(mut self, policy: UnknownRolePolicy) -> Self {
        self.unknown_roles = policy;
        self
    }

    /// Checks that every required option is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("table name", &self.table_name),
            ("primary key name", &self.primary_key_name),
            ("primary key value", &self.primary_key_value),
        ];

        for (name, value) in required {
            if value.is_empty() {
                return Err(HistoryError::Configuration(format!("{name} is required")));
            }
        }

        Ok(())
    }
}
