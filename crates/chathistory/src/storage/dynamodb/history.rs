//! DynamoDB chat history implementation.
//!
//! Implements `ChatMessageHistory` from `chathistory_core` using one row per
//! conversation.

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;

use chathistory_core::{ChatMessage, ChatMessageHistory, HistoryError, Result, StoreErrorKind};

use super::conversions::{append_attribute_values, item_to_messages};
use super::error::{map_delete_table_error, map_get_item_error, map_update_item_error};
use super::keys;
use crate::config::{ConfigOptions, UnknownRolePolicy};

/// DynamoDB-backed history for one conversation.
///
/// The conversation is the row keyed by `{primary_key_name: primary_key_value}`
/// in `table_name`; its messages live in a single list attribute.
#[derive(Debug, Clone)]
pub struct DynamoDbChatHistory {
    client: Client,
    table_name: String,
    primary_key_name: String,
    primary_key_value: String,
    unknown_roles: UnknownRolePolicy,
}

impl DynamoDbChatHistory {
    /// Creates a history from options.
    ///
    /// When `options.client` is absent a client is built from the AWS default
    /// credential chain for `region`. Credentials are resolved lazily, so a
    /// missing credential surfaces as a store error on the first call.
    pub async fn new(region: impl Into<String>, options: ConfigOptions) -> Result<Self> {
        options.validate()?;

        let ConfigOptions {
            table_name,
            primary_key_name,
            primary_key_value,
            client,
            endpoint_url,
            operation_timeout,
            unknown_roles,
        } = options;

        let client = match client {
            Some(client) => client,
            None => {
                let region = region.into();
                if region.is_empty() {
                    return Err(HistoryError::Configuration(
                        "region is required when no client is supplied".to_string(),
                    ));
                }

                let mut loader =
                    aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region));
                if let Some(endpoint) = endpoint_url {
                    loader = loader.endpoint_url(endpoint);
                }
                if let Some(timeout) = operation_timeout {
                    loader = loader.timeout_config(
                        TimeoutConfig::builder().operation_timeout(timeout).build(),
                    );
                }

                Client::new(&loader.load().await)
            }
        };

        Ok(Self {
            client,
            table_name,
            primary_key_name,
            primary_key_value,
            unknown_roles,
        })
    }

    /// Creates a history around an existing client.
    pub fn with_client(
        client: Client,
        table_name: impl Into<String>,
        primary_key_name: impl Into<String>,
        primary_key_value: impl Into<String>,
    ) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            primary_key_name: primary_key_name.into(),
            primary_key_value: primary_key_value.into(),
            unknown_roles: UnknownRolePolicy::default(),
        }
    }

    /// Sets how unknown stored roles are handled on read.
    pub fn with_unknown_roles(mut self, policy: UnknownRolePolicy) -> Self {
        self.unknown_roles = policy;
        self
    }

    /// Returns a handle for another conversation in the same table.
    pub fn for_conversation(&self, primary_key_value: impl Into<String>) -> Self {
        Self {
            primary_key_value: primary_key_value.into(),
            ..self.clone()
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key_name
    }

    pub fn primary_key_value(&self) -> &str {
        &self.primary_key_value
    }

    pub fn unknown_roles(&self) -> UnknownRolePolicy {
        self.unknown_roles
    }
}

#[async_trait]
impl ChatMessageHistory for DynamoDbChatHistory {
    async fn add_message(&self, message: &ChatMessage) -> Result<()> {
        tracing::debug!(
            table = %self.table_name,
            key = %self.primary_key_value,
            role = %message.role,
            "Appending message"
        );

        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(
                &self.primary_key_name,
                &self.primary_key_value,
            )))
            .update_expression(keys::APPEND_MESSAGE_EXPRESSION)
            .set_expression_attribute_names(Some(keys::messages_attribute_names()))
            .set_expression_attribute_values(Some(append_attribute_values(message)))
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }

    async fn messages(&self) -> Result<Vec<ChatMessage>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(keys::primary_key(
                &self.primary_key_name,
                &self.primary_key_value,
            )))
            .projection_expression(keys::MESSAGES_PROJECTION)
            .set_expression_attribute_names(Some(keys::messages_attribute_names()))
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let err = map_get_item_error(err);
                // A cleared table has no rows.
                if err.store_kind() == Some(StoreErrorKind::TableNotFound) {
                    tracing::debug!(table = %self.table_name, "Table not found, no history");
                    return Ok(Vec::new());
                }
                return Err(err);
            }
        };

        let messages = match output.item {
            Some(item) => item_to_messages(&item, self.unknown_roles)?,
            None => Vec::new(),
        };

        tracing::debug!(
            table = %self.table_name,
            key = %self.primary_key_value,
            count = messages.len(),
            "Loaded messages"
        );

        Ok(messages)
    }

    /// Deletes the whole table.
    ///
    /// This removes the history of every conversation stored in the table,
    /// not only this one. The table must be re-created before further appends.
    async fn clear(&self) -> Result<()> {
        tracing::warn!(table = %self.table_name, "Deleting chat history table");

        self.client
            .delete_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_delete_table_error)?;

        Ok(())
    }
}
