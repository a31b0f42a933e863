//! Attribute names, expression placeholders and key maps.
//!
//! Pure functions and constants describing the conversation row layout.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

// ============================================================================
// Row layout
// ============================================================================

/// List attribute holding the serialized conversation.
pub const MESSAGES_ATTRIBUTE: &str = "messages";

/// Role tag field inside each message map.
pub const TYPE_FIELD: &str = "type";

/// Text field inside each message map.
pub const CONTENT_FIELD: &str = "content";

// ============================================================================
// Expression placeholders
// ============================================================================

pub const MESSAGES_NAME: &str = "#messages";
pub const EMPTY_LIST_VALUE: &str = ":empty_list";
pub const NEW_MESSAGE_VALUE: &str = ":newMessage";

/// Appends to the list, creating it when the row or attribute is absent.
pub const APPEND_MESSAGE_EXPRESSION: &str =
    "SET #messages = list_append(if_not_exists(#messages, :empty_list), :newMessage)";

/// Projection for reads; only the message list is fetched.
pub const MESSAGES_PROJECTION: &str = "#messages";

/// Generate the key map for a conversation row.
///
/// Pattern: `{<primary_key_name>: S(<primary_key_value>)}`
pub fn primary_key(
    primary_key_name: &str,
    primary_key_value: &str,
) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        primary_key_name.to_string(),
        AttributeValue::S(primary_key_value.to_string()),
    )])
}

/// Expression attribute names shared by reads and appends.
pub fn messages_attribute_names() -> HashMap<String, String> {
    HashMap::from([(MESSAGES_NAME.to_string(), MESSAGES_ATTRIBUTE.to_string())])
}
