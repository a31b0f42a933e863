//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between `AttributeValue` trees and
//! `ChatMessage`. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chathistory_core::{ChatMessage, HistoryError, MessageRole, Result};

use super::keys::{
    CONTENT_FIELD, EMPTY_LIST_VALUE, MESSAGES_ATTRIBUTE, NEW_MESSAGE_VALUE, TYPE_FIELD,
};
use crate::config::UnknownRolePolicy;

// ============================================================================
// Encoding
// ============================================================================

/// Convert a ChatMessage to its stored map.
///
/// Shape: `M{type: S(<role>), content: S(<text>)}`
pub fn message_to_attribute(message: &ChatMessage) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            TYPE_FIELD.to_string(),
            AttributeValue::S(message.role.as_str().to_string()),
        ),
        (
            CONTENT_FIELD.to_string(),
            AttributeValue::S(message.content.clone()),
        ),
    ]))
}

/// Expression attribute values for appending one message.
pub fn append_attribute_values(message: &ChatMessage) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            NEW_MESSAGE_VALUE.to_string(),
            AttributeValue::L(vec![message_to_attribute(message)]),
        ),
        (EMPTY_LIST_VALUE.to_string(), AttributeValue::L(Vec::new())),
    ])
}

// ============================================================================
// Decoding
// ============================================================================

/// Convert a conversation row to its messages.
///
/// A row without a `messages` attribute has no history. Messages with an
/// unknown role are handled according to `policy`.
pub fn item_to_messages(
    item: &HashMap<String, AttributeValue>,
    policy: UnknownRolePolicy,
) -> Result<Vec<ChatMessage>> {
    let entries = match item.get(MESSAGES_ATTRIBUTE) {
        None => return Ok(Vec::new()),
        Some(AttributeValue::L(entries)) => entries,
        Some(other) => {
            return Err(HistoryError::Serialization(format!(
                "{MESSAGES_ATTRIBUTE} must be a list, found {}",
                attribute_kind(other)
            )))
        }
    };

    let mut messages = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if let Some(message) = attribute_to_message(entry, index, policy)? {
            messages.push(message);
        }
    }

    Ok(messages)
}

/// Convert one stored map to a ChatMessage.
///
/// Returns `Ok(None)` for an unknown role under `UnknownRolePolicy::Skip`.
fn attribute_to_message(
    value: &AttributeValue,
    index: usize,
    policy: UnknownRolePolicy,
) -> Result<Option<ChatMessage>> {
    let fields = match value {
        AttributeValue::M(fields) => fields,
        other => {
            return Err(HistoryError::Serialization(format!(
                "message {index} must be a map, found {}",
                attribute_kind(other)
            )))
        }
    };

    let tag = get_string(fields, TYPE_FIELD, index)?;
    let content = get_string(fields, CONTENT_FIELD, index)?;

    match tag.parse::<MessageRole>() {
        Ok(role) => Ok(Some(ChatMessage::new(role, content))),
        Err(unknown) => match policy {
            UnknownRolePolicy::Skip => {
                tracing::warn!(index, role = %unknown.0, "Skipping message with unknown role");
                Ok(None)
            }
            UnknownRolePolicy::Reject => Err(HistoryError::Serialization(format!(
                "message {index}: {unknown}"
            ))),
        },
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string field of a message map.
fn get_string<'a>(
    fields: &'a HashMap<String, AttributeValue>,
    key: &str,
    index: usize,
) -> Result<&'a str> {
    match fields.get(key) {
        Some(AttributeValue::S(value)) => Ok(value.as_str()),
        Some(other) => Err(HistoryError::Serialization(format!(
            "message {index}: field {key} must be a string, found {}",
            attribute_kind(other)
        ))),
        None => Err(HistoryError::Serialization(format!(
            "message {index}: missing field {key}"
        ))),
    }
}

/// Name of the attribute type, as used in DynamoDB's JSON representation.
fn attribute_kind(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::B(_) => "B",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::Bs(_) => "BS",
        AttributeValue::L(_) => "L",
        AttributeValue::M(_) => "M",
        AttributeValue::N(_) => "N",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::S(_) => "S",
        AttributeValue::Ss(_) => "SS",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(tag: &str, content: &str) -> AttributeValue {
        AttributeValue::M(HashMap::from([
            (TYPE_FIELD.to_string(), AttributeValue::S(tag.to_string())),
            (
                CONTENT_FIELD.to_string(),
                AttributeValue::S(content.to_string()),
            ),
        ]))
    }

    fn row(entries: Vec<AttributeValue>) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("chat_id".to_string(), AttributeValue::S("42".to_string())),
            (MESSAGES_ATTRIBUTE.to_string(), AttributeValue::L(entries)),
        ])
    }

    #[test]
    fn test_message_to_attribute_shape() {
        let value = message_to_attribute(&ChatMessage::human("hi"));
        let fields = value.as_m().unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("type").unwrap().as_s().unwrap(), "human");
        assert_eq!(fields.get("content").unwrap().as_s().unwrap(), "hi");
    }

    #[test]
    fn test_append_attribute_values() {
        let values = append_attribute_values(&ChatMessage::ai("hello!"));

        assert_eq!(values.len(), 2);
        assert!(values.get(":empty_list").unwrap().as_l().unwrap().is_empty());

        let new_message = values.get(":newMessage").unwrap().as_l().unwrap();
        assert_eq!(new_message.len(), 1);
        assert_eq!(new_message[0], stored("ai", "hello!"));
    }

    #[test]
    fn test_item_to_messages_preserves_order() {
        let item = row(vec![
            stored("human", "hi"),
            stored("ai", "hello!"),
            stored("human", "bye"),
        ]);

        let messages = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap();

        assert_eq!(
            messages,
            vec![
                ChatMessage::human("hi"),
                ChatMessage::ai("hello!"),
                ChatMessage::human("bye"),
            ]
        );
    }

    #[test]
    fn test_encoded_messages_decode_unchanged() {
        let original = vec![ChatMessage::human("a"), ChatMessage::ai("")];
        let item = row(original.iter().map(message_to_attribute).collect());

        assert_eq!(
            item_to_messages(&item, UnknownRolePolicy::Skip).unwrap(),
            original
        );
    }

    #[test]
    fn test_item_without_messages_is_empty() {
        let item = HashMap::from([("chat_id".to_string(), AttributeValue::S("42".to_string()))]);
        assert!(item_to_messages(&item, UnknownRolePolicy::Skip)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_role_is_skipped() {
        let item = row(vec![
            stored("human", "hi"),
            stored("system", "be nice"),
            stored("ai", "hello!"),
        ]);

        let messages = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap();

        assert_eq!(
            messages,
            vec![ChatMessage::human("hi"), ChatMessage::ai("hello!")]
        );
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let item = row(vec![stored("human", "hi"), stored("system", "be nice")]);

        let err = item_to_messages(&item, UnknownRolePolicy::Reject).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Serialization error: message 1: Unknown message role: system"
        );
    }

    #[test]
    fn test_messages_not_a_list() {
        let item = HashMap::from([(
            MESSAGES_ATTRIBUTE.to_string(),
            AttributeValue::S("oops".to_string()),
        )]);

        let err = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Serialization error: messages must be a list, found S"
        );
    }

    #[test]
    fn test_entry_not_a_map() {
        let item = row(vec![AttributeValue::N("1".to_string())]);

        let err = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Serialization error: message 0 must be a map, found N"
        );
    }

    #[test]
    fn test_missing_content() {
        let entry = AttributeValue::M(HashMap::from([(
            TYPE_FIELD.to_string(),
            AttributeValue::S("human".to_string()),
        )]));
        let item = row(vec![entry]);

        let err = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Serialization error: message 0: missing field content"
        );
    }

    #[test]
    fn test_type_not_a_string() {
        let entry = AttributeValue::M(HashMap::from([
            (TYPE_FIELD.to_string(), AttributeValue::Bool(true)),
            (
                CONTENT_FIELD.to_string(),
                AttributeValue::S("hi".to_string()),
            ),
        ]));
        let item = row(vec![entry]);

        let err = item_to_messages(&item, UnknownRolePolicy::Skip).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Serialization error: message 0: field type must be a string, found BOOL"
        );
    }

    #[test]
    fn test_shape_errors_win_over_skip_policy() {
        // A malformed entry after an unknown role still fails the read.
        let item = row(vec![stored("tool", "x"), AttributeValue::Null(true)]);
        assert!(item_to_messages(&item, UnknownRolePolicy::Skip).is_err());
    }
}
