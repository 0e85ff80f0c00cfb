use serde::Deserialize;

/// Label used for correlation fields the raw event does not carry.
pub(crate) const UNKNOWN: &str = "unknown";

/// Raw inbound Telegram update, read defensively.
///
/// Only correlation ids are extracted from this shape, and every field is
/// optional: an absent id degrades to the [`UNKNOWN`] label instead of an
/// error. Unrecognized fields are ignored so any Bot API update payload can
/// be fed through unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    pub message: Option<EventMessage>,
    pub chat: Option<EventChat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventMessage {
    pub chat: Option<EventChat>,
    pub message_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventChat {
    pub id: Option<i64>,
}

impl InboundEvent {
    /// Chat correlation label: `message.chat.id`, falling back to the
    /// top-level `chat.id`.
    #[must_use]
    pub fn chat_label(&self) -> String {
        self.message
            .as_ref()
            .and_then(|message| message.chat.as_ref())
            .and_then(|chat| chat.id)
            .or_else(|| self.chat.as_ref().and_then(|chat| chat.id))
            .map_or_else(|| UNKNOWN.to_string(), |id| id.to_string())
    }

    /// Message correlation label from `message.message_id`.
    #[must_use]
    pub fn message_label(&self) -> String {
        self.message
            .as_ref()
            .and_then(|message| message.message_id)
            .map_or_else(|| UNKNOWN.to_string(), |id| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest, serde_json::json};

    #[rstest]
    #[case(json!({"message": {"chat": {"id": 123}, "message_id": 456}}), "123", "456")]
    #[case(json!({"chat": {"id": -100999}}), "-100999", "unknown")]
    #[case(json!({"message": {"message_id": 7}}), "unknown", "7")]
    #[case(json!({}), "unknown", "unknown")]
    fn correlation_labels(
        #[case] raw: serde_json::Value,
        #[case] chat: &str,
        #[case] message: &str,
    ) {
        let event: InboundEvent = serde_json::from_value(raw).expect("deserialize event");
        assert_eq!(event.chat_label(), chat);
        assert_eq!(event.message_label(), message);
    }

    #[test]
    fn message_chat_wins_over_top_level_chat() {
        let event: InboundEvent = serde_json::from_value(json!({
            "message": {"chat": {"id": 1}, "message_id": 2},
            "chat": {"id": 99},
        }))
        .expect("deserialize event");
        assert_eq!(event.chat_label(), "1");
    }

    #[test]
    fn unrecognized_fields_are_tolerated() {
        let event: InboundEvent = serde_json::from_value(json!({
            "update_id": 880001,
            "message": {
                "message_id": 456,
                "date": 1,
                "chat": {"id": 123, "type": "private", "first_name": "Alice"},
                "from": {"id": 1001, "is_bot": false, "first_name": "Alice"},
                "text": "hello",
            },
        }))
        .expect("deserialize full update");
        assert_eq!(event.chat_label(), "123");
        assert_eq!(event.message_label(), "456");
    }
}
