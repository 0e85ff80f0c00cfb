use serde::{Deserialize, Serialize};

/// Media attached to an inbound message, already fetched by the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    /// MIME type (e.g. "image/jpeg", "audio/ogg").
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Where a response for an inbound message should be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTarget {
    pub channel_type: String,
    pub account_id: String,
    /// Chat/peer ID to send the reply to.
    pub chat_id: String,
    /// Originating message ID, when the platform supports reply threading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}
