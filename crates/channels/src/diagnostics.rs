//! Structured diagnostics for message processing.
//!
//! Every inbound message produces exactly one terminal [`MessageProcessed`]
//! record, and session activity is bracketed by a [`MessageQueued`] /
//! [`SessionStateChange`]-to-idle pair whenever a session key is known. These
//! records are the normative diagnostic channel; free-text `tracing` lines
//! emitted alongside them are informational only.

use {async_trait::async_trait, serde::Serialize, tracing::info};

/// Terminal classification of one processing invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessOutcome {
    /// Context was built and the dispatch attempt succeeded.
    Completed,
    /// The builder or the dispatcher failed; the failure was propagated.
    Error,
    /// No context for this event — nothing to do.
    Skipped,
}

/// Why an invocation ended without a dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoContext,
}

/// Observed session activity state, announced on behalf of the session
/// manager that owns the key. This crate never creates or destroys sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Queued,
    Processing,
    Idle,
}

/// Why a session state transition was announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChangeReason {
    MessageCompleted,
    MessageError,
}

/// A message entered active processing for a known session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageQueued {
    pub session_key: String,
    pub channel: String,
    pub source: String,
}

/// Terminal record for one processing invocation.
///
/// `chat_id` and `message_id` are correlation labels only — absent platform
/// ids degrade to `"unknown"` upstream rather than being dropped here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageProcessed {
    pub channel: String,
    pub chat_id: String,
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
    pub duration_ms: u64,
    pub outcome: ProcessOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A session state transition observed by a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStateChange {
    pub session_key: String,
    pub state: SessionState,
    pub reason: StateChangeReason,
}

/// Sink for structured diagnostic records — the host provides the concrete
/// implementation (storage and shipping are its concern, not the channel's).
///
/// Recorders are infallible: a misbehaving diagnostics backend must never
/// change the outcome of message processing.
#[async_trait]
pub trait DiagnosticsSink: Send + Sync {
    /// Record that a message entered active processing for a session.
    async fn record_queued(&self, event: MessageQueued);

    /// Record the terminal outcome of one processing invocation.
    async fn record_processed(&self, event: MessageProcessed);

    /// Record an observed session state transition.
    async fn record_session_state(&self, event: SessionStateChange);
}

/// Fallback sink that emits each record as a JSON line via `tracing`.
///
/// Useful for hosts that have not wired a real diagnostics backend yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    fn emit(kind: &str, record: &impl Serialize) {
        match serde_json::to_string(record) {
            Ok(json) => info!(target: "palaver::diagnostics", kind, %json, "diagnostic event"),
            Err(err) => info!(target: "palaver::diagnostics", kind, %err, "unserializable diagnostic event"),
        }
    }
}

#[async_trait]
impl DiagnosticsSink for TracingDiagnostics {
    async fn record_queued(&self, event: MessageQueued) {
        Self::emit("message_queued", &event);
    }

    async fn record_processed(&self, event: MessageProcessed) {
        Self::emit("message_processed", &event);
    }

    async fn record_session_state(&self, event: SessionStateChange) {
        Self::emit("session_state_change", &event);
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn processed_event_wire_shape() {
        let event = MessageProcessed {
            channel: "telegram".into(),
            chat_id: "123".into(),
            message_id: "456".into(),
            session_key: Some("agent:main:main".into()),
            duration_ms: 12,
            outcome: ProcessOutcome::Completed,
            reason: None,
            error: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "channel": "telegram",
                "chat_id": "123",
                "message_id": "456",
                "session_key": "agent:main:main",
                "duration_ms": 12,
                "outcome": "completed",
            })
        );
    }

    #[test]
    fn skipped_event_carries_snake_case_reason() {
        let event = MessageProcessed {
            channel: "telegram".into(),
            chat_id: "unknown".into(),
            message_id: "unknown".into(),
            session_key: None,
            duration_ms: 0,
            outcome: ProcessOutcome::Skipped,
            reason: Some(SkipReason::NoContext),
            error: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["outcome"], "skipped");
        assert_eq!(value["reason"], "no_context");
        assert!(value.get("session_key").is_none());
    }

    #[test]
    fn state_change_wire_shape() {
        let event = SessionStateChange {
            session_key: "agent:main:main".into(),
            state: SessionState::Idle,
            reason: StateChangeReason::MessageError,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "session_key": "agent:main:main",
                "state": "idle",
                "reason": "message_error",
            })
        );
    }

    #[tokio::test]
    async fn tracing_sink_accepts_all_record_kinds() {
        let sink = TracingDiagnostics;
        sink.record_queued(MessageQueued {
            session_key: "k".into(),
            channel: "telegram".into(),
            source: "telegram".into(),
        })
        .await;
        sink.record_session_state(SessionStateChange {
            session_key: "k".into(),
            state: SessionState::Idle,
            reason: StateChangeReason::MessageCompleted,
        })
        .await;
    }
}
