//! Single-message processing pipeline.
//!
//! One inbound event runs through exactly one invocation of
//! [`MessageProcessor::process`], which orchestrates the context builder and
//! the dispatcher and guarantees a uniform diagnostic trail on every exit
//! path: exactly one terminal [`ProcessOutcome`] per invocation, and a
//! symmetric queued/idle announcement pair whenever a session key is known.

use std::{sync::Arc, time::Instant};

use tracing::{debug, error, info};

use palaver_channels::{
    DiagnosticsSink, MediaAttachment, MessageProcessed, MessageQueued, ProcessOutcome,
    SessionState, SessionStateChange, SkipReason, StateChangeReason,
};

#[cfg(feature = "metrics")]
use palaver_metrics::{counter, histogram, telegram as tg_metrics};

use crate::{
    Result,
    context::{ContextBuilder, ContextDecision},
    dispatch::{DeliverySettings, MessageDispatcher},
    error::Error,
    event::{InboundEvent, UNKNOWN},
};

/// Channel tag used on every diagnostic record emitted by this crate.
pub const CHANNEL: &str = "telegram";

/// Immutable dependency set for a [`MessageProcessor`], supplied once at
/// construction. Shared resources behind the collaborators (history stores,
/// config, platform client) are owned and synchronized by the host.
pub struct ProcessorDeps {
    pub builder: Arc<dyn ContextBuilder>,
    pub dispatcher: Arc<dyn MessageDispatcher>,
    pub diagnostics: Arc<dyn DiagnosticsSink>,
    pub delivery: DeliverySettings,
}

/// Processes one inbound Telegram message end to end.
///
/// Holds no mutable state of its own; concurrent invocations for distinct
/// events are the caller's choice, and per-session ordering is the session
/// manager's concern. Cancellation is not supported — an invocation runs to
/// one of its three terminal outcomes or propagates a failure.
pub struct MessageProcessor {
    deps: ProcessorDeps,
}

impl MessageProcessor {
    #[must_use]
    pub fn new(deps: ProcessorDeps) -> Self {
        Self { deps }
    }

    /// Process one inbound event: build a context, announce session
    /// activity, dispatch, and record the terminal outcome.
    ///
    /// Builder and dispatcher failures are observed (error outcome, session
    /// returned to idle when a key was resolved) and then returned to the
    /// caller unmodified — no retries, no wrapping.
    pub async fn process(
        &self,
        event: &InboundEvent,
        media: &[MediaAttachment],
        store_allow_from: Option<&[String]>,
        options: &serde_json::Value,
    ) -> Result<()> {
        let chat_id = event.chat_label();
        let message_id = event.message_label();
        let started = Instant::now();

        #[cfg(feature = "metrics")]
        counter!(tg_metrics::MESSAGES_RECEIVED_TOTAL).increment(1);

        info!(
            channel = CHANNEL,
            chat_id = %chat_id,
            message_id = %message_id,
            media_count = media.len(),
            "process message start"
        );

        let decision = match self
            .deps
            .builder
            .build(event, media, store_allow_from, options)
            .await
        {
            Ok(decision) => decision,
            Err(err) => {
                self.observe_failure(&chat_id, &message_id, None, started, &err)
                    .await;
                return Err(err);
            },
        };

        let context = match decision {
            ContextDecision::Ready(context) => context,
            ContextDecision::Skip => {
                let duration_ms = elapsed_ms(started);
                debug!(
                    channel = CHANNEL,
                    chat_id = %chat_id,
                    message_id = %message_id,
                    reason = "no_context",
                    "process message skipped"
                );
                self.deps
                    .diagnostics
                    .record_processed(MessageProcessed {
                        channel: CHANNEL.into(),
                        chat_id,
                        message_id,
                        session_key: None,
                        duration_ms,
                        outcome: ProcessOutcome::Skipped,
                        reason: Some(SkipReason::NoContext),
                        error: None,
                    })
                    .await;
                return Ok(());
            },
        };

        let session_key = context.route.session_key.clone();
        info!(
            channel = CHANNEL,
            chat_id = %chat_id,
            message_id = %message_id,
            session_key = session_key.as_deref().unwrap_or(UNKNOWN),
            "process message dispatching"
        );
        if let Some(key) = &session_key {
            self.deps
                .diagnostics
                .record_queued(MessageQueued {
                    session_key: key.clone(),
                    channel: CHANNEL.into(),
                    source: CHANNEL.into(),
                })
                .await;
        }

        if let Err(err) = self
            .deps
            .dispatcher
            .dispatch(&context, &self.deps.delivery)
            .await
        {
            self.observe_failure(&chat_id, &message_id, session_key.as_deref(), started, &err)
                .await;
            return Err(err);
        }

        let duration_ms = elapsed_ms(started);
        self.deps
            .diagnostics
            .record_processed(MessageProcessed {
                channel: CHANNEL.into(),
                chat_id: chat_id.clone(),
                message_id: message_id.clone(),
                session_key: session_key.clone(),
                duration_ms,
                outcome: ProcessOutcome::Completed,
                reason: None,
                error: None,
            })
            .await;
        if let Some(key) = &session_key {
            self.deps
                .diagnostics
                .record_session_state(SessionStateChange {
                    session_key: key.clone(),
                    state: SessionState::Idle,
                    reason: StateChangeReason::MessageCompleted,
                })
                .await;
        }

        #[cfg(feature = "metrics")]
        histogram!(tg_metrics::PROCESSING_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        info!(
            channel = CHANNEL,
            chat_id = %chat_id,
            message_id = %message_id,
            session_key = session_key.as_deref().unwrap_or(UNKNOWN),
            duration_ms,
            "process message complete"
        );
        Ok(())
    }

    /// Shared failure branch for builder and dispatcher errors: record the
    /// error outcome, return the session to idle when a key was resolved,
    /// and log the error line. The caller propagates the original error.
    async fn observe_failure(
        &self,
        chat_id: &str,
        message_id: &str,
        session_key: Option<&str>,
        started: Instant,
        err: &Error,
    ) {
        let duration_ms = elapsed_ms(started);

        #[cfg(feature = "metrics")]
        counter!(tg_metrics::PROCESSING_ERRORS_TOTAL).increment(1);

        self.deps
            .diagnostics
            .record_processed(MessageProcessed {
                channel: CHANNEL.into(),
                chat_id: chat_id.to_string(),
                message_id: message_id.to_string(),
                session_key: session_key.map(String::from),
                duration_ms,
                outcome: ProcessOutcome::Error,
                reason: None,
                error: Some(err.to_string()),
            })
            .await;
        if let Some(key) = session_key {
            self.deps
                .diagnostics
                .record_session_state(SessionStateChange {
                    session_key: key.to_string(),
                    state: SessionState::Idle,
                    reason: StateChangeReason::MessageError,
                })
                .await;
        }
        error!(
            channel = CHANNEL,
            chat_id = %chat_id,
            message_id = %message_id,
            duration_ms,
            error = %err,
            "process message error"
        );
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
