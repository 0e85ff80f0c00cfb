use {
    async_trait::async_trait,
    palaver_channels::{MediaAttachment, ReplyTarget},
};

use crate::{Result, event::InboundEvent};

/// Routing decision for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRoute {
    /// Key of the conversational session this message belongs to, owned by
    /// the session manager outside this crate. Absent when no session
    /// tracking applies to the message.
    pub session_key: Option<String>,
    pub account_id: String,
}

/// Everything the dispatcher needs to deliver a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub route: MessageRoute,
    pub reply: ReplyTarget,
    /// Normalized message body (text or media caption).
    pub body: String,
    pub media: Vec<MediaAttachment>,
}

/// Outcome of context building.
///
/// "Nothing to do for this event" is a first-class value, never an error:
/// gating denials, empty messages, and unsupported updates all land on
/// [`ContextDecision::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextDecision {
    Ready(MessageContext),
    Skip,
}

/// Builds a processing context from a raw inbound event.
///
/// Implementations capture their shared dependencies (account config,
/// history stores, policy resolvers, platform client) at construction; only
/// per-message inputs travel through this call.
#[async_trait]
pub trait ContextBuilder: Send + Sync {
    /// Resolve the event into a dispatchable context or an explicit skip.
    ///
    /// `store_allow_from` is a caller-supplied allowlist override and
    /// `options` an opaque options bag; both are forwarded verbatim.
    async fn build(
        &self,
        event: &InboundEvent,
        media: &[MediaAttachment],
        store_allow_from: Option<&[String]>,
        options: &serde_json::Value,
    ) -> Result<ContextDecision>;
}
