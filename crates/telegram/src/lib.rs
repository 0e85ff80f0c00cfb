//! Telegram message-processing pipeline for palaver.
//!
//! Orchestrates one inbound message end to end: build a processing context,
//! announce session activity, dispatch the response, and emit a terminal
//! diagnostic outcome on every exit path. Context building and dispatching
//! are collaborator traits; this crate owns only the lifecycle contract.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod processor;

pub use {
    config::{AckReactionScope, ReplyToMode, StreamMode, TelegramAccountConfig},
    context::{ContextBuilder, ContextDecision, MessageContext, MessageRoute},
    dispatch::{DeliverySettings, MessageDispatcher},
    error::{Error, Result},
    event::InboundEvent,
    processor::{CHANNEL, MessageProcessor, ProcessorDeps},
};
