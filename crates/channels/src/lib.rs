//! Channel-agnostic plumbing shared by palaver channel crates.
//!
//! Each messaging platform crate (Telegram today) consumes the structured
//! diagnostics contract, shared message types, and access-policy enums
//! defined here.

pub mod diagnostics;
pub mod gating;
pub mod types;

pub use {
    diagnostics::{
        DiagnosticsSink, MessageProcessed, MessageQueued, ProcessOutcome, SessionState,
        SessionStateChange, SkipReason, StateChangeReason, TracingDiagnostics,
    },
    types::{MediaAttachment, ReplyTarget},
};
