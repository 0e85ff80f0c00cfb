//! Metric name definitions for palaver.
//!
//! This crate centralizes metric names and re-exports the `metrics` facade
//! macros. The macros are no-ops until the host installs a recorder, so
//! channel crates can record unconditionally behind their `metrics` feature.
//!
//! ```rust,ignore
//! use palaver_metrics::{counter, histogram, telegram};
//!
//! counter!(telegram::MESSAGES_RECEIVED_TOTAL).increment(1);
//! histogram!(telegram::PROCESSING_DURATION_SECONDS).record(0.123);
//! ```

/// Telegram channel metrics.
pub mod telegram {
    /// Total number of inbound Telegram messages accepted for processing
    pub const MESSAGES_RECEIVED_TOTAL: &str = "palaver_telegram_messages_received_total";
    /// Total number of processing invocations that ended in an error
    pub const PROCESSING_ERRORS_TOTAL: &str = "palaver_telegram_processing_errors_total";
    /// End-to-end message processing duration in seconds
    pub const PROCESSING_DURATION_SECONDS: &str = "palaver_telegram_processing_duration_seconds";
}

// Re-export metrics macros for convenience
pub use metrics::{counter, gauge, histogram};
