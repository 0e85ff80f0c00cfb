use async_trait::async_trait;

use crate::{
    Result,
    config::{ReplyToMode, StreamMode, TelegramAccountConfig},
    context::MessageContext,
};

/// Delivery knobs handed to the dispatcher on every call, derived once from
/// the account config when the processor is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySettings {
    pub reply_to_mode: ReplyToMode,
    pub stream_mode: StreamMode,
    /// Maximum length of a single outbound text message.
    pub text_limit: usize,
    /// Whether forum-topic routing is enabled for this bot.
    pub topics_enabled: bool,
}

impl DeliverySettings {
    #[must_use]
    pub fn from_account(config: &TelegramAccountConfig) -> Self {
        Self {
            reply_to_mode: config.reply_to_mode.clone(),
            stream_mode: config.stream_mode.clone(),
            text_limit: config.text_limit,
            topics_enabled: config.topics_enabled,
        }
    }
}

/// Delivers the response for a built context.
///
/// All platform-visible side effects (sending replies, reactions, streaming
/// edits) happen behind this trait; implementations own the platform client
/// and any retry policy of their own.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    async fn dispatch(&self, context: &MessageContext, delivery: &DeliverySettings) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_settings_derive_from_account_config() {
        let cfg = TelegramAccountConfig {
            stream_mode: StreamMode::Off,
            reply_to_mode: ReplyToMode::Always,
            text_limit: 1000,
            topics_enabled: true,
            ..Default::default()
        };
        let delivery = DeliverySettings::from_account(&cfg);
        assert_eq!(delivery.stream_mode, StreamMode::Off);
        assert_eq!(delivery.reply_to_mode, ReplyToMode::Always);
        assert_eq!(delivery.text_limit, 1000);
        assert!(delivery.topics_enabled);
    }
}
