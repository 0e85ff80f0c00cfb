use {
    palaver_channels::gating::{DmPolicy, GroupPolicy, MentionMode},
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// How streaming responses are delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// Edit a placeholder message in place as tokens arrive.
    #[default]
    EditInPlace,
    /// No streaming — send the final response as a single message.
    Off,
}

/// When replies are threaded to the originating message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyToMode {
    /// Thread in groups, send plain in DMs.
    #[default]
    Auto,
    /// Always thread to the originating message.
    Always,
    /// Never thread.
    Off,
}

/// Which chats get an acknowledgement reaction when a message is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AckReactionScope {
    #[default]
    None,
    Dm,
    Group,
    All,
}

/// Configuration for a single Telegram bot account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramAccountConfig {
    /// Bot token from @BotFather.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// DM access policy.
    pub dm_policy: DmPolicy,

    /// Group access policy.
    pub group_policy: GroupPolicy,

    /// Mention activation mode for groups.
    pub mention_mode: MentionMode,

    /// User/peer allowlist for DMs.
    pub allowlist: Vec<String>,

    /// Group/chat ID allowlist.
    pub group_allowlist: Vec<String>,

    /// How streaming responses are delivered.
    pub stream_mode: StreamMode,

    /// When replies are threaded to the originating message.
    pub reply_to_mode: ReplyToMode,

    /// Which chats get an acknowledgement reaction on receipt.
    pub ack_reaction_scope: AckReactionScope,

    /// Maximum length of a single outbound text message.
    pub text_limit: usize,

    /// Number of prior messages included when building group context.
    pub history_limit: usize,

    /// Whether forum-topic routing is enabled for this bot.
    pub topics_enabled: bool,
}

impl std::fmt::Debug for TelegramAccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAccountConfig")
            .field("token", &"[REDACTED]")
            .field("dm_policy", &self.dm_policy)
            .field("group_policy", &self.group_policy)
            .field("stream_mode", &self.stream_mode)
            .finish_non_exhaustive()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for TelegramAccountConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            dm_policy: DmPolicy::default(),
            group_policy: GroupPolicy::default(),
            mention_mode: MentionMode::default(),
            allowlist: Vec::new(),
            group_allowlist: Vec::new(),
            stream_mode: StreamMode::default(),
            reply_to_mode: ReplyToMode::default(),
            ack_reaction_scope: AckReactionScope::default(),
            text_limit: 4096,
            history_limit: 50,
            topics_enabled: false,
        }
    }
}
