use std::env;

use anyhow::Context as _;
use serenity::all::{ChannelId, GuildId, RoleId, UserId};

/// Environment-sourced configuration, parsed once at startup.
/// Missing required values abort with a descriptive error.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub business_name: String,
    pub guild_id: GuildId,
    /// Channel that issued invites land on.
    pub invite_channel_id: ChannelId,
    /// Staff channel carrying the "generate invite" button.
    pub invite_request_channel_id: ChannelId,
    pub start_here_channel_id: Option<ChannelId>,
    /// Roles allowed to issue invites. Empty means open to all.
    pub staff_role_ids: Vec<RoleId>,
    pub founder_user_id: Option<UserId>,
    pub csm_user_ids: Vec<UserId>,
    pub operations_user_id: Option<UserId>,
    pub zapier_webhook_url: Option<String>,
    pub zapier_secret: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            token: env::var("DISCORD_TOKEN").context("DISCORD_TOKEN not set")?,
            business_name: env::var("BUSINESS_NAME").unwrap_or_else(|_| "Nomads".to_string()),
            guild_id: GuildId::new(required_id("GUILD_ID")?),
            invite_channel_id: ChannelId::new(required_id("INVITE_CHANNEL_ID")?),
            invite_request_channel_id: ChannelId::new(required_id("INVITE_REQUEST_CHANNEL_ID")?),
            start_here_channel_id: optional_id("START_HERE_CHANNEL_ID")?.map(ChannelId::new),
            staff_role_ids: id_list("STAFF_ROLE_IDS")?
                .into_iter()
                .map(RoleId::new)
                .collect(),
            founder_user_id: optional_id("FOUNDER_USER_ID")?.map(UserId::new),
            csm_user_ids: id_list("CSM_USER_IDS")?.into_iter().map(UserId::new).collect(),
            operations_user_id: optional_id("OPERATIONS_USER_ID")?.map(UserId::new),
            zapier_webhook_url: env::var("ZAPIER_WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
            zapier_secret: env::var("ZAPIER_SECRET").ok().filter(|s| !s.is_empty()),
            port: match env::var("PORT") {
                Ok(p) => p.parse().context("PORT is not a valid port number")?,
                Err(_) => 3000,
            },
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            token: "test-token".into(),
            business_name: "Nomads".into(),
            guild_id: GuildId::new(1),
            invite_channel_id: ChannelId::new(2),
            invite_request_channel_id: ChannelId::new(3),
            start_here_channel_id: None,
            staff_role_ids: Vec::new(),
            founder_user_id: None,
            csm_user_ids: Vec::new(),
            operations_user_id: None,
            zapier_webhook_url: None,
            zapier_secret: None,
            port: 3000,
        }
    }
}

fn required_id(name: &str) -> anyhow::Result<u64> {
    let raw = env::var(name).with_context(|| format!("{name} not set"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{name} is not a valid snowflake id: {raw:?}"))
}

fn optional_id(name: &str) -> anyhow::Result<Option<u64>> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} is not a valid snowflake id: {raw:?}")),
        _ => Ok(None),
    }
}

/// Comma-separated id list; blank entries are skipped, malformed ones abort.
fn id_list(name: &str) -> anyhow::Result<Vec<u64>> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(Vec::new()),
    };
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .with_context(|| format!("{name} contains an invalid snowflake id: {part:?}"))
        })
        .collect()
}
