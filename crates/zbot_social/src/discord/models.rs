//! Chat trait adapters for Serenity models.
//!
//! Each wrapper owns the Serenity value and exposes it through the
//! `zbot_core` chat traits.

use chrono::{DateTime, Utc};
use serenity::model::channel::{GuildChannel, Message};
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, UserId};
use serenity::model::user::User;
use zbot_core::{ChatChannel, ChatMember, ChatMessage};

/// First millisecond of 2015, the origin of Discord snowflake timestamps.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Creation time encoded in a Discord snowflake.
///
/// # Examples
///
/// ```
/// use zbot_social::snowflake_time;
///
/// let created = snowflake_time(175928847299117063);
/// assert_eq!(created.timestamp_millis(), 1_462_015_105_796);
/// ```
pub fn snowflake_time(id: u64) -> DateTime<Utc> {
    let millis = (id >> 22) as i64 + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

fn user_created_at(id: UserId) -> DateTime<Utc> {
    snowflake_time(id.get())
}

/// Guild member readable through [`ChatMember`].
#[derive(Debug, Clone, derive_more::From)]
pub struct DiscordMember(pub Member);

impl ChatMember for DiscordMember {
    fn id(&self) -> u64 {
        self.0.user.id.get()
    }

    fn display_name(&self) -> String {
        self.0.display_name().to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        user_created_at(self.0.user.id)
    }
}

/// User readable through [`ChatMember`], for members seen outside a guild.
#[derive(Debug, Clone, derive_more::From)]
pub struct DiscordUser(pub User);

impl ChatMember for DiscordUser {
    fn id(&self) -> u64 {
        self.0.id.get()
    }

    fn display_name(&self) -> String {
        self.0
            .global_name
            .clone()
            .unwrap_or_else(|| self.0.name.clone())
    }

    fn created_at(&self) -> DateTime<Utc> {
        user_created_at(self.0.id)
    }
}

/// Channel readable through [`ChatChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub struct DiscordChannel(pub ChannelId);

impl From<&GuildChannel> for DiscordChannel {
    fn from(channel: &GuildChannel) -> Self {
        Self(channel.id)
    }
}

impl ChatChannel for DiscordChannel {
    fn id(&self) -> u64 {
        self.0.get()
    }
}

/// Message readable through [`ChatMessage`].
#[derive(Debug, Clone, derive_more::From)]
pub struct DiscordMessage(pub Message);

impl ChatMessage for DiscordMessage {
    fn id(&self) -> u64 {
        self.0.id.get()
    }

    fn author_id(&self) -> u64 {
        self.0.author.id.get()
    }

    fn created_at(&self) -> DateTime<Utc> {
        snowflake_time(self.0.id.get())
    }
}
