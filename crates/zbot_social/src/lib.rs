//! Chat-platform adapters for the zbot data layer.
//!
//! Each platform is feature-gated and lives in its own submodule:
//! - `discord` - Serenity model adapters and channel-history sync (requires `discord` feature)
//!
//! Adapters wrap the platform's model types in newtypes implementing the
//! `zbot_core` chat traits so repositories can turn members, channels and messages into
//! documents without depending on the platform client.

#![warn(missing_docs)]

#[cfg(feature = "discord")]
mod discord;

#[cfg(feature = "discord")]
pub use discord::{
    DISCORD_EPOCH_MS, DiscordChannel, DiscordError, DiscordErrorKind, DiscordMember,
    DiscordMessage, DiscordResult, DiscordUser, snowflake_time, sync_recruitment_announces,
};
