//! Discord integration.
//!
//! - **models**: `ChatMember`/`ChatChannel`/`ChatMessage` wrappers for Serenity types
//! - **sync**: recruitment announce sync from a channel's message history
//! - **error**: Discord-specific error types

mod error;
mod models;
mod sync;

pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use models::{
    DISCORD_EPOCH_MS, DiscordChannel, DiscordMember, DiscordMessage, DiscordUser, snowflake_time,
};
pub use sync::sync_recruitment_announces;
