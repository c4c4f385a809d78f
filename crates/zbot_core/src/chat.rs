//! Chat-platform domain objects as seen by the data layer.
//!
//! The data layer only ever reads identifiers, timestamps and authorship from
//! the chat platform. Platform adapters implement these traits for their own
//! model types.

use chrono::{DateTime, Utc};

/// A community member.
pub trait ChatMember {
    /// Platform snowflake of the member.
    fn id(&self) -> u64;

    /// Name displayed in the community (nickname if set).
    fn display_name(&self) -> String;

    /// Creation time of the member's platform account.
    fn created_at(&self) -> DateTime<Utc>;
}

/// A text channel.
pub trait ChatChannel {
    /// Platform snowflake of the channel.
    fn id(&self) -> u64;
}

/// A message posted in a channel.
pub trait ChatMessage {
    /// Platform snowflake of the message.
    fn id(&self) -> u64;

    /// Snowflake of the message author.
    fn author_id(&self) -> u64;

    /// Time the message was posted.
    fn created_at(&self) -> DateTime<Utc>;
}

impl<T: ChatMember + ?Sized> ChatMember for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn created_at(&self) -> DateTime<Utc> {
        (**self).created_at()
    }
}

impl<T: ChatChannel + ?Sized> ChatChannel for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }
}

impl<T: ChatMessage + ?Sized> ChatMessage for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn author_id(&self) -> u64 {
        (**self).author_id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        (**self).created_at()
    }
}

/// Convert a snowflake to the `Int64` representation stored in documents.
///
/// Snowflakes use 63 bits, so the conversion is lossless.
///
/// # Examples
///
/// ```
/// use zbot_core::snowflake_to_i64;
///
/// assert_eq!(snowflake_to_i64(175928847299117063), 175928847299117063_i64);
/// ```
pub fn snowflake_to_i64(id: u64) -> i64 {
    id as i64
}
