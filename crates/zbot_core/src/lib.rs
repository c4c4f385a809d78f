//! Core types shared by the zbot crates.
//!
//! This crate knows nothing about the database or about a concrete chat
//! platform. It provides the traits the data layer reads members, channels and
//! messages through, plus the community time conventions used by stored data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chat;
mod telemetry;
mod time;

pub use chat::{ChatChannel, ChatMember, ChatMessage, snowflake_to_i64};
pub use telemetry::init_tracing;
pub use time::{COMMUNITY_TIMEZONE, from_timestamp, local_midnight, to_timestamp};
