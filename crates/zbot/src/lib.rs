//! zbot - data layer for a community chat bot
//!
//! zbot persists the bot's state in MongoDB: bot-wide metadata, recruitment
//! announcements, pending lotteries and polls, member account records and
//! periodic auto-messages. It also derives account anniversaries from the
//! stored creation dates.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use zbot::{MongoConnector, ZbotResult};
//!
//! #[tokio::main]
//! async fn main() -> ZbotResult<()> {
//!     let mut connector = MongoConnector::from_env()?;
//!     if !connector.open().await {
//!         return Ok(());
//!     }
//!     let repos = connector.repositories()?;
//!     let last = repos.metadata.get_metadata("last_anniversary_check").await?;
//!     println!("{:?}", last);
//!     connector.close().await;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` - Serenity adapters for the chat traits (enabled by default)
//!
//! # Architecture
//!
//! - `zbot_error` - Error types
//! - `zbot_core` - Chat traits, community time conventions, tracing setup
//! - `zbot_database` - MongoDB connection, repositories and anniversaries
//! - `zbot_social` - Chat-platform adapters
//!
//! This crate (`zbot`) re-exports everything for convenience.

pub mod cli;

// Re-export core crates (always available)
pub use zbot_core::*;
pub use zbot_database::*;
pub use zbot_error::*;

// Re-export optional crates based on features
#[cfg(feature = "discord")]
pub use zbot_social::*;
