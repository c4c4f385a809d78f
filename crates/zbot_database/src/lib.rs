//! MongoDB data-access layer for zbot.
//!
//! This crate owns the connection to the bot database and exposes one
//! repository per stored entity:
//!
//! - [`MetadataRepository`] - bot-wide key/value bookkeeping
//! - [`RecruitmentRepository`] - recruitment announcements
//! - [`JobRepository`] - pending lotteries and polls
//! - [`AccountRepository`] - member account records and anniversaries
//! - [`AutoMessageRepository`] - periodic auto-messages
//!
//! # Example
//!
//! ```rust,ignore
//! use zbot_database::MongoConnector;
//!
//! let mut connector = MongoConnector::from_env()?;
//! if !connector.open().await {
//!     return Ok(());
//! }
//! let repos = connector.repositories()?;
//! repos.metadata.update_metadata("last_poll", 42_i64).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account_repository;
mod anniversary;
mod automessage_repository;
mod collection;
mod config;
mod connection;
mod job_repository;
mod metadata_repository;
mod models;
mod projection;
mod recruitment_repository;
mod repositories;

pub use account_repository::{AccountRepository, filter_unrecorded};
pub use anniversary::{
    AccountSource, AnniversaryWindow, AnniversaryWindows, account_anniversaries,
    anniversary_windows,
};
pub use automessage_repository::AutoMessageRepository;
pub use collection::{CollectionConfig, CollectionName, JobStore};
pub use config::{
    ConnectionTarget, DEFAULT_CLUSTER, DEFAULT_DATABASE_NAME, DatabaseConfig, DatabaseSettings,
    ENV_PREFIX,
};
pub use connection::MongoConnector;
pub use job_repository::{JobRepository, MESSAGE_ID_KEY, message_id_of};
pub use metadata_repository::MetadataRepository;
pub use models::{
    AccountData, AccountDataUpdate, AccountSummary, AutoMessage, AutoMessageField,
    AutoMessageUpdate, MetadataEntry, PendingJob, RecruitmentAnnounce, SortDirection, SortOrder,
};
pub use projection::{projection_document, retain_fields};
pub use recruitment_repository::RecruitmentRepository;
pub use repositories::Repositories;

pub use zbot_error::{DatabaseError, DatabaseErrorKind};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
