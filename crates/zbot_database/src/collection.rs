//! Collection registry.
//!
//! The set of collections is fixed at compile time. Each one carries a small
//! configuration record; connection setup enumerates the registry to resolve
//! one handle per collection.

use serde::{Deserialize, Serialize};

/// Per-collection configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CollectionConfig {
    /// Whether the collection persists scheduler state across restarts.
    pub is_jobstore: bool,
}

/// Logical collections of the bot database.
///
/// # Examples
///
/// ```
/// use strum::IntoEnumIterator;
/// use zbot_database::CollectionName;
///
/// let jobstores: Vec<_> = CollectionName::iter()
///     .filter(|c| c.config().is_jobstore)
///     .collect();
/// assert_eq!(jobstores.len(), 2);
/// assert_eq!(CollectionName::PendingPoll.as_ref(), "pending_poll");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionName {
    /// Per-member account records
    AccountData,
    /// Periodic auto-messages
    #[strum(serialize = "automessage")]
    #[serde(rename = "automessage")]
    AutoMessage,
    /// Bot-wide key/value bookkeeping
    Metadata,
    /// Pending lotteries (job store)
    PendingLottery,
    /// Pending polls (job store)
    PendingPoll,
    /// Recruitment announcements
    RecruitmentAnnounce,
}

impl CollectionName {
    /// Configuration of this collection.
    pub fn config(self) -> CollectionConfig {
        match self {
            Self::PendingLottery | Self::PendingPoll => CollectionConfig { is_jobstore: true },
            Self::AccountData | Self::AutoMessage | Self::Metadata | Self::RecruitmentAnnounce => {
                CollectionConfig::default()
            }
        }
    }
}

/// Collections that persist pending scheduler jobs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStore {
    /// Pending lotteries
    Lottery,
    /// Pending polls
    Poll,
}

impl From<JobStore> for CollectionName {
    fn from(store: JobStore) -> Self {
        match store {
            JobStore::Lottery => CollectionName::PendingLottery,
            JobStore::Poll => CollectionName::PendingPoll,
        }
    }
}
