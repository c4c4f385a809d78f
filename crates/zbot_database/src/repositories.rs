//! Repository set.

use crate::{
    AccountRepository, AutoMessageRepository, CollectionName, DatabaseResult, JobRepository,
    MetadataRepository, MongoConnector, RecruitmentRepository,
};

/// Every repository, built once at startup and passed to call sites.
///
/// Cloning is cheap: each repository holds driver handles that share the
/// connector's client.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Metadata key/value store
    pub metadata: MetadataRepository,
    /// Recruitment announcements
    pub recruitment: RecruitmentRepository,
    /// Pending lotteries and polls
    pub jobs: JobRepository,
    /// Member account records
    pub accounts: AccountRepository,
    /// Periodic auto-messages
    pub automessages: AutoMessageRepository,
}

impl Repositories {
    /// Build the set from a connected connector.
    ///
    /// # Errors
    ///
    /// Returns `NotConnected` if the connector has not been opened.
    pub fn from_connector(connector: &MongoConnector) -> DatabaseResult<Self> {
        Ok(Self {
            metadata: MetadataRepository::new(connector.collection(CollectionName::Metadata)?),
            recruitment: RecruitmentRepository::new(
                connector.collection(CollectionName::RecruitmentAnnounce)?,
            ),
            jobs: JobRepository::new(
                connector.collection(CollectionName::PendingLottery)?,
                connector.collection(CollectionName::PendingPoll)?,
            ),
            accounts: AccountRepository::new(connector.collection(CollectionName::AccountData)?),
            automessages: AutoMessageRepository::new(
                connector.collection(CollectionName::AutoMessage)?,
            ),
        })
    }
}
