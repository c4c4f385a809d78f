//! Document models.
//!
//! One struct per stored entity, plus `*Update` partial types that list only
//! the mutable fields. `None` fields are omitted from `$set` documents.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zbot_core::{ChatMember, snowflake_to_i64, to_timestamp};

/// Bot-wide key/value bookkeeping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Metadata key
    #[serde(rename = "_id")]
    pub key: String,
    /// Stored value
    pub data: Bson,
}

/// Recruitment announcement.
///
/// Announces synced from channel history use the message snowflake as id;
/// dummy placeholders get a database-assigned ObjectId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentAnnounce {
    /// Message snowflake or ObjectId
    #[serde(rename = "_id")]
    pub id: Bson,
    /// Author snowflake
    pub author: i64,
    /// Posting time
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub time: DateTime<Utc>,
    /// Placeholder inserted by the bot rather than synced from history
    #[serde(default, skip_serializing_if = "is_false")]
    pub dummy: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Pending lottery or poll persisted on behalf of the job scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingJob {
    /// Scheduler job id
    #[serde(rename = "_id")]
    pub job_id: Bson,
    /// Snowflake of the message the job is attached to
    pub message_id: i64,
    /// Job-specific fields (channel, emoji, winner count, next run time, ...)
    #[serde(flatten)]
    pub fields: Document,
}

/// Full account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountData {
    /// Member snowflake
    #[serde(rename = "_id")]
    pub id: i64,
    /// Account creation POSIX timestamp, in seconds
    pub creation_date: f64,
    /// Display name at the time of the last update
    pub display_name: String,
    /// Other account fields
    #[serde(flatten)]
    pub extra: Document,
}

/// Partial account update.
///
/// # Examples
///
/// ```
/// use zbot_database::AccountDataUpdate;
///
/// let update = AccountDataUpdate {
///     display_name: Some("Zelda".to_string()),
///     ..Default::default()
/// };
/// let set = update.to_set_document().unwrap();
/// assert_eq!(set.get_str("display_name").unwrap(), "Zelda");
/// assert!(!set.contains_key("creation_date"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDataUpdate {
    /// Account creation POSIX timestamp, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<f64>,
    /// Current display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Other account fields
    #[serde(default, flatten)]
    pub extra: Document,
}

impl AccountDataUpdate {
    /// Build the update recording a member's account creation date and name.
    pub fn from_member(member: &impl ChatMember) -> Self {
        Self {
            creation_date: Some(to_timestamp(&member.created_at())),
            display_name: Some(member.display_name()),
            extra: Document::new(),
        }
    }

    /// Render the fields to `$set`.
    ///
    /// # Errors
    ///
    /// Returns an error if the extra fields cannot be serialized.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Identifier and display name of an account, as returned by range queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Member snowflake
    #[serde(rename = "_id")]
    pub id: i64,
    /// Display name
    #[serde(default)]
    pub display_name: String,
}

/// Periodic auto-message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoMessage {
    /// Database-assigned id, absent before insertion
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Logical auto-message id
    pub automessage_id: i64,
    /// Text posted in the channel
    pub message: String,
    /// Target channel snowflake
    pub channel_id: i64,
}

/// Partial auto-message update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoMessageUpdate {
    /// New logical id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automessage_id: Option<i64>,
    /// New text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// New target channel snowflake
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<i64>,
}

impl AutoMessageUpdate {
    /// Render the fields to `$set`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Fields of an auto-message that may be requested by a projection load.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::AsRefStr,
    strum::EnumString,
)]
pub enum AutoMessageField {
    /// Document id
    #[strum(serialize = "_id")]
    Id,
    /// Logical auto-message id
    #[strum(serialize = "automessage_id")]
    AutoMessageId,
    /// Text
    #[strum(serialize = "message")]
    Message,
    /// Target channel
    #[strum(serialize = "channel_id")]
    ChannelId,
}

/// Sort direction of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    fn as_i32(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// Explicit multi-key sort order.
///
/// # Examples
///
/// ```
/// use zbot_database::SortOrder;
///
/// let order = SortOrder::new().descending("time").ascending("author");
/// let doc = order.to_document();
/// assert_eq!(doc.get_i32("time").unwrap(), -1);
/// assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["time", "author"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    keys: Vec<(String, SortDirection)>,
}

impl SortOrder {
    /// Empty sort order (natural order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ascending key.
    pub fn ascending(self, field: impl Into<String>) -> Self {
        self.then(field, SortDirection::Ascending)
    }

    /// Append a descending key.
    pub fn descending(self, field: impl Into<String>) -> Self {
        self.then(field, SortDirection::Descending)
    }

    /// Append a key with the given direction.
    pub fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.keys.push((field.into(), direction));
        self
    }

    /// Whether no key has been added.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render as a driver sort document, preserving key order.
    pub fn to_document(&self) -> Document {
        self.keys
            .iter()
            .map(|(field, direction)| (field.clone(), Bson::Int32(direction.as_i32())))
            .collect()
    }
}

/// Convert a snowflake to its stored BSON form.
pub(crate) fn snowflake(id: u64) -> Bson {
    Bson::Int64(snowflake_to_i64(id))
}
