//! Account data repository.

use crate::anniversary::{AccountSource, account_anniversaries};
use crate::models::snowflake;
use crate::projection::projection_document;
use crate::{AccountData, AccountDataUpdate, AccountSummary, DatabaseResult};
use async_trait::async_trait;
use bson::{Document, doc};
use chrono::{DateTime, TimeZone, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument};
use zbot_core::{ChatMember, snowflake_to_i64};

/// Per-member account records, keyed by member id.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    collection: Collection<Document>,
}

impl AccountRepository {
    /// Create a repository over the `account_data` collection.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Upsert each member's account fields and return how many were new.
    #[instrument(skip_all, fields(count = accounts.len()))]
    pub async fn update_accounts_data<M: ChatMember>(
        &self,
        accounts: &[(M, AccountDataUpdate)],
    ) -> DatabaseResult<u64> {
        let mut upsert_count = 0;
        for (member, account_data) in accounts {
            let set = account_data.to_set_document()?;
            if set.is_empty() {
                debug!(member_id = member.id(), "Skipped empty account data update");
                continue;
            }
            let result = self
                .collection
                .update_one(doc! { "_id": snowflake(member.id()) }, doc! { "$set": set })
                .upsert(true)
                .await?;
            if result.upserted_id.is_some() {
                upsert_count += 1;
            }
        }
        debug!("Updated {} account data.", upsert_count);
        Ok(upsert_count)
    }

    /// Full account record of a member, if recorded.
    #[instrument(skip(self))]
    pub async fn get_account_data(&self, member_id: u64) -> DatabaseResult<Option<AccountData>> {
        let account = self
            .collection
            .clone_with_type::<AccountData>()
            .find_one(doc! { "_id": snowflake(member_id) })
            .await?;
        Ok(account)
    }

    /// Ids of every recorded account.
    #[instrument(skip(self))]
    pub async fn recorded_account_ids(&self) -> DatabaseResult<HashSet<i64>> {
        let collection = self.collection.clone_with_type::<IdOnly>();
        let ids: Vec<IdOnly> = collection
            .find(doc! {})
            .projection(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(ids.into_iter().map(|d| d.id).collect())
    }

    /// Members without an account record, in input order.
    #[instrument(skip_all, fields(count = members.len()))]
    pub async fn get_unrecorded_members<'a, M: ChatMember>(
        &self,
        members: &'a [M],
    ) -> DatabaseResult<Vec<&'a M>> {
        let recorded = self.recorded_account_ids().await?;
        let unrecorded = filter_unrecorded(members, &recorded);
        debug!("Found {} unrecorded member(s).", unrecorded.len());
        Ok(unrecorded)
    }

    /// Accounts created strictly between the two POSIX timestamps.
    #[instrument(skip(self))]
    pub async fn find_created_between(
        &self,
        lower: f64,
        upper: f64,
    ) -> DatabaseResult<Vec<AccountSummary>> {
        let collection = self.collection.clone_with_type::<AccountSummary>();
        let accounts = collection
            .find(doc! { "creation_date": { "$gt": lower, "$lt": upper } })
            .projection(projection_document(["_id", "display_name"]))
            .await?
            .try_collect()
            .await?;
        Ok(accounts)
    }

    /// Account ids bucketed by whole years since creation, relative to
    /// `reference_date`. See [`account_anniversaries`].
    pub async fn get_anniversary_account_ids<Z: TimeZone>(
        &self,
        reference_date: &DateTime<Z>,
        min_account_creation_date: DateTime<Utc>,
    ) -> DatabaseResult<BTreeMap<u32, Vec<i64>>> {
        account_anniversaries(self, reference_date, min_account_creation_date).await
    }
}

#[async_trait]
impl AccountSource for AccountRepository {
    async fn accounts_created_between(
        &self,
        lower: f64,
        upper: f64,
    ) -> DatabaseResult<Vec<AccountSummary>> {
        self.find_created_between(lower, upper).await
    }
}

#[derive(serde::Deserialize)]
struct IdOnly {
    #[serde(rename = "_id")]
    id: i64,
}

/// Keep the members whose id is not in `recorded`, preserving order.
pub fn filter_unrecorded<'a, M: ChatMember>(members: &'a [M], recorded: &HashSet<i64>) -> Vec<&'a M> {
    members
        .iter()
        .filter(|m| !recorded.contains(&snowflake_to_i64(m.id())))
        .collect()
}
