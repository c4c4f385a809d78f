//! Recruitment announcement repository.

use crate::models::snowflake;
use crate::{DatabaseResult, RecruitmentAnnounce, SortOrder};
use bson::{Bson, Document, doc};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use tracing::{debug, instrument};
use zbot_core::{ChatMember, ChatMessage};

/// Recruitment announcements, keyed by message id.
#[derive(Debug, Clone)]
pub struct RecruitmentRepository {
    collection: Collection<Document>,
}

impl RecruitmentRepository {
    /// Create a repository over the `recruitment_announce` collection.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Insert a placeholder announce for `member` and return its new id.
    ///
    /// Placeholders stand in for announces posted outside the tracked
    /// channel, so they carry no message id.
    #[instrument(skip(self, member), fields(member_id = member.id()))]
    pub async fn insert_recruitment_announce(
        &self,
        member: &impl ChatMember,
        time: DateTime<Utc>,
    ) -> DatabaseResult<Bson> {
        let result = self
            .collection
            .insert_one(doc! {
                "author": snowflake(member.id()),
                "time": bson::DateTime::from_chrono(time),
                "dummy": true,
            })
            .await?;
        debug!(
            "Inserted dummy recruitment announce of id {}.",
            result.inserted_id
        );
        Ok(result.inserted_id)
    }

    /// Upsert one announce per message and return how many were new.
    #[instrument(skip_all, fields(count = announces.len()))]
    pub async fn update_recruitment_announces<M: ChatMessage>(
        &self,
        announces: &[M],
    ) -> DatabaseResult<u64> {
        let mut upsert_count = 0;
        for announce in announces {
            let result = self
                .collection
                .update_one(
                    doc! { "_id": snowflake(announce.id()) },
                    doc! { "$set": {
                        "author": snowflake(announce.author_id()),
                        "time": bson::DateTime::from_chrono(announce.created_at()),
                    } },
                )
                .upsert(true)
                .await?;
            if result.upserted_id.is_some() {
                upsert_count += 1;
            }
        }
        debug!("Updated {} recruitment announce(s).", upsert_count);
        Ok(upsert_count)
    }

    /// Delete every announce matching `filter` and return the deleted count.
    #[instrument(skip(self))]
    pub async fn delete_recruitment_announces(&self, filter: Document) -> DatabaseResult<u64> {
        let result = self.collection.delete_many(filter).await?;
        debug!("Deleted {} recruitment announce(s).", result.deleted_count);
        Ok(result.deleted_count)
    }

    /// Announces matching `filter`, in `order`.
    #[instrument(skip(self))]
    pub async fn load_recruitment_announces_data(
        &self,
        filter: Document,
        order: &SortOrder,
    ) -> DatabaseResult<Vec<RecruitmentAnnounce>> {
        let collection = self.collection.clone_with_type::<RecruitmentAnnounce>();
        let mut find = collection.find(filter);
        if !order.is_empty() {
            find = find.sort(order.to_document());
        }
        let announces: Vec<RecruitmentAnnounce> = find.await?.try_collect().await?;
        debug!("Loaded {} recruitment announce(s).", announces.len());
        Ok(announces)
    }
}
