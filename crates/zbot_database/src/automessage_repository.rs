//! Auto-message repository.

use crate::projection::{projection_document, retain_fields};
use crate::{AutoMessage, AutoMessageField, AutoMessageUpdate, DatabaseResult};
use bson::oid::ObjectId;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::Collection;
use tracing::{debug, instrument};
use zbot_core::{ChatChannel, snowflake_to_i64};
use zbot_error::{DatabaseError, DatabaseErrorKind};

/// Periodic auto-messages, keyed by database-assigned ObjectId.
#[derive(Debug, Clone)]
pub struct AutoMessageRepository {
    collection: Collection<Document>,
}

impl AutoMessageRepository {
    /// Create a repository over the `automessage` collection.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Insert a new auto-message and return its document id.
    #[instrument(skip(self, message, channel), fields(channel_id = channel.id()))]
    pub async fn insert_automessage(
        &self,
        automessage_id: i64,
        message: &str,
        channel: &impl ChatChannel,
    ) -> DatabaseResult<ObjectId> {
        let automessage = AutoMessage {
            id: None,
            automessage_id,
            message: message.to_string(),
            channel_id: snowflake_to_i64(channel.id()),
        };
        let result = self
            .collection
            .clone_with_type::<AutoMessage>()
            .insert_one(&automessage)
            .await?;
        let document_id = result.inserted_id.as_object_id().ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Query(format!(
                "auto-message inserted with non-ObjectId id {}",
                result.inserted_id
            )))
        })?;
        debug!(
            "Inserted auto-message of id {} in document {}.",
            automessage_id, document_id
        );
        Ok(document_id)
    }

    /// Apply each partial update to its document. Unknown ids are ignored.
    #[instrument(skip_all, fields(count = updates.len()))]
    pub async fn update_automessages(
        &self,
        updates: &[(ObjectId, AutoMessageUpdate)],
    ) -> DatabaseResult<()> {
        for (document_id, update) in updates {
            let set = update.to_set_document()?;
            if set.is_empty() {
                continue;
            }
            self.collection
                .update_one(doc! { "_id": *document_id }, doc! { "$set": set })
                .await?;
            debug!("Updated auto-message document {}.", document_id);
        }
        Ok(())
    }

    /// Delete one auto-message.
    #[instrument(skip(self))]
    pub async fn delete_automessage(&self, document_id: ObjectId) -> DatabaseResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": document_id })
            .await?;
        debug!(
            "Deleted auto-message document {} ({} deleted).",
            document_id, result.deleted_count
        );
        Ok(())
    }

    /// Auto-messages matching `filter`, each reduced to exactly `fields`.
    #[instrument(skip(self))]
    pub async fn load_automessages(
        &self,
        filter: Document,
        fields: &[AutoMessageField],
    ) -> DatabaseResult<Vec<Document>> {
        let keys: Vec<&str> = fields.iter().map(|f| f.as_ref()).collect();
        let documents: Vec<Document> = self
            .collection
            .find(filter)
            .projection(projection_document(&keys))
            .await?
            .try_collect()
            .await?;
        let automessages: Vec<Document> = documents
            .into_iter()
            .map(|document| retain_fields(document, &keys))
            .collect();
        debug!("Loaded {} auto-message(s).", automessages.len());
        Ok(automessages)
    }
}
