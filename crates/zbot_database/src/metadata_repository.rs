//! Metadata key/value repository.

use crate::{DatabaseResult, MetadataEntry};
use bson::{Bson, Document, doc};
use mongodb::Collection;
use tracing::{debug, instrument};

/// Bot-wide bookkeeping values, one document per key.
#[derive(Debug, Clone)]
pub struct MetadataRepository {
    collection: Collection<MetadataEntry>,
}

impl MetadataRepository {
    /// Create a repository over the `metadata` collection.
    pub fn new(collection: Collection<Document>) -> Self {
        Self {
            collection: collection.clone_with_type(),
        }
    }

    /// Store `value` under `key`, creating the entry if needed.
    #[instrument(skip(self, value))]
    pub async fn update_metadata(&self, key: &str, value: impl Into<Bson>) -> DatabaseResult<()> {
        let value = value.into();
        self.collection
            .update_one(doc! { "_id": key }, doc! { "$set": { "data": value.clone() } })
            .upsert(true)
            .await?;
        debug!("Updated metadata '{}': '{}'.", key, value);
        Ok(())
    }

    /// Value stored under `key`, if any.
    #[instrument(skip(self))]
    pub async fn get_metadata(&self, key: &str) -> DatabaseResult<Option<Bson>> {
        let entry = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(entry.map(|e| e.data))
    }
}
