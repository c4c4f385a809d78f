//! Pending job repository.
//!
//! Lotteries and polls are scheduled by an external job scheduler which hands
//! their state over for persistence. On startup the bot reloads them keyed by
//! message id so reaction events can find their job in constant time.

use crate::projection::projection_document;
use crate::{CollectionName, DatabaseResult, JobStore, PendingJob};
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::Collection;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};
use zbot_error::{DatabaseError, DatabaseErrorKind};

/// Field every pending job is keyed by.
pub const MESSAGE_ID_KEY: &str = "message_id";

/// Pending lottery and poll state.
#[derive(Debug, Clone)]
pub struct JobRepository {
    lotteries: Collection<Document>,
    polls: Collection<Document>,
}

impl JobRepository {
    /// Create a repository over the two job-store collections.
    pub fn new(lotteries: Collection<Document>, polls: Collection<Document>) -> Self {
        Self { lotteries, polls }
    }

    fn collection(&self, store: JobStore) -> &Collection<Document> {
        match store {
            JobStore::Lottery => &self.lotteries,
            JobStore::Poll => &self.polls,
        }
    }

    /// Persist a job handed over by the scheduler.
    #[instrument(skip(self, job), fields(store = %store, message_id = job.message_id))]
    pub async fn insert_job_data(&self, store: JobStore, job: &PendingJob) -> DatabaseResult<()> {
        self.collection(store)
            .clone_with_type::<PendingJob>()
            .insert_one(job)
            .await?;
        debug!(
            "Inserted pending job {} in collection {}.",
            job.job_id,
            CollectionName::from(store)
        );
        Ok(())
    }

    /// Set `update` fields on the job `job_id`.
    ///
    /// Jobs are never created here; updating an unknown job is a no-op.
    #[instrument(skip(self, job_id), fields(store = %store))]
    pub async fn update_job_data(
        &self,
        store: JobStore,
        job_id: impl Into<Bson>,
        update: Document,
    ) -> DatabaseResult<()> {
        let job_id = job_id.into();
        if update.is_empty() {
            debug!("Skipped empty update of pending job {}.", job_id);
            return Ok(());
        }
        let result = self
            .collection(store)
            .update_one(doc! { "_id": job_id.clone() }, doc! { "$set": update })
            .await?;
        debug!(
            "Updated pending job {} ({} matched).",
            job_id, result.matched_count
        );
        Ok(())
    }

    /// Delete the job `job_id`.
    #[instrument(skip(self, job_id), fields(store = %store))]
    pub async fn delete_job_data(&self, store: JobStore, job_id: impl Into<Bson>) -> DatabaseResult<()> {
        let job_id = job_id.into();
        let result = self
            .collection(store)
            .delete_one(doc! { "_id": job_id.clone() })
            .await?;
        debug!(
            "Deleted pending job {} ({} deleted).",
            job_id, result.deleted_count
        );
        Ok(())
    }

    /// Load every pending job of `store`, projected to `keys`, keyed by message id.
    ///
    /// `message_id` is always projected. Documents without it cannot be
    /// keyed and are skipped.
    #[instrument(skip(self, keys), fields(store = %store))]
    pub async fn load_pending_jobs_data<S: AsRef<str>>(
        &self,
        store: JobStore,
        keys: &[S],
    ) -> DatabaseResult<HashMap<i64, Document>> {
        let projection = projection_document(
            keys.iter()
                .map(|key| key.as_ref())
                .chain(std::iter::once(MESSAGE_ID_KEY)),
        );
        let documents: Vec<Document> = self
            .collection(store)
            .find(doc! {})
            .projection(projection)
            .await?
            .try_collect()
            .await?;

        let mut pending_jobs_data = HashMap::with_capacity(documents.len());
        for document in documents {
            match message_id_of(&document) {
                Ok(message_id) => {
                    pending_jobs_data.insert(message_id, document);
                }
                Err(e) => warn!(error = %e, "Skipping pending job without message id"),
            }
        }
        debug!(
            "Loaded {} pending data from collection {}.",
            pending_jobs_data.len(),
            CollectionName::from(store)
        );
        Ok(pending_jobs_data)
    }
}

/// Message id of a pending job document, accepting Int32 and Int64 storage.
pub fn message_id_of(document: &Document) -> DatabaseResult<i64> {
    match document.get(MESSAGE_ID_KEY) {
        Some(Bson::Int64(id)) => Ok(*id),
        Some(Bson::Int32(id)) => Ok(i64::from(*id)),
        _ => Err(DatabaseError::new(DatabaseErrorKind::MissingField(
            MESSAGE_ID_KEY.to_string(),
        ))),
    }
}
