//! Repository tests against a running MongoDB.
//!
//! Run with: cargo test -p zbot_database --features live-db
//! Requires MONGODB_DATABASE_HOST and MONGODB_DATABASE_NAME (a throwaway database).

use bson::{Bson, doc};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use zbot_core::{COMMUNITY_TIMEZONE, ChatChannel, ChatMember, ChatMessage};
use zbot_database::{
    AccountDataUpdate, AutoMessageField, AutoMessageUpdate, CollectionName, JobStore,
    MongoConnector, PendingJob, Repositories, SortOrder,
};

struct Member {
    id: u64,
    name: &'static str,
    created: DateTime<Utc>,
}

impl ChatMember for Member {
    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created
    }
}

struct Message {
    id: u64,
    author: u64,
    time: DateTime<Utc>,
}

impl ChatMessage for Message {
    fn id(&self) -> u64 {
        self.id
    }

    fn author_id(&self) -> u64 {
        self.author
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.time
    }
}

struct Channel(u64);

impl ChatChannel for Channel {
    fn id(&self) -> u64 {
        self.0
    }
}

async fn connect() -> (MongoConnector, Repositories) {
    let _ = dotenvy::dotenv();
    let mut connector = MongoConnector::from_env()
        .expect("MONGODB_DATABASE_HOST and MONGODB_DATABASE_NAME must be set");
    assert!(connector.open().await, "MongoDB must be reachable");
    let repos = connector.repositories().unwrap();
    (connector, repos)
}

fn ids_filter(ids: &[i64]) -> bson::Document {
    doc! { "_id": { "$in": ids.to_vec() } }
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn metadata_round_trip() {
    let (_connector, repos) = connect().await;

    repos
        .metadata
        .update_metadata("test_metadata_round_trip", 12_i64)
        .await
        .unwrap();
    assert_eq!(
        repos
            .metadata
            .get_metadata("test_metadata_round_trip")
            .await
            .unwrap(),
        Some(Bson::Int64(12))
    );

    repos
        .metadata
        .update_metadata("test_metadata_round_trip", "overwritten")
        .await
        .unwrap();
    assert_eq!(
        repos
            .metadata
            .get_metadata("test_metadata_round_trip")
            .await
            .unwrap(),
        Some(Bson::String("overwritten".to_string()))
    );

    assert_eq!(
        repos
            .metadata
            .get_metadata("test_metadata_absent_key")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn recruitment_upsert_is_idempotent() {
    let (connector, repos) = connect().await;
    let ids = [9_000_000_001_i64, 9_000_000_002];
    repos
        .recruitment
        .delete_recruitment_announces(ids_filter(&ids))
        .await
        .unwrap();

    let time = Utc.with_ymd_and_hms(2023, 3, 1, 18, 0, 0).unwrap();
    let announces = vec![
        Message { id: 9_000_000_001, author: 1, time },
        Message { id: 9_000_000_002, author: 2, time: time + chrono::Duration::hours(1) },
    ];

    let first = repos
        .recruitment
        .update_recruitment_announces(&announces)
        .await
        .unwrap();
    let second = repos
        .recruitment
        .update_recruitment_announces(&announces)
        .await
        .unwrap();
    assert_eq!(first, 2);
    assert_eq!(second, 0);

    let count = connector
        .collection(CollectionName::RecruitmentAnnounce)
        .unwrap()
        .count_documents(ids_filter(&ids))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let loaded = repos
        .recruitment
        .load_recruitment_announces_data(ids_filter(&ids), &SortOrder::new().descending("time"))
        .await
        .unwrap();
    let loaded_ids: Vec<Bson> = loaded.iter().map(|a| a.id.clone()).collect();
    assert_eq!(loaded_ids, vec![Bson::Int64(ids[1]), Bson::Int64(ids[0])]);
    assert!(loaded.iter().all(|a| !a.dummy));

    let deleted = repos
        .recruitment
        .delete_recruitment_announces(ids_filter(&ids))
        .await
        .unwrap();
    assert_eq!(deleted, 2);
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn deleting_nothing_reports_zero() {
    let (_connector, repos) = connect().await;
    let deleted = repos
        .recruitment
        .delete_recruitment_announces(doc! { "author": -1_i64 })
        .await
        .unwrap();
    assert_eq!(deleted, 0);
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn dummy_announce_gets_a_fresh_id() {
    let (_connector, repos) = connect().await;
    let member = Member {
        id: 9_000_000_100,
        name: "Dummy",
        created: Utc::now(),
    };
    let time = Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap();

    let id = repos
        .recruitment
        .insert_recruitment_announce(&member, time)
        .await
        .unwrap();
    assert!(id.as_object_id().is_some());

    let loaded = repos
        .recruitment
        .load_recruitment_announces_data(doc! { "_id": id.clone() }, &SortOrder::new())
        .await
        .unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].dummy);
    assert_eq!(loaded[0].author, 9_000_000_100);

    repos
        .recruitment
        .delete_recruitment_announces(doc! { "_id": id })
        .await
        .unwrap();
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn pending_jobs_reload_keyed_by_message_id() {
    let (_connector, repos) = connect().await;
    let jobs = [
        PendingJob {
            job_id: Bson::String("test_lottery_a".to_string()),
            message_id: 9_000_000_201,
            fields: doc! { "emoji_code": "🎉", "nb_winners": 1, "organizer_id": 5_i64 },
        },
        PendingJob {
            job_id: Bson::String("test_lottery_b".to_string()),
            message_id: 9_000_000_202,
            fields: doc! { "emoji_code": "🍀", "nb_winners": 2, "organizer_id": 6_i64 },
        },
    ];
    for job in &jobs {
        repos
            .jobs
            .delete_job_data(JobStore::Lottery, job.job_id.clone())
            .await
            .unwrap();
        repos
            .jobs
            .insert_job_data(JobStore::Lottery, job)
            .await
            .unwrap();
    }

    repos
        .jobs
        .update_job_data(JobStore::Lottery, "test_lottery_b", doc! { "nb_winners": 4 })
        .await
        .unwrap();

    let loaded = repos
        .jobs
        .load_pending_jobs_data(JobStore::Lottery, &["emoji_code", "nb_winners"])
        .await
        .unwrap();
    let a = &loaded[&9_000_000_201];
    let b = &loaded[&9_000_000_202];
    assert_eq!(a.get_str("emoji_code").unwrap(), "🎉");
    assert_eq!(b.get_i32("nb_winners").unwrap(), 4);
    assert!(!a.contains_key("organizer_id"));

    for job in &jobs {
        repos
            .jobs
            .delete_job_data(JobStore::Lottery, job.job_id.clone())
            .await
            .unwrap();
    }
    let loaded = repos
        .jobs
        .load_pending_jobs_data(JobStore::Lottery, &["emoji_code"])
        .await
        .unwrap();
    assert!(!loaded.contains_key(&9_000_000_201));
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn accounts_upsert_and_unrecorded_members() {
    let (connector, repos) = connect().await;
    let accounts = connector.collection(CollectionName::AccountData).unwrap();
    let ids = [9_000_000_301_i64, 9_000_000_302, 9_000_000_303];
    accounts.delete_many(ids_filter(&ids)).await.unwrap();

    let created = Utc.with_ymd_and_hms(2019, 9, 9, 9, 9, 9).unwrap();
    let members = vec![
        Member { id: 9_000_000_303, name: "Third", created },
        Member { id: 9_000_000_301, name: "First", created },
        Member { id: 9_000_000_302, name: "Second", created },
    ];

    let recorded = vec![(&members[1], AccountDataUpdate::from_member(&members[1]))];
    assert_eq!(repos.accounts.update_accounts_data(&recorded).await.unwrap(), 1);
    assert_eq!(repos.accounts.update_accounts_data(&recorded).await.unwrap(), 0);
    assert_eq!(accounts.count_documents(ids_filter(&ids)).await.unwrap(), 1);

    let stored = repos
        .accounts
        .get_account_data(9_000_000_301)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, 9_000_000_301);
    assert_eq!(stored.display_name, "First");
    assert_eq!(stored.creation_date, created.timestamp() as f64);
    assert!(stored.extra.is_empty());
    assert!(repos.accounts.get_account_data(9_000_000_302).await.unwrap().is_none());

    let unrecorded: Vec<u64> = repos
        .accounts
        .get_unrecorded_members(&members)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(unrecorded, vec![9_000_000_303, 9_000_000_302]);

    accounts.delete_many(ids_filter(&ids)).await.unwrap();
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn anniversary_end_to_end() {
    let (connector, repos) = connect().await;
    let accounts = connector.collection(CollectionName::AccountData).unwrap();
    let ids = [9_000_000_401_i64, 9_000_000_402];
    accounts.delete_many(ids_filter(&ids)).await.unwrap();

    let paris = |y, m, d, h| {
        COMMUNITY_TIMEZONE
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    };
    let reference = paris(2031, 6, 15, 10);
    let members = vec![
        Member { id: 9_000_000_401, name: "Two years", created: paris(2029, 6, 15, 20) },
        Member { id: 9_000_000_402, name: "Off by a day", created: paris(2029, 6, 14, 20) },
    ];
    let updates: Vec<_> = members
        .iter()
        .map(|m| (m, AccountDataUpdate::from_member(m)))
        .collect();
    repos.accounts.update_accounts_data(&updates).await.unwrap();

    let buckets = repos
        .accounts
        .get_anniversary_account_ids(&reference, paris(2029, 1, 1, 0))
        .await
        .unwrap();
    let bucket_two: HashSet<i64> = buckets.get(&2).cloned().unwrap_or_default().into_iter().collect();
    assert!(bucket_two.contains(&9_000_000_401));
    assert!(!bucket_two.contains(&9_000_000_402));
    assert!(
        buckets
            .get(&1)
            .is_none_or(|ids| !ids.contains(&9_000_000_401))
    );

    accounts.delete_many(ids_filter(&ids)).await.unwrap();
}

#[tokio::test]
#[cfg_attr(not(feature = "live-db"), ignore)]
async fn automessage_projection_hides_extra_fields() {
    let (connector, repos) = connect().await;
    let document_id = repos
        .automessages
        .insert_automessage(9_000_000_501, "Pensez à voter !", &Channel(77))
        .await
        .unwrap();
    connector
        .collection(CollectionName::AutoMessage)
        .unwrap()
        .update_one(doc! { "_id": document_id }, doc! { "$set": { "legacy": true } })
        .await
        .unwrap();

    repos
        .automessages
        .update_automessages(&[(
            document_id,
            AutoMessageUpdate {
                message: Some("Votez !".to_string()),
                ..Default::default()
            },
        )])
        .await
        .unwrap();

    let loaded = repos
        .automessages
        .load_automessages(
            doc! { "automessage_id": 9_000_000_501_i64 },
            &[AutoMessageField::Message, AutoMessageField::ChannelId],
        )
        .await
        .unwrap();
    assert_eq!(loaded, vec![doc! { "message": "Votez !", "channel_id": 77_i64 }]);

    repos
        .automessages
        .delete_automessage(document_id)
        .await
        .unwrap();
    let loaded = repos
        .automessages
        .load_automessages(
            doc! { "automessage_id": 9_000_000_501_i64 },
            &[AutoMessageField::Id],
        )
        .await
        .unwrap();
    assert!(loaded.is_empty());
}
