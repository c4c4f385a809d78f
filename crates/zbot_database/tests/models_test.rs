use bson::{Bson, doc};
use chrono::{DateTime, TimeZone, Utc};
use strum::IntoEnumIterator;
use zbot_core::ChatMember;
use zbot_database::{
    AccountDataUpdate, AutoMessageField, AutoMessageUpdate, PendingJob, RecruitmentAnnounce,
    SortOrder, projection_document, retain_fields,
};

struct Member;

impl ChatMember for Member {
    fn id(&self) -> u64 {
        1
    }

    fn display_name(&self) -> String {
        "Link".to_string()
    }

    fn created_at(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }
}

#[test]
fn account_update_from_member_records_creation_and_name() {
    let update = AccountDataUpdate::from_member(&Member);
    let set = update.to_set_document().unwrap();
    assert_eq!(set.get_f64("creation_date").unwrap(), 1_577_836_800.0);
    assert_eq!(set.get_str("display_name").unwrap(), "Link");
    assert_eq!(set.len(), 2);
}

#[test]
fn account_update_carries_extra_fields() {
    let update = AccountDataUpdate {
        extra: doc! { "last_message": 1_700_000_000.0 },
        ..Default::default()
    };
    let set = update.to_set_document().unwrap();
    assert_eq!(set, doc! { "last_message": 1_700_000_000.0 });
}

#[test]
fn empty_automessage_update_sets_nothing() {
    assert!(
        AutoMessageUpdate::default()
            .to_set_document()
            .unwrap()
            .is_empty()
    );

    let update = AutoMessageUpdate {
        message: Some("Pensez à voter !".to_string()),
        ..Default::default()
    };
    assert_eq!(
        update.to_set_document().unwrap(),
        doc! { "message": "Pensez à voter !" }
    );
}

#[test]
fn pending_job_keeps_scheduler_fields_at_top_level() {
    let job = PendingJob {
        job_id: Bson::String("lottery_42".to_string()),
        message_id: 42,
        fields: doc! { "emoji_code": "🎉", "nb_winners": 3 },
    };
    let document = bson::to_document(&job).unwrap();
    assert_eq!(document.get_str("_id").unwrap(), "lottery_42");
    assert_eq!(document.get_i64("message_id").unwrap(), 42);
    assert_eq!(document.get_i32("nb_winners").unwrap(), 3);

    let back: PendingJob = bson::from_document(document).unwrap();
    assert_eq!(back, job);
}

#[test]
fn dummy_flag_is_only_written_for_placeholders() {
    let announce = RecruitmentAnnounce {
        id: Bson::Int64(7),
        author: 1,
        time: Utc.with_ymd_and_hms(2022, 5, 5, 10, 0, 0).unwrap(),
        dummy: false,
    };
    let document = bson::to_document(&announce).unwrap();
    assert!(!document.contains_key("dummy"));

    let placeholder: RecruitmentAnnounce = bson::from_document(doc! {
        "_id": bson::oid::ObjectId::new(),
        "author": 1_i64,
        "time": bson::DateTime::from_chrono(announce.time),
        "dummy": true,
    })
    .unwrap();
    assert!(placeholder.dummy);
    assert_eq!(placeholder.time, announce.time);
}

#[test]
fn sort_order_preserves_key_order() {
    let order = SortOrder::new().ascending("time").descending("author");
    assert_eq!(order.to_document(), doc! { "time": 1, "author": -1 });
    assert!(SortOrder::new().is_empty());
}

#[test]
fn retain_fields_drops_unrequested_fields() {
    let stored = doc! {
        "_id": bson::oid::ObjectId::new(),
        "automessage_id": 3_i64,
        "message": "hello",
        "channel_id": 99_i64,
        "legacy_field": true,
    };
    let keys = [AutoMessageField::Message.as_ref(), AutoMessageField::ChannelId.as_ref()];
    let projected = retain_fields(stored, &keys);
    assert_eq!(projected, doc! { "message": "hello", "channel_id": 99_i64 });
}

#[test]
fn projection_lists_requested_fields() {
    let all: Vec<AutoMessageField> = AutoMessageField::iter().collect();
    let fields: Vec<&str> = all.iter().map(|f| f.as_ref()).collect();
    assert_eq!(fields, vec!["_id", "automessage_id", "message", "channel_id"]);
    assert_eq!(
        projection_document(&fields),
        doc! { "_id": 1, "automessage_id": 1, "message": 1, "channel_id": 1 }
    );
}
