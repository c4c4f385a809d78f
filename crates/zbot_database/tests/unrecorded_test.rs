use chrono::{DateTime, Utc};
use std::collections::HashSet;
use zbot_core::ChatMember;
use zbot_database::filter_unrecorded;

#[derive(Debug, PartialEq)]
struct Member(u64);

impl ChatMember for Member {
    fn id(&self) -> u64 {
        self.0
    }

    fn display_name(&self) -> String {
        format!("member-{}", self.0)
    }

    fn created_at(&self) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
    }
}

#[test]
fn keeps_unrecorded_members_in_input_order() {
    let members = vec![Member(5), Member(1), Member(9), Member(3), Member(7)];
    let recorded: HashSet<i64> = [1, 7].into_iter().collect();

    let unrecorded = filter_unrecorded(&members, &recorded);

    assert_eq!(unrecorded, vec![&Member(5), &Member(9), &Member(3)]);
}

#[test]
fn everyone_recorded_yields_nothing() {
    let members = vec![Member(1), Member(2)];
    let recorded: HashSet<i64> = [1, 2, 3].into_iter().collect();
    assert!(filter_unrecorded(&members, &recorded).is_empty());
}

#[test]
fn empty_collection_returns_every_member() {
    let members = vec![Member(4), Member(2)];
    let unrecorded = filter_unrecorded(&members, &HashSet::new());
    assert_eq!(unrecorded.len(), 2);
}
