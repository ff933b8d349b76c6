mod common;

use cpr_tracker::cpr::{change_set, flatten, transition};
use cpr_tracker::models::Status;

use common::{at, sample_subject};

#[test]
fn test_fresh_rows_have_no_changes() {
    let rows = flatten(&sample_subject());
    assert!(change_set(&rows, &rows.clone()).is_empty());
}

#[test]
fn test_only_changed_row_is_reported() {
    let snapshot = flatten(&sample_subject());
    let mut live = snapshot.clone();
    live[2] = transition(&live[2], Status::InProgress, at(2, 9));

    let changes = change_set(&live, &snapshot);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].sub_topic_id, "s3");
    assert_eq!(changes[0].status, Status::InProgress);
}

#[test]
fn test_timestamp_only_change_is_reported() {
    let mut snapshot = flatten(&sample_subject());
    snapshot[0] = transition(&snapshot[0], Status::InProgress, at(2, 9));
    let mut live = snapshot.clone();
    live[0].actual_start = Some(at(1, 9));

    let changes = change_set(&live, &snapshot);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].sub_topic_id, "s1");
}

#[test]
fn test_edit_reverted_by_hand_is_not_a_change() {
    let snapshot = flatten(&sample_subject());
    let mut live = snapshot.clone();
    live[1] = transition(&live[1], Status::Completed, at(2, 9));
    live[1] = transition(&live[1], Status::Pending, at(2, 10));

    assert!(change_set(&live, &snapshot).is_empty());
}

#[test]
fn test_rows_missing_from_snapshot_are_included() {
    let live = flatten(&sample_subject());
    let snapshot: Vec<_> = live.iter().filter(|r| r.sub_topic_id != "s4").cloned().collect();

    let changes = change_set(&live, &snapshot);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].sub_topic_id, "s4");
    assert_eq!(change_set(&live, &[]).len(), live.len());
}

#[test]
fn test_changes_follow_live_order() {
    let snapshot = flatten(&sample_subject());
    let mut live = snapshot.clone();
    for idx in [5, 0, 3] {
        live[idx] = transition(&live[idx], Status::InProgress, at(2, 9));
    }

    let ids: Vec<_> = change_set(&live, &snapshot)
        .into_iter()
        .map(|r| r.sub_topic_id)
        .collect();
    assert_eq!(ids, vec!["s1", "s4", "s6"]);
}
