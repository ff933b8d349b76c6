use chrono::{DateTime, Utc};

use crate::models::{Row, Status};

/// Apply a status change to a row, deriving the actual timestamps.
///
/// * `-> Pending` clears both actual timestamps.
/// * `-> InProgress` stamps `actual_start` if unset and drops any `actual_end`.
/// * `-> Completed` stamps `actual_start` if unset and `actual_end` to `now`.
///
/// Requesting the status a row already has returns it unchanged, so a
/// completed row keeps its original `actual_end`. Pending is the exception:
/// it always clears, even on a row that was already pending.
pub fn transition(row: &Row, to: Status, now: DateTime<Utc>) -> Row {
    let mut next = row.clone();

    match to {
        Status::Pending => {
            next.actual_start = None;
            next.actual_end = None;
        }
        _ if row.status == to => return next,
        Status::InProgress => {
            next.actual_start = row.actual_start.or(Some(now));
            next.actual_end = None;
        }
        Status::Completed => {
            next.actual_start = row.actual_start.or(Some(now));
            next.actual_end = Some(now);
        }
    }
    next.status = to;
    next
}

/// A row is delayed when it is not completed and its planned end has passed.
pub fn is_delayed(row: &Row, now: DateTime<Utc>) -> bool {
    match row.planned_end {
        Some(planned_end) => row.status != Status::Completed && now > planned_end,
        None => false,
    }
}
