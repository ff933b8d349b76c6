use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// One flattened sub-topic, ready for a row-merged table.
///
/// `module_span` / `topic_span` hold the number of rows sharing this row's
/// module / topic; only the row flagged `is_first_in_*` renders the merged cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub sub_topic_id: String,
    pub sub_topic_name: String,
    pub order: i32,
    pub lecture_number: Option<i32>,
    pub module_id: String,
    pub module_name: String,
    pub topic_id: String,
    pub topic_name: String,
    pub module_span: usize,
    pub topic_span: usize,
    pub is_first_in_module: bool,
    pub is_first_in_topic: bool,
    pub status: Status,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
}

impl Row {
    /// True when the persisted fields differ from `other`.
    pub fn differs_from(&self, other: &Row) -> bool {
        self.status != other.status
            || self.actual_start != other.actual_start
            || self.actual_end != other.actual_end
    }
}
