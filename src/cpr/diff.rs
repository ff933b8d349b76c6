use std::collections::HashMap;

use crate::models::Row;

/// Rows of `live` whose status or actual timestamps differ from the row with
/// the same sub-topic id in `snapshot`. Rows missing from the snapshot are
/// always included.
pub fn change_set(live: &[Row], snapshot: &[Row]) -> Vec<Row> {
    let baseline: HashMap<&str, &Row> = snapshot
        .iter()
        .map(|r| (r.sub_topic_id.as_str(), r))
        .collect();

    live.iter()
        .filter(|row| match baseline.get(row.sub_topic_id.as_str()) {
            Some(original) => row.differs_from(original),
            None => true,
        })
        .cloned()
        .collect()
}
