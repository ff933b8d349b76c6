use chrono::{DateTime, Utc};
use serde::Serialize;

use super::transition::is_delayed;
use crate::models::{Row, Status};

/// Summary shown above the progress table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delayed: usize,
    pub percent_completed: f64,
}

pub fn progress(rows: &[Row], now: DateTime<Utc>) -> Progress {
    let mut summary = Progress {
        total: rows.len(),
        ..Progress::default()
    };

    for row in rows {
        match row.status {
            Status::Pending => summary.pending += 1,
            Status::InProgress => summary.in_progress += 1,
            Status::Completed => summary.completed += 1,
        }
        if is_delayed(row, now) {
            summary.delayed += 1;
        }
    }

    if summary.total > 0 {
        summary.percent_completed = summary.completed as f64 * 100.0 / summary.total as f64;
    }
    summary
}
