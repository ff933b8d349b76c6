use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cpr::{self, Progress};
use crate::error::AppError;
use crate::models::{Row, Status, Subject};

/// Editable state of one subject's progress table.
///
/// `rows` is the live, user-edited set; `snapshot` is the last state known to
/// be persisted. `load_id` changes every time a subject is (re)selected, so
/// work started against an earlier load can be recognised as stale.
#[derive(Debug)]
pub struct SubjectView {
    subject_id: Option<String>,
    subject_name: String,
    load_id: Uuid,
    loading: bool,
    saving: bool,
    rows: Vec<Row>,
    snapshot: Vec<Row>,
}

/// A sync batch handed out by [`SubjectView::begin_sync`].
#[derive(Debug, Clone)]
pub struct SyncTicket {
    pub load_id: Uuid,
    pub subject_id: String,
    pub changes: Vec<Row>,
    pub sent: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCompletion {
    Promoted,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    #[serde(flatten)]
    pub row: Row,
    pub delayed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub subject_id: Option<String>,
    pub subject_name: String,
    pub loading: bool,
    pub saving: bool,
    pub has_changes: bool,
    pub progress: Progress,
    pub rows: Vec<RowView>,
}

impl Default for SubjectView {
    fn default() -> Self {
        Self {
            subject_id: None,
            subject_name: String::new(),
            load_id: Uuid::new_v4(),
            loading: false,
            saving: false,
            rows: Vec::new(),
            snapshot: Vec::new(),
        }
    }
}

impl SubjectView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    pub fn load_id(&self) -> Uuid {
        self.load_id
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn snapshot(&self) -> &[Row] {
        &self.snapshot
    }

    /// Start selecting `subject_id`: the previous table is dropped and any
    /// load or sync still in flight becomes stale.
    pub fn begin_load(&mut self, subject_id: &str) -> Uuid {
        self.subject_id = Some(subject_id.to_string());
        self.subject_name.clear();
        self.load_id = Uuid::new_v4();
        self.loading = true;
        self.saving = false;
        self.rows.clear();
        self.snapshot.clear();
        self.load_id
    }

    /// Install a fetched tree. Returns false if a newer selection superseded it.
    pub fn complete_load(&mut self, load_id: Uuid, subject: &Subject) -> bool {
        if load_id != self.load_id {
            return false;
        }
        self.subject_name = subject.name.clone();
        self.rows = cpr::flatten(subject);
        self.snapshot = self.rows.clone();
        self.loading = false;
        true
    }

    /// A failed fetch leaves an empty table behind.
    pub fn fail_load(&mut self, load_id: Uuid) -> bool {
        if load_id != self.load_id {
            return false;
        }
        self.loading = false;
        self.rows.clear();
        self.snapshot.clear();
        true
    }

    /// Drop the selected subject. Any load or sync still in flight becomes stale.
    pub fn clear(&mut self) {
        self.subject_id = None;
        self.subject_name.clear();
        self.load_id = Uuid::new_v4();
        self.loading = false;
        self.saving = false;
        self.rows.clear();
        self.snapshot.clear();
    }

    /// Load a tree in one step.
    pub fn load(&mut self, subject: &Subject) -> Uuid {
        let load_id = self.begin_load(&subject.id);
        self.complete_load(load_id, subject);
        load_id
    }

    pub fn set_status(
        &mut self,
        sub_topic_id: &str,
        status: Status,
        now: DateTime<Utc>,
    ) -> Result<&Row, AppError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.sub_topic_id == sub_topic_id)
            .ok_or_else(|| AppError::NotFound(format!("sub-topic {}", sub_topic_id)))?;

        *row = cpr::transition(row, status, now);
        Ok(&*row)
    }

    pub fn changes(&self) -> Vec<Row> {
        cpr::change_set(&self.rows, &self.snapshot)
    }

    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty()
    }

    /// Revert unsaved edits. Returns how many rows were reverted.
    pub fn discard(&mut self) -> usize {
        let reverted = self.changes().len();
        self.rows = self.snapshot.clone();
        reverted
    }

    pub fn begin_sync(&mut self) -> Result<SyncTicket, AppError> {
        let subject_id = match (&self.subject_id, self.loading) {
            (Some(id), false) => id.clone(),
            _ => return Err(AppError::BadRequest("No subject loaded".to_string())),
        };
        if self.saving {
            return Err(AppError::Conflict("A save is already in progress".to_string()));
        }

        self.saving = true;
        Ok(SyncTicket {
            load_id: self.load_id,
            subject_id,
            changes: self.changes(),
            sent: self.rows.clone(),
        })
    }

    /// Settle a batch. On success the rows as they were sent become the new
    /// snapshot; on failure the snapshot is left alone. Completions for an
    /// earlier load are ignored.
    pub fn finish_sync(&mut self, ticket: &SyncTicket, succeeded: bool) -> SyncCompletion {
        if ticket.load_id != self.load_id {
            return SyncCompletion::Stale;
        }
        self.saving = false;
        if succeeded {
            self.snapshot = ticket.sent.clone();
            SyncCompletion::Promoted
        } else {
            SyncCompletion::Failed
        }
    }

    pub fn state(&self, now: DateTime<Utc>) -> ViewState {
        ViewState {
            subject_id: self.subject_id.clone(),
            subject_name: self.subject_name.clone(),
            loading: self.loading,
            saving: self.saving,
            has_changes: self.has_changes(),
            progress: cpr::progress(&self.rows, now),
            rows: self
                .rows
                .iter()
                .map(|row| RowView {
                    delayed: cpr::is_delayed(row, now),
                    row: row.clone(),
                })
                .collect(),
        }
    }
}
