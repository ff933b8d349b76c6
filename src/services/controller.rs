use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::sync_service::SyncService;
use super::view::{RowView, SubjectView, SyncCompletion, ViewState};
use crate::client::CprClient;
use crate::error::AppError;
use crate::models::{Row, Status};

#[derive(Debug, Serialize)]
pub struct SyncStats {
    pub subject_id: String,
    pub pushed: usize,
    pub promoted: bool,
}

/// Owns the subject view and is the only place that talks to the backend.
/// The view lock is never held across a network call.
pub struct CprController {
    client: Arc<dyn CprClient>,
    view: Arc<Mutex<SubjectView>>,
}

impl CprController {
    pub fn new(client: Arc<dyn CprClient>) -> Self {
        Self {
            client,
            view: Arc::new(Mutex::new(SubjectView::new())),
        }
    }

    pub async fn select_subject(&self, subject_id: &str) -> Result<ViewState, AppError> {
        let load_id = self.view.lock().await.begin_load(subject_id);

        match self.client.fetch_subject(subject_id).await {
            Ok(subject) => {
                let mut view = self.view.lock().await;
                if !view.complete_load(load_id, &subject) {
                    warn!("discarding stale load of subject {}", subject_id);
                    return Err(AppError::Conflict(format!(
                        "Subject {} was superseded by another selection",
                        subject_id
                    )));
                }
                info!("loaded subject {} ({} rows)", subject_id, view.rows().len());
                Ok(view.state(Utc::now()))
            }
            Err(e) => {
                self.view.lock().await.fail_load(load_id);
                Err(e)
            }
        }
    }

    pub async fn state(&self) -> ViewState {
        self.view.lock().await.state(Utc::now())
    }

    pub async fn set_status(&self, sub_topic_id: &str, status: Status) -> Result<RowView, AppError> {
        let now = Utc::now();
        let mut view = self.view.lock().await;
        let row = view.set_status(sub_topic_id, status, now)?.clone();
        Ok(RowView {
            delayed: crate::cpr::is_delayed(&row, now),
            row,
        })
    }

    pub async fn changes(&self) -> Vec<Row> {
        self.view.lock().await.changes()
    }

    pub async fn discard(&self) -> usize {
        self.view.lock().await.discard()
    }

    /// Push the current change-set, one row at a time.
    ///
    /// The batch runs on its own task and settles the view itself, so a
    /// caller that goes away mid-save never leaves the view stuck in `saving`.
    pub async fn sync(&self) -> Result<SyncStats, AppError> {
        let ticket = self.view.lock().await.begin_sync()?;
        info!(
            "syncing {} changed rows for subject {}",
            ticket.changes.len(),
            ticket.subject_id
        );

        let client = self.client.clone();
        let view = self.view.clone();
        let batch = tokio::spawn(async move {
            let result = SyncService::new(client)
                .push_changes(&ticket.changes)
                .await;

            let completion = view.lock().await.finish_sync(&ticket, result.is_ok());
            if completion == SyncCompletion::Stale {
                warn!(
                    "subject {} was reloaded during sync, ignoring completion",
                    ticket.subject_id
                );
            }

            let pushed = result?;
            info!("synced {} rows for subject {}", pushed, ticket.subject_id);
            Ok::<_, AppError>(SyncStats {
                subject_id: ticket.subject_id,
                pushed,
                promoted: completion == SyncCompletion::Promoted,
            })
        });

        batch
            .await
            .map_err(|e| AppError::Internal(format!("sync task failed: {}", e)))?
    }
}
