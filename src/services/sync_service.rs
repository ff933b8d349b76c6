use std::sync::Arc;

use futures::{TryStreamExt, stream};
use tracing::{debug, error};

use crate::client::{CprClient, dto::StatusUpdateRequest};
use crate::error::AppError;
use crate::models::Row;

pub struct SyncService {
    client: Arc<dyn CprClient>,
}

impl SyncService {
    pub fn new(client: Arc<dyn CprClient>) -> Self {
        Self { client }
    }

    /// Persist `changes` one row at a time, stopping at the first failure.
    /// Rows applied before a failure are not rolled back.
    pub async fn push_changes(&self, changes: &[Row]) -> Result<usize, AppError> {
        let total = changes.len();

        stream::iter(changes.iter().map(Ok::<_, AppError>))
            .try_fold(0usize, |applied, row| async move {
                let update = StatusUpdateRequest::from_row(row);
                match self
                    .client
                    .update_sub_topic_status(&row.sub_topic_id, &update)
                    .await
                {
                    Ok(()) => {
                        debug!("updated sub-topic {} -> {}", row.sub_topic_id, update.status);
                        Ok(applied + 1)
                    }
                    Err(e) => {
                        error!("failed to update sub-topic {}: {}", row.sub_topic_id, e);
                        Err(AppError::SyncFailed {
                            sub_topic_id: row.sub_topic_id.clone(),
                            applied,
                            total,
                            reason: e.to_string(),
                        })
                    }
                }
            })
            .await
    }
}
