use std::sync::Arc;

use crate::client::CprClient;
use crate::services::CprController;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<CprController>,
}

impl AppState {
    pub fn new(client: Arc<dyn CprClient>) -> Self {
        Self {
            controller: Arc::new(CprController::new(client)),
        }
    }
}
