pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::Subject;
use dto::{StatusUpdateRequest, SubjectResponse};

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl ApiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("CPR_API_URL")
            .map_err(|_| AppError::Config("CPR_API_URL is not set".to_string()))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "CPR_API_URL must be an http(s) URL, got {}",
                base_url
            )));
        }
        let api_token = env::var("CPR_API_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

/// The backend that owns subjects and sub-topic progress.
#[async_trait]
pub trait CprClient: Send + Sync {
    async fn fetch_subject(&self, subject_id: &str) -> Result<Subject, AppError>;
    async fn update_sub_topic_status(
        &self,
        sub_topic_id: &str,
        update: &StatusUpdateRequest,
    ) -> Result<(), AppError>;
}

pub struct CprHttpClient {
    client: Client,
    config: ApiConfig,
}

impl CprHttpClient {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[async_trait]
impl CprClient for CprHttpClient {
    async fn fetch_subject(&self, subject_id: &str) -> Result<Subject, AppError> {
        let url = self.url(&format!("subject/{}", subject_id));
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Failed to fetch subject {}: {} {}",
                subject_id, status, body
            )));
        }

        let body_text = response.text().await?;
        let parsed: SubjectResponse = serde_json::from_str(&body_text).map_err(|e| {
            AppError::Upstream(format!("Failed to parse subject {}: {}", subject_id, e))
        })?;

        let subject = parsed.into_dto().into_subject(subject_id);
        info!(
            "fetched subject {} ({} modules, {} sub-topics)",
            subject.id,
            subject.modules.len(),
            subject.sub_topic_count()
        );
        Ok(subject)
    }

    async fn update_sub_topic_status(
        &self,
        sub_topic_id: &str,
        update: &StatusUpdateRequest,
    ) -> Result<(), AppError> {
        let url = self.url(&format!("sub-topic/{}/status", sub_topic_id));
        debug!("PATCH {} status={}", url, update.status);

        let response = self
            .authorize(self.client.patch(&url))
            .json(update)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Failed to update sub-topic {}: {} {}",
                sub_topic_id, status, body
            )));
        }

        Ok(())
    }
}

pub struct NoopCprClient;

#[async_trait]
impl CprClient for NoopCprClient {
    async fn fetch_subject(&self, subject_id: &str) -> Result<Subject, AppError> {
        Ok(Subject::empty(subject_id))
    }

    async fn update_sub_topic_status(
        &self,
        _sub_topic_id: &str,
        _update: &StatusUpdateRequest,
    ) -> Result<(), AppError> {
        Ok(())
    }
}
