use super::types::*;
use crate::{Error, Result, config::InferenceConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one generation request. Non-success statuses come back as
    /// [`Error::Upstream`] carrying the response body, unlogged.
    async fn generate(&self, token: &str, payload: &InferencePayload) -> Result<InferenceResult>;
}

pub struct HttpInferenceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpInferenceClient {
    pub fn new(config: &InferenceConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &InferenceConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn generate(&self, token: &str, payload: &InferencePayload) -> Result<InferenceResult> {
        debug!("Sending inference request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        let data: Value = response.json().await?;
        debug!("Received inference response");

        Ok(InferenceResult::from(data))
    }
}
