use super::normalize::{LOADING_REPLY, normalize};
use crate::{
    Error,
    config::{Config, ExecutionMode},
    inference::{InferenceClient, InferencePayload},
};
use axum::http::{Method, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{debug, error, info};

const MODEL_LOADING_STATUS: u16 = 503;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// Decodes a request body. Anything that is not a JSON object with a
    /// string `message` is treated as carrying no message.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

/// Terminal success states of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Preflight,
    Reply(String),
}

#[derive(Debug, ThisError)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Failed to read request body")]
    UnreadableBody,

    #[error("Message is required")]
    MissingMessage,

    #[error("API token not configured")]
    TokenNotConfigured,

    #[error("Failed to process your request")]
    Upstream(#[source] Error),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnreadableBody | Self::MissingMessage => StatusCode::BAD_REQUEST,
            Self::TokenNotConfigured | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic detail for callers, only ever exposed in development mode.
    pub fn details(&self, mode: ExecutionMode) -> Option<String> {
        match self {
            Self::Upstream(source) if mode.is_development() => Some(source.to_string()),
            _ => None,
        }
    }
}

pub struct ChatRelay {
    client: Arc<dyn InferenceClient>,
    api_token: Option<String>,
    mode: ExecutionMode,
}

impl ChatRelay {
    pub fn new(config: &Config, client: Arc<dyn InferenceClient>) -> Self {
        Self {
            client,
            api_token: config.inference.token().map(str::to_string),
            mode: config.server.mode,
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Runs the full admission pipeline for a raw inbound request.
    pub async fn dispatch(&self, method: &Method, body: &[u8]) -> Result<Outcome, RelayError> {
        if *method == Method::OPTIONS {
            return Ok(Outcome::Preflight);
        }

        if *method != Method::POST {
            return Err(RelayError::MethodNotAllowed);
        }

        let request = ChatRequest::from_body(body);
        self.handle(request.message.as_deref())
            .await
            .map(Outcome::Reply)
    }

    /// Validates the message, calls the inference service once and
    /// normalizes its answer.
    pub async fn handle(&self, message: Option<&str>) -> Result<String, RelayError> {
        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => return Err(RelayError::MissingMessage),
        };

        let token = self
            .api_token
            .as_deref()
            .ok_or(RelayError::TokenNotConfigured)?;

        info!("Relaying message of {} bytes", message.len());

        let payload = InferencePayload::new(message);
        match self.client.generate(token, &payload).await {
            Ok(result) => {
                let reply = normalize(result, message);
                debug!("Normalized reply of {} bytes", reply.len());
                Ok(reply)
            }
            Err(e) => {
                if let Error::Upstream { status, body } = &e {
                    error!("Inference API error ({}): {}", status, body);
                }

                if e.upstream_status() == Some(MODEL_LOADING_STATUS) {
                    info!("Model is loading, returning placeholder reply");
                    return Ok(LOADING_REPLY.to_string());
                }

                error!("Failed to process chat request: {}", e);
                Err(RelayError::Upstream(e))
            }
        }
    }
}
