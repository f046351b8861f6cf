use async_trait::async_trait;
use chat_relay::{
    Error, Result,
    inference::{InferenceClient, InferencePayload, InferenceResult},
};
use serde_json::Value;
use std::{
    io,
    sync::{Arc, Mutex},
};

/// A recorded call to the mock inference client
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub token: String,
    pub payload: InferencePayload,
}

/// Mock inference client for testing
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub reply: MockReply,
}

#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(u16, String),
    Failure(String),
}

impl MockInferenceClient {
    pub fn with_json(value: Value) -> Self {
        Self::new(MockReply::Json(value))
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self::new(MockReply::Status(status, body.to_string()))
    }

    pub fn with_failure(message: &str) -> Self {
        Self::new(MockReply::Failure(message.to_string()))
    }

    fn new(reply: MockReply) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply,
        }
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn generate(&self, token: &str, payload: &InferencePayload) -> Result<InferenceResult> {
        self.calls.lock().unwrap().push(RecordedCall {
            token: token.to_string(),
            payload: payload.clone(),
        });

        match &self.reply {
            MockReply::Json(value) => Ok(InferenceResult::from(value.clone())),
            MockReply::Status(status, body) => Err(Error::upstream(*status, body.clone())),
            MockReply::Failure(message) => Err(Error::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                message.clone(),
            ))),
        }
    }
}
