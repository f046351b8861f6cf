use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferencePayload {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub temperature: f64,
    pub do_sample: bool,
    pub pad_token_id: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: 100,
            temperature: 0.7,
            do_sample: true,
            pad_token_id: 50256,
        }
    }
}

impl InferencePayload {
    pub fn new(inputs: impl Into<String>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: GenerationParameters::default(),
        }
    }
}

/// The shapes an inference service may answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    /// A non-empty array; only the first element is retained.
    Candidates(Candidate),
    /// A bare object carrying `generated_text`.
    Single(String),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Generated(String),
    Summary(String),
    Other(Value),
}

impl From<Value> for InferenceResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => match items.into_iter().next() {
                Some(first) => Self::Candidates(Candidate::from(first)),
                None => Self::Unrecognized,
            },
            Value::Object(ref map) => match text_field(map, "generated_text") {
                Some(text) => Self::Single(text),
                None => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

impl From<Value> for Candidate {
    fn from(value: Value) -> Self {
        if let Value::Object(ref map) = value {
            if let Some(text) = text_field(map, "generated_text") {
                return Self::Generated(text);
            }
            if let Some(text) = text_field(map, "summary_text") {
                return Self::Summary(text);
            }
        }
        Self::Other(value)
    }
}

// Present means a non-empty string.
fn text_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}
