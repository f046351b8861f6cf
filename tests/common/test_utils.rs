use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chat_relay::{
    config::{Config, ExecutionMode, InferenceConfig, LogsConfig, ServerConfig},
    inference::{HttpInferenceClient, InferenceClient},
    relay::ChatRelay,
    server,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

pub const TEST_TOKEN: &str = "hf_test_token";
pub const TEST_MODEL: &str = "microsoft/DialoGPT-medium";

/// Create a test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            mode: ExecutionMode::Production,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        inference: InferenceConfig {
            base_url: base_url.to_string(),
            model: TEST_MODEL.to_string(),
            api_token: Some(TEST_TOKEN.to_string()),
        },
    }
}

/// Build the full router backed by a real HTTP client against `config`
pub fn create_test_app(config: &Config) -> Router {
    let client: Arc<dyn InferenceClient> = Arc::new(HttpInferenceClient::new(&config.inference));
    server::router(Arc::new(ChatRelay::new(config, client)))
}

pub fn chat_request(method: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 3000
  mode: development
  logs:
    level: "debug"

inference:
  base_url: "http://localhost:9000/models"
  model: "gpt2"
  api_token: "hf_from_file"
"#;
