use super::types::{ChatResponse, ErrorResponse};
use crate::relay::{ChatRelay, Outcome, RelayError};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
}

pub async fn chat(State(state): State<AppState>, request: Request) -> Response {
    let method = request.method().clone();
    info!("Received {} chat request", method);

    // Only POST bodies are ever inspected.
    let body = if method == Method::POST {
        read_body(request).await
    } else {
        Ok(Bytes::new())
    };

    let result = match body {
        Ok(body) => state.relay.dispatch(&method, &body).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(Outcome::Preflight) => StatusCode::OK.into_response(),
        Ok(Outcome::Reply(response)) => Json(ChatResponse { response }).into_response(),
        Err(e) => {
            let status = e.status_code();
            warn!("Chat request failed with {}: {}", status, e);
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                    details: e.details(state.relay.mode()),
                }),
            )
                .into_response()
        }
    }
}

/// Buffers the body under axum's default size limit.
async fn read_body(request: Request) -> Result<Bytes, RelayError> {
    Bytes::from_request(request, &()).await.map_err(|rejection| {
        warn!("Failed to read request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge
        } else {
            RelayError::UnreadableBody
        }
    })
}
