pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    inference::{HttpInferenceClient, InferenceClient},
    relay::ChatRelay,
};
use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

pub const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
pub const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// Builds the router. Every path is served by the chat handler and every
/// response carries the cross-origin headers.
pub fn router(relay: Arc<ChatRelay>) -> Router {
    let app_state = handlers::AppState { relay };

    Router::new()
        .fallback(handlers::chat)
        .with_state(app_state)
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            "true",
        ))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            ALLOW_METHODS,
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            ALLOW_HEADERS,
        ))
        .layer(TraceLayer::new_for_http())
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub async fn run(config: Config) -> Result<()> {
    let client: Arc<dyn InferenceClient> = Arc::new(HttpInferenceClient::new(&config.inference));

    if config.inference.token().is_none() {
        warn!("No API token configured; chat requests will fail until one is provided");
    }

    let relay = Arc::new(ChatRelay::new(&config, client));
    let app = router(relay);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting chat relay on {} (model endpoint: {}, mode: {:?})",
        addr,
        config.inference.endpoint(),
        config.server.mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
