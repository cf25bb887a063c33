//! HTTP relay between the chat page and the upstream model.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use chatfmt::relay::{
    AskRequest, AskResponse, ErrorBody, FormatRequest, FormatResponse, RelayConfig, ASK_ROUTE,
    FORMAT_ROUTE, HEALTH_ROUTE,
};
use chatfmt::{EscapePolicy, FormatOptions};
use serde_json::json;

use crate::client::ReplySource;

/// Shared state behind every route.
pub struct RelayState {
    pub config: RelayConfig,
    pub source: Arc<dyn ReplySource>,
}

impl RelayState {
    pub fn new(config: RelayConfig, source: Arc<dyn ReplySource>) -> Self {
        Self { config, source }
    }

    fn format_options(&self, escape: bool) -> FormatOptions {
        let policy = if escape {
            EscapePolicy::Escape
        } else {
            EscapePolicy::Trusted
        };
        FormatOptions::new().with_escape(policy)
    }
}

/// Build the relay router.
pub fn router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route(ASK_ROUTE, post(ask).options(preflight))
        .route(FORMAT_ROUTE, post(format_text).options(preflight))
        .route(HEALTH_ROUTE, get(health))
        .layer(middleware::map_response(add_cors_headers))
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(config: RelayConfig, source: Arc<dyn ReplySource>) -> chatfmt::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Relay listening on http://{}", listener.local_addr()?);
    log::info!("Forwarding prompts to model {}", config.model);

    let state = Arc::new(RelayState::new(config, source));
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
    }
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health(State(state): State<Arc<RelayState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model": state.config.model,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn ask(State(state): State<Arc<RelayState>>, Json(req): Json<AskRequest>) -> Response {
    if req.prompt.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Prompt is required.");
    }

    log::debug!("Relaying prompt ({} chars)", req.prompt.chars().count());
    match state.source.generate(&req.prompt).await {
        Ok(text) => {
            let html = req.format.then(|| {
                chatfmt::format_with_options(&text, &state.format_options(state.config.escape_html))
            });
            Json(AskResponse { text, html }).into_response()
        }
        Err(e) => {
            log::warn!("Upstream request failed: {}", e);
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            error_response(status, e.to_string())
        }
    }
}

async fn format_text(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<FormatRequest>,
) -> Json<FormatResponse> {
    let escape = req.escape.unwrap_or(state.config.escape_html);
    let html = chatfmt::format_with_options(&req.text, &state.format_options(escape));
    Json(FormatResponse { html })
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}
