//! services/gateway/src/web/proxy.rs
//!
//! Contains the Axum handlers that relay `/api/*` calls to the external backend
//! and the master definition for the OpenAPI specification.
//!
//! Each handler forwards the method, the `authorization` header and the JSON
//! body unchanged, then answers with the backend's JSON body and status code.

use crate::error::ProxyError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        login_handler,
        get_chat_handler,
        delete_chat_handler,
        post_message_handler,
        update_code_handler,
        get_preview_handler,
    ),
    tags(
        (name = "Site Builder Gateway", description = "Same-origin proxy routes to the site builder backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Forwarding
//=========================================================================================

/// Relays one request to `{API_BASE_URL}/{segments...}`.
///
/// `body` is `Some` only for methods that carry one; it must be JSON.
pub async fn forward(
    state: &AppState,
    method: Method,
    segments: &[&str],
    headers: &HeaderMap,
    body: Option<Bytes>,
) -> Result<Response, ProxyError> {
    let mut target = state.config.api_base_url.clone();
    target
        .path_segments_mut()
        .map_err(|_| ProxyError::Url(state.config.api_base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);

    let authorization = relayed_authorization(headers);

    debug!("Forwarding {} {}", method, target);
    let mut request = state
        .http
        .request(method, target)
        .header(header::AUTHORIZATION, authorization)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(body) = body {
        let payload: Value = serde_json::from_slice(&body).map_err(ProxyError::InvalidBody)?;
        request = request.json(&payload);
    }

    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    let data: Value = serde_json::from_slice(&bytes).map_err(ProxyError::InvalidResponse)?;

    Ok((status, Json(data)).into_response())
}

/// The caller's `authorization` header byte for byte, or an empty value when absent.
pub fn relayed_authorization(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(header::AUTHORIZATION)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(""))
}

//=========================================================================================
// Proxy Handlers
//=========================================================================================

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body(content = Object, description = "`{ email, password }`", content_type = "application/json"),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(&state, Method::POST, &["api", "login"], &headers, Some(body)).await
}

/// Fetch one conversation with its messages.
#[utoipa::path(
    get,
    path = "/api/chat/{id}",
    params(("id" = String, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chat_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    forward(&state, Method::GET, &["api", "chat", &id], &headers, None).await
}

/// Delete one conversation.
#[utoipa::path(
    delete,
    path = "/api/chat/{id}",
    params(("id" = String, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_chat_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    forward(&state, Method::DELETE, &["api", "chat", &id], &headers, None).await
}

/// Append a message to a conversation.
#[utoipa::path(
    post,
    path = "/api/chat/{id}/message",
    params(("id" = String, Path, description = "Conversation id")),
    request_body(content = Object, description = "`{ sender, text }`", content_type = "application/json"),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn post_message_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(
        &state,
        Method::POST,
        &["api", "chat", &id, "message"],
        &headers,
        Some(body),
    )
    .await
}

/// Replace some or all of a conversation's current code.
#[utoipa::path(
    put,
    path = "/api/chat/{id}/code",
    params(("id" = String, Path, description = "Conversation id")),
    request_body(content = Object, description = "`{ html?, css?, js? }`", content_type = "application/json"),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_code_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    forward(
        &state,
        Method::PUT,
        &["api", "chat", &id, "code"],
        &headers,
        Some(body),
    )
    .await
}

/// Fetch the live preview document of a conversation.
#[utoipa::path(
    get,
    path = "/api/preview/{id}",
    params(("id" = String, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Backend response relayed unchanged"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_preview_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    forward(&state, Method::GET, &["api", "preview", &id], &headers, None).await
}
