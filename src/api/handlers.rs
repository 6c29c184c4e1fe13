//! Per-route orchestration: decode input, run the storage call under the
//! idle timeout, serialize the envelope.
//!
//! Inputs are parsed by hand (raw body bytes, id from the query string) so
//! every failure path still produces an envelope body. The deadline is
//! pushed into the storage call itself: the future is dropped when it
//! expires, and the request is reported as 408.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::time::timeout;
use tracing::{error, info, warn};

use super::response::{Envelope, Payload};
use crate::metrics::Metrics;
use crate::storage::TodoStore;
use crate::todo::Todo;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage handle, shared across all concurrent requests.
    pub store: Arc<dyn TodoStore>,
    /// Deadline applied to every storage call.
    pub idle_timeout: Duration,
    /// Metrics sink, observed once per request by the finalizer.
    pub metrics: Metrics,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: Arc<dyn TodoStore>, idle_timeout: Duration, metrics: Metrics) -> Self {
        Self {
            store,
            idle_timeout,
            metrics,
        }
    }
}

/// Pull the integer id out of a raw query string. Parsed by hand so every
/// failure, including a malformed query, yields an envelope; the first `id`
/// pair wins when the parameter is repeated.
fn parse_id(query: Option<&str>) -> Result<i64, String> {
    let raw = query
        .unwrap_or("")
        .split('&')
        .find_map(|pair| match pair.split_once('=') {
            Some(("id", value)) => Some(value),
            _ => (pair == "id").then_some(""),
        })
        .ok_or_else(|| "missing id query parameter".to_string())?;

    raw.parse::<i64>()
        .map_err(|e| format!("invalid id {raw:?}: {e}"))
}

fn decode_body(body: &Bytes) -> Result<Todo, String> {
    serde_json::from_slice(body).map_err(|e| e.to_string())
}

/// POST /create: persist a new todo, echoing it back with its assigned id.
pub async fn create(State(state): State<AppState>, body: Bytes) -> Response {
    let todo = match decode_body(&body) {
        Ok(todo) => todo,
        Err(e) => {
            warn!("create: {e}");
            return Envelope::error(e, StatusCode::BAD_REQUEST).into_response();
        }
    };

    match timeout(state.idle_timeout, state.store.insert(todo)).await {
        Ok(Ok(created)) => {
            info!("create: created id={}", created.id);
            Envelope::ok(Payload::Todo(created), StatusCode::CREATED).into_response()
        }
        Ok(Err(e)) => {
            error!("create: {e}");
            Envelope::error(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(elapsed) => {
            error!("create: {elapsed}");
            Envelope::error(elapsed.to_string(), StatusCode::REQUEST_TIMEOUT).into_response()
        }
    }
}

/// GET /list: fetch every todo.
pub async fn list(State(state): State<AppState>) -> Response {
    match timeout(state.idle_timeout, state.store.fetch_all()).await {
        Ok(Ok(todos)) => {
            info!("list: fetched {} todos", todos.len());
            Envelope::ok(Payload::Todos(todos), StatusCode::OK).into_response()
        }
        Ok(Err(e)) => {
            error!("list: {e}");
            Envelope::error(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(elapsed) => {
            error!("list: {elapsed}");
            Envelope::error(elapsed.to_string(), StatusCode::REQUEST_TIMEOUT).into_response()
        }
    }
}

/// PUT /update/?id=N: replace name/done for the matching row.
pub async fn update(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let id = match parse_id(query.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            warn!("update: {e}");
            return Envelope::error(e, StatusCode::BAD_REQUEST).into_response();
        }
    };

    let todo = match decode_body(&body) {
        Ok(todo) => todo,
        Err(e) => {
            warn!("update: {e}");
            return Envelope::error(e, StatusCode::BAD_REQUEST).into_response();
        }
    };

    match timeout(state.idle_timeout, state.store.update(todo, id)).await {
        Ok(Ok(true)) => {
            info!("update: updated id={id}");
            Envelope::status(StatusCode::OK).into_response()
        }
        Ok(Ok(false)) => {
            warn!("update: no todo with id={id}");
            Envelope::error(format!("no todo with id {id}"), StatusCode::NOT_FOUND)
                .into_response()
        }
        Ok(Err(e)) => {
            error!("update: {e}");
            Envelope::error(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(elapsed) => {
            error!("update: {elapsed}");
            Envelope::error(elapsed.to_string(), StatusCode::REQUEST_TIMEOUT).into_response()
        }
    }
}

/// DELETE /delete/?id=N: remove the matching row.
pub async fn remove(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let id = match parse_id(query.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            warn!("delete: {e}");
            return Envelope::error(e, StatusCode::BAD_REQUEST).into_response();
        }
    };

    match timeout(state.idle_timeout, state.store.delete(id)).await {
        Ok(Ok(true)) => {
            info!("delete: removed id={id}");
            Envelope::status(StatusCode::OK).into_response()
        }
        Ok(Ok(false)) => {
            warn!("delete: no todo with id={id}");
            Envelope::error(format!("no todo with id {id}"), StatusCode::NOT_FOUND)
                .into_response()
        }
        Ok(Err(e)) => {
            error!("delete: {e}");
            Envelope::error(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(elapsed) => {
            error!("delete: {elapsed}");
            Envelope::error(elapsed.to_string(), StatusCode::REQUEST_TIMEOUT).into_response()
        }
    }
}

/// GET /count: number of stored todos.
pub async fn count(State(state): State<AppState>) -> Response {
    match timeout(state.idle_timeout, state.store.count_entries()).await {
        Ok(Ok(count)) => {
            info!("count: {count} todos");
            Envelope::ok(Payload::Count { count }, StatusCode::OK).into_response()
        }
        Ok(Err(e)) => {
            error!("count: {e}");
            Envelope::error(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(elapsed) => {
            error!("count: {elapsed}");
            Envelope::error(elapsed.to_string(), StatusCode::REQUEST_TIMEOUT).into_response()
        }
    }
}
