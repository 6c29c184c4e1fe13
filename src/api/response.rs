//! Uniform success/error envelope wrapping every response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::todo::Todo;

/// The concrete payload shapes the service produces.
///
/// Serialized untagged, so the wire format stays `data: <entity|list|{count}>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A single entity (created-entity echo).
    Todo(Todo),
    /// The full list of entities.
    Todos(Vec<Todo>),
    /// The row count.
    Count {
        /// Number of stored entities.
        count: i64,
    },
}

/// Wire format of every response body: `{ data?, status, error? }`.
///
/// Exactly one of `data`/`error` is meaningful; setting an error clears any
/// previously attached data. Owned per-request, never shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Success payload, omitted on errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    /// HTTP status, echoed in the body.
    pub status: u16,
    /// Plain error message, omitted on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope carrying a payload.
    pub fn ok(data: Payload, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            status: status.as_u16(),
            error: None,
        }
    }

    /// Success envelope with no payload, just the status.
    pub fn status(status: StatusCode) -> Self {
        Self {
            data: None,
            status: status.as_u16(),
            error: None,
        }
    }

    /// Error envelope carrying a plain message. Never carries data.
    pub fn error(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: None,
            status: status.as_u16(),
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn ok_envelope_serializes_data_and_status() {
        let envelope = Envelope::ok(Payload::Count { count: 3 }, StatusCode::OK);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"data": {"count": 3}, "status": 200}));
    }

    #[test]
    fn error_envelope_omits_data() {
        let envelope = Envelope::error("boom", StatusCode::INTERNAL_SERVER_ERROR);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"status": 500, "error": "boom"}));
    }

    #[test]
    fn status_envelope_has_neither_data_nor_error() {
        let envelope = Envelope::status(StatusCode::OK);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"status": 200}));
    }

    #[test]
    fn error_envelope_never_carries_data() {
        let envelope = Envelope::error("deadline has elapsed", StatusCode::REQUEST_TIMEOUT);

        assert_eq!(envelope.data, None);
        assert_eq!(envelope.status, 408);
        assert_eq!(envelope.error.as_deref(), Some("deadline has elapsed"));
    }

    #[test]
    fn entity_payload_serializes_flat() {
        let envelope = Envelope::ok(
            Payload::Todo(Todo {
                id: 1,
                name: "buy milk".to_string(),
                done: false,
            }),
            StatusCode::CREATED,
        );
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"data": {"id": 1, "name": "buy milk", "done": false}, "status": 201})
        );
    }
}
