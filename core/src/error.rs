//! Error types for the marketplace BFF client.
//!
//! # Design
//! Two layers. `ApiError` is what a single stage (serialize, send, parse)
//! produces. `BffError` is the only error callers see: the client's error
//! wrapper converts every `ApiError` into it, tagged with the operation that
//! failed, so no transport-library error type escapes the crate.

use std::fmt;

use serde_json::Value;

/// Generic message used when a response body does not have the expected shape.
pub const DECODE_FAILURE_MESSAGE: &str = "unexpected response body";

/// Failure of a single request stage.
#[derive(Debug)]
pub enum ApiError {
    /// No response was received (connect error, timeout, broken body stream).
    Transport(String),

    /// The server answered with a non-2xx status.
    Status { status: u16, body: String },

    /// A 2xx body could not be deserialized into the expected type.
    Deserialization {
        status: u16,
        body: String,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Deserialization {
                status, message, ..
            } => {
                write!(f, "deserialization failed (HTTP {status}): {message}")
            }
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error produced by a `Transport` when no response was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err.0)
    }
}

/// The client operation a `BffError` originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PostAdvertisingQuestion,
    PostAdvertisingQuestionAnswer,
    PostDeal,
    PostFavorite,
    RemoveFavorite,
    GetHome,
    GetSearch,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::PostAdvertisingQuestion => "post_advertising_question",
            Operation::PostAdvertisingQuestionAnswer => "post_advertising_question_answer",
            Operation::PostDeal => "post_deal",
            Operation::PostFavorite => "post_favorite",
            Operation::RemoveFavorite => "remove_favorite",
            Operation::GetHome => "get_home",
            Operation::GetSearch => "get_search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a `BffError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never reached the server or no response came back.
    Transport,
    /// The server answered with a non-success status.
    Rejected,
    /// The server answered 2xx but the body was not what the operation
    /// expects. Callers can handle it like `Rejected`: it carries the status,
    /// a generic message and the body.
    Decode,
}

/// Normalized error returned by every `MarketplaceBffClient` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BffError {
    pub operation: Operation,
    pub kind: ErrorKind,
    /// `None` when no response was received.
    pub status: Option<u16>,
    /// Message extracted from the backend payload, or a generic one for
    /// decode failures. Always `None` for transport failures.
    pub message: Option<String>,
    /// Backend response body, verbatim.
    pub body: Option<String>,
    /// Client-side description of what went wrong (transport or decoder
    /// error text). Never comes from the backend.
    pub detail: Option<String>,
}

impl BffError {
    pub fn from_api(operation: Operation, err: ApiError) -> Self {
        match err {
            ApiError::Transport(msg) | ApiError::Serialization(msg) => Self {
                operation,
                kind: ErrorKind::Transport,
                status: None,
                message: None,
                body: None,
                detail: Some(msg),
            },
            ApiError::Status { status, body } => Self {
                operation,
                kind: ErrorKind::Rejected,
                status: Some(status),
                message: backend_message(&body),
                body: non_empty(body),
                detail: None,
            },
            ApiError::Deserialization {
                status,
                body,
                message,
            } => Self {
                operation,
                kind: ErrorKind::Decode,
                status: Some(status),
                message: Some(DECODE_FAILURE_MESSAGE.to_string()),
                body: non_empty(body),
                detail: Some(message),
            },
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind == ErrorKind::Transport
    }
}

impl fmt::Display for BffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.operation)?;
        match self.status {
            Some(status) => write!(f, " with HTTP {status}")?,
            None => write!(f, " without a response")?,
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for BffError {}

/// Pull a human-readable message out of a backend error body.
fn backend_message(body: &str) -> Option<String> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return Some(msg.clone());
            }
        }
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn non_empty(body: String) -> Option<String> {
    (!body.is_empty()).then_some(body)
}
