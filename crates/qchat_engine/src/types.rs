use std::fmt;

use serde_json::{json, Value};

/// One call against the `executeCommand` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetIndexingStatus {
        region_q: String,
        application_id_q: String,
    },
    GetTotalKendraIndexedDocs,
}

impl Command {
    pub fn command_type(&self) -> &'static str {
        match self {
            Command::GetIndexingStatus { .. } => "getIndexingStatus",
            Command::GetTotalKendraIndexedDocs => "getTotalKendraIndexedDocs",
        }
    }

    /// `{ "type": ..., "content": {...} }`
    pub fn to_body(&self) -> Value {
        let content = match self {
            Command::GetIndexingStatus {
                region_q,
                application_id_q,
            } => json!({
                "regionQ": region_q,
                "applicationIdQ": application_id_q,
            }),
            Command::GetTotalKendraIndexedDocs => json!({}),
        };
        json!({
            "type": self.command_type(),
            "content": content,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CommandError {
    pub kind: FailureKind,
    pub message: String,
}

impl CommandError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    MissingField(&'static str),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::MissingField(field) => write!(f, "missing field {field}"),
        }
    }
}
