//! Error taxonomy shared by every remote call.
//!
//! HTTP failures are classified once, from status code and body, so that
//! components only decide how to *present* an error, never how to detect it.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid credentials (login/register only)
    #[error("{0}")]
    Auth(String),

    /// 401 on an authenticated call; the session must be dropped
    #[error("Session expired, please log in again")]
    PermissionDenied,

    /// Server rejected the input; carries the first reported message
    #[error("{0}")]
    Validation(String),

    /// Missing product or inventory record; a normal transient outcome
    #[error("Not found")]
    NotFound,

    /// Transport failure, unexpected status or unreadable body
    #[error("{}", network_display(.status, .message))]
    Network {
        status: Option<u16>,
        message: Option<String>,
    },
}

fn network_display(status: &Option<u16>, message: &Option<String>) -> String {
    match (status, message) {
        (_, Some(message)) => message.clone(),
        (Some(status), None) => format!("HTTP {}", status),
        (None, None) => "Network error".to_string(),
    }
}

/// Error body as produced by the remote service.
///
/// `message` is either a string or a list of strings; `errors` is a list.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn first_error(&self) -> Option<String> {
        let from_errors = self
            .errors
            .as_ref()
            .and_then(|list| list.first())
            .and_then(value_as_text);
        from_errors.or_else(|| match &self.message {
            Some(serde_json::Value::Array(items)) => items.first().and_then(value_as_text),
            _ => None,
        })
    }

    fn message(&self) -> Option<String> {
        match &self.message {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(serde_json::Value::Array(items)) => items.first().and_then(value_as_text),
            _ => None,
        }
    }
}

fn value_as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Null => None,
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        other => Some(other.to_string()),
    }
}

impl ApiError {
    /// Classify a non-success HTTP response of an authenticated call
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = ErrorBody::parse(body);
        match status {
            401 => ApiError::PermissionDenied,
            404 => ApiError::NotFound,
            400 | 422 => match parsed.first_error() {
                Some(first) => ApiError::Validation(first),
                None => ApiError::Network {
                    status: Some(status),
                    message: parsed.message(),
                },
            },
            _ => ApiError::Network {
                status: Some(status),
                message: parsed.message(),
            },
        }
    }

    /// Transport-level failure (request never produced a response)
    pub fn transport() -> Self {
        ApiError::Network {
            status: None,
            message: None,
        }
    }

    /// Login and registration report bad credentials as `Auth`, not as a
    /// dropped session.
    pub fn into_auth(self) -> Self {
        match self {
            ApiError::PermissionDenied => ApiError::Auth("Invalid email or password".to_string()),
            ApiError::Validation(message) => ApiError::Auth(message),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// First validation message, if the server reported one
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation(message) => Some(message),
            _ => None,
        }
    }

    /// Message the server attached to the failure, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation(message) | ApiError::Auth(message) => Some(message),
            ApiError::Network {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
