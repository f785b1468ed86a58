use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    Auth(String),
    Network { status: Option<u16>, message: String },
    Validation(String),
    Storage(String),
}

impl ClientError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Network { status, message: message.into() }
    }

    /// Human readable text, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Auth(msg)
            | ClientError::Validation(msg)
            | ClientError::Storage(msg)
            | ClientError::Network { message: msg, .. } => msg,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Rejections from the auth endpoints are auth failures, whatever the status.
    pub fn into_auth(self) -> Self {
        match self {
            ClientError::Network { message, .. } => ClientError::Auth(message),
            other => other,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Auth(msg) => write!(f, "Auth Error: {}", msg),
            ClientError::Network { status: Some(code), message } => {
                write!(f, "Network Error ({}): {}", code, message)
            }
            ClientError::Network { status: None, message } => write!(f, "Network Error: {}", message),
            ClientError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            ClientError::Storage(msg) => write!(f, "Storage Error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::network(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::network(None, format!("Malformed response body: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

/// Error payload the API sends with non-2xx responses. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    pub status: Option<String>,
    pub status_code: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorDetail {
    pub message: Option<String>,
}

impl ErrorBody {
    /// Never fails: bodies that are empty, not JSON, or shaped differently give the default.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.errors
            .first()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}
