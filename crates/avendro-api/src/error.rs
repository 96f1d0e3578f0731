//! API error types

use std::collections::BTreeMap;
use thiserror::Error;

/// Keys in an error body that carry a message rather than a field error,
/// in the order they are consulted.
const MESSAGE_KEYS: [&str; 4] = ["message", "error", "detail", "non_field_errors"];

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request did not produce a response
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    #[error("No refresh token available")]
    NoRefreshToken,

    /// 2xx with a body that does not match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Session error: {0}")]
    Session(#[from] avendro_session::SessionError),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// How an auth endpoint refused a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// 401
    InvalidCredentials,
    /// 403
    AccountDisabled,
}

impl ApiError {
    /// Build the error for a non-2xx response from its raw body
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let fallback = || format!("HTTP error! status: {status}");

        let parsed = serde_json::from_slice::<serde_json::Value>(body).ok();
        let Some(serde_json::Value::Object(map)) = parsed else {
            return ApiError::Status {
                status,
                message: fallback(),
                field_errors: BTreeMap::new(),
            };
        };

        let message = MESSAGE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(first_text))
            .unwrap_or_else(fallback);

        let field_errors = map
            .iter()
            .filter(|(key, _)| !MESSAGE_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| {
                let messages = all_text(value);
                (!messages.is_empty()).then(|| (key.clone(), messages))
            })
            .collect();

        ApiError::Status {
            status,
            message,
            field_errors,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Classification for login and registration responses
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self.status() {
            Some(401) => Some(AuthFailure::InvalidCredentials),
            Some(403) => Some(AuthFailure::AccountDisabled),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Field-level messages from a validation failure, if any
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Status { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }
}

fn first_text(value: &serde_json::Value) -> Option<String> {
    all_text(value).into_iter().next()
}

fn all_text(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => vec![s.clone()],
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
