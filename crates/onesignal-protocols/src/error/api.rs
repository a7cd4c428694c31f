//! Provider API call errors.
//!
//! Every way a call to the provider can fail is one variant here, so callers
//! branch on a tag instead of guessing at response shapes.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The endpoint needs the organization key and none is configured.
    #[error(
        "Organization API Key not configured. Set the ONESIGNAL_ORG_API_KEY environment variable."
    )]
    MissingCredential,

    /// No app override resolved and no app is current.
    #[error("No app configuration available. Use switch_app to select an app or specify app_key.")]
    MissingAppContext,

    /// Non-2xx response carrying the provider's `errors` list.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// Non-2xx response without a usable error payload.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body was not JSON.
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    /// Caller-supplied data was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Normalize a non-2xx response.
    ///
    /// Prefers `errors[0]` from a JSON body, then the status reason phrase.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        if let Some(message) = first_provider_error(body) {
            return Self::Provider { status, message };
        }
        let reason = reason
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        Self::Status { status, reason }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the provider rejected the credential (401/403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

fn first_provider_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let first = value.get("errors")?.as_array()?.first()?;
    Some(match first {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
