//! Authenticated HTTP client for the provider API.

use std::sync::Arc;
use std::time::Duration;

use onesignal_core::AppRegistry;
use onesignal_protocols::{ApiError, AppConfig};
use reqwest::{Client, header};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::endpoint::requires_org_credential;
use crate::request::ApiRequest;

/// Scheme used in the `Authorization` header for both key kinds.
pub const AUTH_SCHEME: &str = "Basic";

/// Client settings.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.onesignal.com/api/v1`.
    pub base_url: String,
    pub org_api_key: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            org_api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_org_api_key(mut self, key: Option<String>) -> Self {
        self.org_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("org_api_key", &self.org_api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Which key signs a request.
enum Credential {
    Organization(String),
    App(AppConfig),
}

impl Credential {
    fn key(&self) -> &str {
        match self {
            Self::Organization(key) => key,
            Self::App(app) => &app.api_key,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Organization(_) => "organization",
            Self::App(_) => "app",
        }
    }
}

/// Routes each [`ApiRequest`] to the right credential and normalizes the
/// outcome.
pub struct OneSignalClient {
    http: Client,
    config: ClientConfig,
    apps: Arc<AppRegistry>,
}

impl OneSignalClient {
    pub fn new(config: ClientConfig, apps: Arc<AppRegistry>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("onesignal-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, config, apps })
    }

    pub fn apps(&self) -> &Arc<AppRegistry> {
        &self.apps
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_org_api_key(&self) -> bool {
        self.config.org_api_key.is_some()
    }

    /// Perform one call.
    ///
    /// Returns the parsed JSON body, `{}` for an empty body, or a normalized
    /// error. Never panics on provider or network failures.
    pub async fn call(&self, mut request: ApiRequest) -> Result<Value, ApiError> {
        let use_org = request
            .use_org_credential
            .unwrap_or_else(|| requires_org_credential(&request.endpoint));
        let credential = self.credential(use_org, request.app_key.as_deref())?;

        if let Credential::App(app) = &credential {
            inject_app_id(&mut request, &app.app_id);
        }

        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            request.endpoint.trim_start_matches('/')
        );
        debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            credential = credential.kind(),
            "Calling provider API"
        );

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .header(header::AUTHORIZATION, format!("{} {}", AUTH_SCHEME, credential.key()))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query_pairs());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(endpoint = %request.endpoint, error = %e, "Provider request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = ApiError::from_response(status.as_u16(), status.canonical_reason(), &body);
            warn!(
                endpoint = %request.endpoint,
                status = status.as_u16(),
                error = %error,
                "Provider returned an error"
            );
            return Err(error);
        }

        if body.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    fn credential(&self, use_org: bool, app_key: Option<&str>) -> Result<Credential, ApiError> {
        if use_org {
            return self
                .config
                .org_api_key
                .clone()
                .map(Credential::Organization)
                .ok_or(ApiError::MissingCredential);
        }
        self.apps
            .resolve(app_key)
            .map(Credential::App)
            .ok_or(ApiError::MissingAppContext)
    }
}

/// Add `app_id` where the provider expects it, unless the caller already
/// did or the endpoint names the app in its path. A missing body becomes
/// `{"app_id": ..}`; a non-object body is sent untouched.
fn inject_app_id(request: &mut ApiRequest, app_id: &str) {
    if request.endpoint.trim_start_matches('/').starts_with("apps/") {
        return;
    }
    if request.method.uses_query() {
        request
            .query
            .entry("app_id")
            .or_insert_with(|| Value::String(app_id.to_string()));
    } else if let Value::Object(body) = request.body.get_or_insert_with(|| json!({})) {
        body.entry("app_id")
            .or_insert_with(|| Value::String(app_id.to_string()));
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
