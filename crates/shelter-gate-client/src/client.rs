// crates/shelter-gate-client/src/client.rs
// ============================================================================
// Module: Backend HTTP Client
// Description: Blocking HTTP client for the foundation backend.
// Purpose: Implement login and best-effort logout over HTTP.
// Dependencies: shelter-gate-core, shelter-gate-config, reqwest, url
// ============================================================================

//! ## Overview
//! [`BackendClient`] implements [`Authenticator`] and [`SessionBackend`]
//! against the configured backend.
//! Invariants:
//! - Redirects are rejected.
//! - Response bodies are capped at the configured size limit.
//! - Passwords and tokens never appear in returned error messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::AUTHORIZATION;
use reqwest::redirect::Policy;
use shelter_gate_config::BackendConfig;
use shelter_gate_core::Authenticator;
use shelter_gate_core::BackendError;
use shelter_gate_core::Credentials;
use shelter_gate_core::DEFAULT_DISPLAY_NAME;
use shelter_gate_core::LoginError;
use shelter_gate_core::SessionBackend;
use shelter_gate_core::SessionToken;
use shelter_gate_core::SignIn;
use thiserror::Error;
use url::Url;

use crate::login::LoginRequest;
use crate::login::error_message;
use crate::login::parse_login_response;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Client construction errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend configuration is unusable.
    #[error("invalid backend config: {0}")]
    Config(String),
    /// The HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Build(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP adapter for the backend login and logout endpoints.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Underlying HTTP client.
    client: Client,
    /// Fully resolved login endpoint.
    login_url: Url,
    /// Fully resolved logout endpoint.
    logout_url: Url,
    /// Response size limit in bytes.
    max_response_bytes: usize,
    /// Display name used when the backend omits one.
    fallback_display_name: String,
}

impl BackendClient {
    /// Builds a client from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the endpoints cannot be resolved or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        config.validate().map_err(|err| ClientError::Config(err.to_string()))?;
        let base = config.parsed_base_url().map_err(|err| ClientError::Config(err.to_string()))?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
            login_url: endpoint(&base, &config.login_path)?,
            logout_url: endpoint(&base, &config.logout_path)?,
            max_response_bytes: config.max_response_bytes,
            fallback_display_name: DEFAULT_DISPLAY_NAME.to_string(),
        })
    }

    /// Overrides the fallback display name.
    #[must_use]
    pub fn with_fallback_display_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_display_name = name.into();
        self
    }

    /// Returns the resolved login endpoint.
    #[must_use]
    pub const fn login_url(&self) -> &Url {
        &self.login_url
    }

    /// Returns the resolved logout endpoint.
    #[must_use]
    pub const fn logout_url(&self) -> &Url {
        &self.logout_url
    }

    /// Reads a response body, enforcing the size limit.
    fn read_body(&self, response: Response) -> Result<Vec<u8>, String> {
        let max_bytes = u64::try_from(self.max_response_bytes).unwrap_or(u64::MAX);
        if let Some(length) = response.content_length()
            && length > max_bytes
        {
            return Err(format!("response exceeds {} bytes", self.max_response_bytes));
        }
        let mut limited = response.take(max_bytes.saturating_add(1));
        let mut bytes = Vec::new();
        limited.read_to_end(&mut bytes).map_err(|err| err.to_string())?;
        if bytes.len() > self.max_response_bytes {
            return Err(format!("response exceeds {} bytes", self.max_response_bytes));
        }
        Ok(bytes)
    }
}

impl Authenticator for BackendClient {
    fn login(&self, credentials: &Credentials) -> Result<SignIn, LoginError> {
        let body = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .client
            .post(self.login_url.as_str())
            .json(&body)
            .send()
            .map_err(|err| LoginError::Transport(describe_transport(&err)))?;
        let status = response.status();
        if !status.is_success() {
            let message = self.read_body(response).ok().and_then(|bytes| error_message(&bytes));
            return Err(LoginError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = self.read_body(response).map_err(LoginError::MalformedResponse)?;
        parse_login_response(&bytes, &self.fallback_display_name)
    }
}

impl SessionBackend for BackendClient {
    fn invalidate(&self, token: Option<&SessionToken>) -> Result<(), BackendError> {
        let Some(token) = token else {
            return Ok(());
        };
        let response = self
            .client
            .post(self.logout_url.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .send()
            .map_err(|err| BackendError::Request(describe_transport(&err)))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Request(format!("logout returned status {}", status.as_u16())))
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends an endpoint path to the base URL, keeping any base path prefix.
fn endpoint(base: &Url, path: &str) -> Result<Url, ClientError> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|err| ClientError::Config(format!("invalid endpoint: {err}")))
}

/// Describes a transport failure without echoing request bodies.
fn describe_transport(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    }
}
