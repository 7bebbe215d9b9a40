// crates/shelter-gate-config/src/config.rs
// ============================================================================
// Module: Shelter Gate Configuration
// Description: Configuration loading and validation for the Shelter Gate client.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: shelter-gate-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults except the backend base URL. Missing or invalid
//! configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use shelter_gate_core::DEFAULT_DISPLAY_NAME;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "shelter-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SHELTER_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum backend request timeout in milliseconds.
pub const MIN_BACKEND_TIMEOUT_MS: u64 = 100;
/// Maximum backend request timeout in milliseconds.
pub const MAX_BACKEND_TIMEOUT_MS: u64 = 60_000;
/// Default backend request timeout in milliseconds.
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 10_000;
/// Default maximum backend response size in bytes.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Maximum allowed backend response size in bytes.
pub const MAX_MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Maximum length of the fallback display name.
const MAX_DISPLAY_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Shelter Gate client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShelterGateConfig {
    /// Backend API configuration.
    pub backend: BackendConfig,
    /// Session store configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Audit log configuration.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ShelterGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        self.session.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the foundation backend (http or https).
    pub base_url: String,
    /// Login endpoint path.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Logout endpoint path.
    #[serde(default = "default_logout_path")]
    pub logout_path: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_backend_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum accepted response size in bytes.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl BackendConfig {
    /// Builds a backend config with defaults for everything but the URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: default_login_path(),
            logout_path: default_logout_path(),
            timeout_ms: default_backend_timeout_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }

    /// Validates backend settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any backend setting is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        validate_endpoint_path("backend.login_path", &self.login_path)?;
        validate_endpoint_path("backend.logout_path", &self.logout_path)?;
        validate_timeout_range(
            "backend.timeout_ms",
            self.timeout_ms,
            MIN_BACKEND_TIMEOUT_MS,
            MAX_BACKEND_TIMEOUT_MS,
        )?;
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_MAX_RESPONSE_BYTES {
            return Err(ConfigError::Invalid(format!(
                "backend.max_response_bytes must be between 1 and {MAX_MAX_RESPONSE_BYTES}"
            )));
        }
        Ok(())
    }

    /// Parses the base URL, enforcing an http or https scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is malformed or uses another scheme.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("backend.base_url is invalid: {err}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Invalid(format!(
                    "backend.base_url scheme must be http or https, got {other}"
                )));
            }
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("backend.base_url must include a host".to_string()));
        }
        Ok(url)
    }
}

/// Session store backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    /// Process-scoped store; sessions end with the process.
    #[default]
    Memory,
    /// Single JSON document on disk.
    File,
}

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Store backend.
    #[serde(default)]
    pub store: SessionStoreKind,
    /// Session document path (file store only).
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Display name used when the backend omits one.
    #[serde(default = "default_fallback_display_name")]
    pub fallback_display_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::Memory,
            path: None,
            fallback_display_name: default_fallback_display_name(),
        }
    }
}

impl SessionConfig {
    /// Validates session settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the store selection is inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.store, &self.path) {
            (SessionStoreKind::File, None) => {
                return Err(ConfigError::Invalid(
                    "session.path is required when session.store = \"file\"".to_string(),
                ));
            }
            (SessionStoreKind::Memory, Some(_)) => {
                return Err(ConfigError::Invalid(
                    "session.path is only valid when session.store = \"file\"".to_string(),
                ));
            }
            (SessionStoreKind::File, Some(path)) => {
                validate_path_string("session.path", &path.to_string_lossy())?;
            }
            (SessionStoreKind::Memory, None) => {}
        }
        let name = self.fallback_display_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid(
                "session.fallback_display_name must be non-empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "session.fallback_display_name exceeds {MAX_DISPLAY_NAME_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

/// Audit log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Whether audit events are emitted.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// JSON-lines output file; stderr when absent.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the audit path is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Output locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayLocale {
    /// Spanish.
    #[default]
    Es,
    /// English.
    En,
}

/// Display configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Locale for user-facing messages.
    #[serde(default)]
    pub locale: DisplayLocale,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates an endpoint path relative to the base URL.
fn validate_endpoint_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || value.starts_with("//") {
        return Err(ConfigError::Invalid(format!("{field} must start with a single '/'")));
    }
    if value.contains("://") || value.contains('?') || value.contains('#') {
        return Err(ConfigError::Invalid(format!("{field} must be a plain path")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!("{field} must not contain whitespace")));
    }
    Ok(())
}

/// Validates a millisecond value against an inclusive range.
fn validate_timeout_range(
    field: &str,
    value_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> Result<(), ConfigError> {
    if value_ms < min_ms || value_ms > max_ms {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {min_ms} and {max_ms} milliseconds",
        )));
    }
    Ok(())
}

/// Default login endpoint path.
fn default_login_path() -> String {
    "/login".to_string()
}

/// Default logout endpoint path.
fn default_logout_path() -> String {
    "/logout".to_string()
}

/// Default backend timeout.
const fn default_backend_timeout_ms() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_MS
}

/// Default response size limit.
const fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

/// Default fallback display name.
fn default_fallback_display_name() -> String {
    DEFAULT_DISPLAY_NAME.to_string()
}

/// Default for audit enablement.
const fn default_audit_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Tests
// ============================================================================
