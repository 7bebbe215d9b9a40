// crates/shelter-gate-client/src/login.rs
// ============================================================================
// Module: Login Payload Normalization
// Description: Turns backend login responses into authenticated sessions.
// Purpose: Apply the lenient/strict field rules in one place.
// Dependencies: shelter-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The backend answers `POST /login` with a `{tipo, nombre, token, permisos}`
//! object. Normalization rules:
//! - `tipo` is required and must name a known role.
//! - `nombre` may be absent or blank; the fallback name is used instead.
//! - `permisos` may be absent, `null`, or not an array; the granted set is
//!   then empty. Non-string entries are ignored. Unknown names are dropped
//!   and reported.
//! - `token` may be absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use shelter_gate_core::ActorSession;
use shelter_gate_core::AuthenticatedSession;
use shelter_gate_core::CapabilitySet;
use shelter_gate_core::LoginError;
use shelter_gate_core::Role;
use shelter_gate_core::SessionToken;
use shelter_gate_core::SignIn;

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Login request body.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    /// Account email.
    pub(crate) email: &'a str,
    /// Account password.
    pub(crate) password: &'a str,
}

/// Login response body as sent by the backend.
#[derive(Debug, Deserialize)]
struct LoginPayload {
    /// Role discriminator.
    #[serde(default)]
    tipo: Option<String>,
    /// Display name.
    #[serde(default)]
    nombre: Option<String>,
    /// Bearer token.
    #[serde(default)]
    token: Option<String>,
    /// Granted capability names.
    #[serde(default)]
    permisos: Option<Value>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    /// Spanish message key used by the backend.
    #[serde(default)]
    mensaje: Option<String>,
    /// Generic message key.
    #[serde(default)]
    message: Option<String>,
    /// Error key.
    #[serde(default)]
    error: Option<String>,
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Parses a successful login response body.
///
/// # Errors
///
/// Returns [`LoginError::MalformedResponse`] when the body is not a JSON
/// object or its `tipo` is missing or unknown.
pub fn parse_login_response(bytes: &[u8], fallback_name: &str) -> Result<SignIn, LoginError> {
    let payload: LoginPayload = serde_json::from_slice(bytes)
        .map_err(|err| LoginError::MalformedResponse(format!("invalid json: {err}")))?;
    let tipo = payload
        .tipo
        .as_deref()
        .ok_or_else(|| LoginError::MalformedResponse("missing tipo".to_string()))?;
    let role = Role::from_wire(tipo)
        .ok_or_else(|| LoginError::MalformedResponse(format!("unknown tipo: {tipo}")))?;
    let (granted, unrecognized) = granted_from(payload.permisos.as_ref());
    let actor = ActorSession::with_fallback_name(
        payload.nombre.as_deref(),
        fallback_name,
        role,
        granted,
    );
    let token = payload.token.filter(|token| !token.trim().is_empty()).map(SessionToken::new);
    Ok(SignIn {
        session: AuthenticatedSession::new(actor, token),
        unrecognized,
    })
}

/// Extracts a backend error message from a failure body, if any.
#[must_use]
pub fn error_message(bytes: &[u8]) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_slice(bytes).unwrap_or_default();
    payload
        .mensaje
        .or(payload.message)
        .or(payload.error)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
}

/// Builds the granted set from the raw `permisos` value.
fn granted_from(permisos: Option<&Value>) -> (CapabilitySet, Vec<String>) {
    match permisos {
        Some(Value::Array(items)) => {
            CapabilitySet::from_wire_names(items.iter().filter_map(Value::as_str))
        }
        _ => (CapabilitySet::new(), Vec::new()),
    }
}
