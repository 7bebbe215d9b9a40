// crates/shelter-gate-core/src/core/session.rs
// ============================================================================
// Module: Shelter Gate Session Types
// Description: Signed-in actor snapshot, role classification, and credentials.
// Purpose: Model what the gate knows about the current actor.
// Dependencies: serde, sha2
// ============================================================================

//! ## Overview
//! An [`ActorSession`] is created from a successful login and lives until
//! logout. It never changes mid-session: the permission snapshot is stale
//! tolerant by contract. The bearer credential travels next to it inside an
//! [`AuthenticatedSession`] so both are stored and cleared together.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::core::capability::CapabilitySet;
use crate::core::menu::Target;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Generic display label used when the backend omits the actor name.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";

/// Landing route for Foundation and Staff actors.
pub const DASHBOARD_ROUTE: &str = "/dashboard";
/// Landing route for Person actors.
pub const CATALOG_ROUTE: &str = "/mascotas";
/// Landing route for unauthenticated actors.
pub const LOGIN_ROUTE: &str = "/login";

// ============================================================================
// SECTION: Role
// ============================================================================

/// Role classification of a signed-in actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Foundation account; implicit super-admin for every capability.
    Foundation,
    /// Foundation staff member; gated by granted capabilities.
    Staff,
    /// Individual adopter; gated by granted capabilities.
    Person,
}

impl Role {
    /// Maps the backend `tipo` value onto a role.
    #[must_use]
    pub fn from_wire(tipo: &str) -> Option<Self> {
        match tipo {
            "fundacion" => Some(Self::Foundation),
            "funcionario" => Some(Self::Staff),
            "persona" => Some(Self::Person),
            _ => None,
        }
    }

    /// Returns the stable label used in audit records and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Staff => "staff",
            Self::Person => "person",
        }
    }

    /// Returns true for the capability override role.
    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self, Self::Foundation)
    }

    /// Returns the destination an actor of this role lands on after login.
    #[must_use]
    pub fn landing(self) -> Target {
        match self {
            Self::Foundation | Self::Staff => Target::new(DASHBOARD_ROUTE),
            Self::Person => Target::new(CATALOG_ROUTE),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Actor Session
// ============================================================================

/// Snapshot of the signed-in actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSession {
    /// Name shown in the UI.
    pub display_name: String,
    /// Role classification.
    pub role: Role,
    /// Capabilities granted at login.
    pub granted: CapabilitySet,
}

impl ActorSession {
    /// Creates a session snapshot.
    #[must_use]
    pub fn new(display_name: impl Into<String>, role: Role, granted: CapabilitySet) -> Self {
        Self {
            display_name: display_name.into(),
            role,
            granted,
        }
    }

    /// Creates a session snapshot, replacing a missing or blank name with `fallback`.
    #[must_use]
    pub fn with_fallback_name(
        display_name: Option<&str>,
        fallback: &str,
        role: Role,
        granted: CapabilitySet,
    ) -> Self {
        let name = display_name.map(str::trim).filter(|name| !name.is_empty()).unwrap_or(fallback);
        Self::new(name, role, granted)
    }
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Opaque bearer credential issued by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns a lowercase hex SHA-256 fingerprint safe for logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex_encode(&Sha256::digest(self.0.as_bytes()))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Login form input.
#[derive(Clone)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Authenticated Session
// ============================================================================

/// Actor snapshot plus the credential that authenticated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// Actor snapshot consulted by the gate.
    pub actor: ActorSession,
    /// Bearer credential, when the backend issued one.
    pub token: Option<SessionToken>,
}

impl AuthenticatedSession {
    /// Pairs an actor snapshot with its credential.
    #[must_use]
    pub const fn new(actor: ActorSession, token: Option<SessionToken>) -> Self {
        Self {
            actor,
            token,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
