// crates/shelter-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Shelter Gate Interfaces
// Description: Contract surfaces for session storage, navigation, and backend calls.
// Purpose: Keep the gate independent of any UI toolkit or HTTP stack.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The gate talks to the rest of the application only through these traits.
//! Screens receive a [`SessionStore`] handle instead of reading ambient
//! globals, which lets tests substitute any store. Implementations must fail
//! closed: a store that cannot answer behaves like an empty store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ActorSession;
use crate::core::AuthenticatedSession;
use crate::core::Credentials;
use crate::core::DenialReason;
use crate::core::SessionToken;
use crate::core::Target;

// ============================================================================
// SECTION: Permission Snapshot Store
// ============================================================================

/// Session store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage failed.
    #[error("session store io error: {0}")]
    Io(String),
    /// Stored data could not be decoded.
    #[error("session store corrupt: {0}")]
    Corrupt(String),
    /// Lock poisoned or similar internal failure.
    #[error("session store error: {0}")]
    Store(String),
}

/// Holder of the current authenticated session.
///
/// Single writer, many readers: `initialize`, `clear`, and `take` replace the
/// whole snapshot at once, so a concurrent `current` observes either the old
/// session or the new state, never a mix of credential and permissions.
pub trait SessionStore: Send + Sync {
    /// Stores a new session, overwriting any prior one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the session cannot be stored.
    fn initialize(&self, session: AuthenticatedSession) -> Result<(), StoreError>;

    /// Returns the active actor snapshot, or `None` if unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn current(&self) -> Result<Option<ActorSession>, StoreError>;

    /// Returns the active bearer credential, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    fn credential(&self) -> Result<Option<SessionToken>, StoreError>;

    /// Removes the session. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the session cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;

    /// Removes the session and returns what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the session cannot be removed.
    fn take(&self) -> Result<Option<AuthenticatedSession>, StoreError>;
}

// ============================================================================
// SECTION: Navigation
// ============================================================================

/// A permitted navigation transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// Destination route.
    pub target: Target,
    /// Display name handed to the destination, if a session is active.
    pub display_name: Option<String>,
}

/// Denial feedback surfaced instead of navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenialNotice {
    /// Label of the refused destination.
    pub label: String,
    /// Why it was refused.
    pub reason: DenialReason,
}

impl DenialNotice {
    /// Creates a denial notice.
    #[must_use]
    pub fn new(label: impl Into<String>, reason: DenialReason) -> Self {
        Self {
            label: label.into(),
            reason,
        }
    }
}

/// Performs navigation transitions.
pub trait Navigator {
    /// Moves the UI to the requested destination.
    fn navigate(&self, request: &NavigationRequest);
}

/// Shows denial feedback (modal, banner, or console line).
pub trait DenialNotifier {
    /// Surfaces a denial to the actor.
    fn notify(&self, notice: &DenialNotice);
}

// ============================================================================
// SECTION: Backend Collaborator
// ============================================================================

/// Login failures.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The backend could not be reached or the exchange failed mid-way.
    #[error("login transport error: {0}")]
    Transport(String),
    /// The backend refused the credentials.
    #[error("login rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message reported by the backend, if any.
        message: Option<String>,
    },
    /// The response lacked data required to build a session.
    #[error("malformed login response: {0}")]
    MalformedResponse(String),
}

/// Successful backend login.
#[derive(Debug, Clone)]
pub struct SignIn {
    /// Session to install in the store.
    pub session: AuthenticatedSession,
    /// Capability names the backend sent that match no known capability.
    pub unrecognized: Vec<String>,
}

/// Exchanges credentials for a session.
pub trait Authenticator {
    /// Performs the login request.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] when login fails; no session is produced.
    fn login(&self, credentials: &Credentials) -> Result<SignIn, LoginError>;
}

/// Backend session invalidation failures.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend call failed.
    #[error("backend error: {0}")]
    Request(String),
}

/// Invalidates sessions on the backend.
pub trait SessionBackend {
    /// Notifies the backend that the session ended.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backend cannot be notified.
    fn invalidate(&self, token: Option<&SessionToken>) -> Result<(), BackendError>;
}
