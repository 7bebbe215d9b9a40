// crates/shelter-gate-core/src/runtime/lifecycle.rs
// ============================================================================
// Module: Shelter Gate Session Lifecycle
// Description: Sign-in and sign-out flows around the session store.
// Purpose: Keep the store either fully initialized or empty, never partial.
// Dependencies: crate::core, crate::interfaces, crate::runtime, thiserror
// ============================================================================

//! ## Overview
//! [`sign_in`] installs a session only after the backend returned a complete
//! one. [`sign_out`] removes the local session before anything else happens,
//! then notifies the backend best-effort, then navigates to the login
//! destination. A backend outage never keeps a session alive locally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ActorSession;
use crate::core::Credentials;
use crate::core::LOGIN_ROUTE;
use crate::core::Target;
use crate::interfaces::Authenticator;
use crate::interfaces::LoginError;
use crate::interfaces::NavigationRequest;
use crate::interfaces::Navigator;
use crate::interfaces::SessionBackend;
use crate::interfaces::SessionStore;
use crate::interfaces::StoreError;
use crate::runtime::audit::GateAuditEvent;
use crate::runtime::audit::GateAuditSink;

// ============================================================================
// SECTION: Sign-In
// ============================================================================

/// Sign-in failures.
#[derive(Debug, Error)]
pub enum SignInError {
    /// Backend login failed.
    #[error(transparent)]
    Login(#[from] LoginError),
    /// The session could not be stored.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInOutcome {
    /// Installed actor snapshot.
    pub actor: ActorSession,
    /// Destination to show first.
    pub landing: Target,
    /// Capability names from the backend that were ignored.
    pub unrecognized: Vec<String>,
}

/// Authenticates and installs the resulting session.
///
/// # Errors
///
/// Returns [`SignInError`] when login fails or the store rejects the
/// session. On error the store is left untouched.
pub fn sign_in(
    store: &dyn SessionStore,
    authenticator: &dyn Authenticator,
    credentials: &Credentials,
    audit: &dyn GateAuditSink,
) -> Result<SignInOutcome, SignInError> {
    let sign_in = match authenticator.login(credentials) {
        Ok(sign_in) => sign_in,
        Err(err) => {
            audit.record(&GateAuditEvent::sign_in_failed(&err.to_string()));
            return Err(err.into());
        }
    };
    let actor = sign_in.session.actor.clone();
    let event = GateAuditEvent::signed_in(&sign_in.session, &sign_in.unrecognized);
    if let Err(err) = store.initialize(sign_in.session) {
        audit.record(&GateAuditEvent::sign_in_failed(&err.to_string()));
        return Err(err.into());
    }
    audit.record(&event);
    Ok(SignInOutcome {
        landing: actor.role.landing(),
        actor,
        unrecognized: sign_in.unrecognized,
    })
}

// ============================================================================
// SECTION: Sign-Out
// ============================================================================

/// Result of a session teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    /// Whether a session was active when teardown started.
    pub had_session: bool,
    /// Backend invalidation failure, if any. Informational only.
    pub backend_error: Option<String>,
    /// Destination navigated to after teardown.
    pub landing: Target,
}

/// Ends the current session locally and on the backend.
///
/// # Errors
///
/// Returns [`StoreError`] only when the local session cannot be removed; in
/// that case neither the backend nor the navigator is touched.
pub fn sign_out(
    store: &dyn SessionStore,
    backend: &dyn SessionBackend,
    navigator: &dyn Navigator,
    audit: &dyn GateAuditSink,
) -> Result<TeardownReport, StoreError> {
    let taken = match store.take() {
        Ok(taken) => taken,
        Err(_) => {
            store.clear()?;
            None
        }
    };
    let backend_error = backend
        .invalidate(taken.as_ref().and_then(|session| session.token.as_ref()))
        .err()
        .map(|err| err.to_string());
    audit.record(&GateAuditEvent::signed_out(taken.as_ref(), backend_error.as_deref()));
    let landing = Target::new(LOGIN_ROUTE);
    navigator.navigate(&NavigationRequest {
        target: landing.clone(),
        display_name: None,
    });
    Ok(TeardownReport {
        had_session: taken.is_some(),
        backend_error,
        landing,
    })
}
