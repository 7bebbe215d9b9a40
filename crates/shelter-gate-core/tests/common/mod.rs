// crates/shelter-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared sessions and recording doubles for gate tests.
// Purpose: Provide reusable test infrastructure for deterministic testing.
// Dependencies: shelter-gate-core
// ============================================================================

//! ## Overview
//! Recording navigators, notifiers, backends, and audit sinks let tests
//! observe exactly which side effects a gate operation produced.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::sync::Mutex;

use shelter_gate_core::ActorSession;
use shelter_gate_core::AuthenticatedSession;
use shelter_gate_core::Authenticator;
use shelter_gate_core::BackendError;
use shelter_gate_core::Capability;
use shelter_gate_core::CapabilitySet;
use shelter_gate_core::Credentials;
use shelter_gate_core::DenialNotice;
use shelter_gate_core::DenialNotifier;
use shelter_gate_core::GateAuditEvent;
use shelter_gate_core::GateAuditSink;
use shelter_gate_core::LoginError;
use shelter_gate_core::NavigationRequest;
use shelter_gate_core::Navigator;
use shelter_gate_core::Role;
use shelter_gate_core::SessionBackend;
use shelter_gate_core::SessionToken;
use shelter_gate_core::SignIn;

// ============================================================================
// SECTION: Session Fixtures
// ============================================================================

/// Builds an actor snapshot with the given role and grants.
pub fn actor(role: Role, granted: &[Capability]) -> ActorSession {
    ActorSession::new("Ana", role, granted.iter().copied().collect::<CapabilitySet>())
}

/// Builds an authenticated session with a fixed token.
pub fn authenticated(role: Role, granted: &[Capability]) -> AuthenticatedSession {
    AuthenticatedSession::new(actor(role, granted), Some(SessionToken::new("tok-123")))
}

// ============================================================================
// SECTION: Recording Doubles
// ============================================================================

/// Navigator that records every request.
#[derive(Default)]
pub struct RecordingNavigator {
    /// Requests in call order.
    pub requests: RefCell<Vec<NavigationRequest>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: &NavigationRequest) {
        self.requests.borrow_mut().push(request.clone());
    }
}

/// Notifier that records every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    /// Notices in call order.
    pub notices: RefCell<Vec<DenialNotice>>,
}

impl DenialNotifier for RecordingNotifier {
    fn notify(&self, notice: &DenialNotice) {
        self.notices.borrow_mut().push(notice.clone());
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct RecordingAudit {
    /// Recorded events.
    pub events: Mutex<Vec<GateAuditEvent>>,
}

impl RecordingAudit {
    /// Returns the recorded event names.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|event| event.event).collect()
    }

    /// Returns a clone of all recorded events.
    pub fn all(&self) -> Vec<GateAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl GateAuditSink for RecordingAudit {
    fn record(&self, event: &GateAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Backend that records invalidation calls and optionally fails.
#[derive(Default)]
pub struct RecordingBackend {
    /// Raw tokens passed to `invalidate` (None when absent).
    pub calls: RefCell<Vec<Option<String>>>,
    /// When true every call fails.
    pub fail: bool,
}

impl RecordingBackend {
    /// Builds a backend that always fails.
    pub fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl SessionBackend for RecordingBackend {
    fn invalidate(&self, token: Option<&SessionToken>) -> Result<(), BackendError> {
        self.calls.borrow_mut().push(token.map(|token| token.expose().to_string()));
        if self.fail {
            return Err(BackendError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

/// Authenticator returning a canned result.
pub struct StaticAuthenticator {
    /// Session returned on success; `None` makes login fail.
    pub session: Option<AuthenticatedSession>,
    /// Unrecognized names reported on success.
    pub unrecognized: Vec<String>,
}

impl Authenticator for StaticAuthenticator {
    fn login(&self, _credentials: &Credentials) -> Result<SignIn, LoginError> {
        match &self.session {
            Some(session) => Ok(SignIn {
                session: session.clone(),
                unrecognized: self.unrecognized.clone(),
            }),
            None => Err(LoginError::Rejected {
                status: 401,
                message: Some("credenciales invalidas".to_string()),
            }),
        }
    }
}
