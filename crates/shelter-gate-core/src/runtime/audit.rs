// crates/shelter-gate-core/src/runtime/audit.rs
// ============================================================================
// Module: Shelter Gate Audit Logging
// Description: Structured audit events for gate decisions and session changes.
// Purpose: Emit JSON-lines records without tying the gate to a logging stack.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every dispatched decision and every sign-in or sign-out produces a
//! [`GateAuditEvent`]. Events never contain passwords or raw tokens; bearer
//! credentials appear only as SHA-256 fingerprints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::AccessDecision;
use crate::core::ActorSession;
use crate::core::AuthenticatedSession;
use crate::core::MenuNode;

// ============================================================================
// SECTION: Event
// ============================================================================

/// Gate audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct GateAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Outcome label (`allow`, `deny`, `ok`, `error`).
    pub outcome: &'static str,
    /// Actor role when a session was involved.
    pub role: Option<&'static str>,
    /// Destination route for decision events.
    pub target: Option<String>,
    /// Destination label for decision events.
    pub label: Option<String>,
    /// Denial or failure reason.
    pub reason: Option<String>,
    /// Number of recognized granted capabilities.
    pub granted: Option<usize>,
    /// Capability names the backend sent that are unknown to the gate.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<String>,
    /// Bearer token fingerprint (sha256).
    pub token_fingerprint: Option<String>,
}

impl GateAuditEvent {
    /// Builds a base event with all optional fields empty.
    fn base(event: &'static str, outcome: &'static str) -> Self {
        Self {
            event,
            timestamp_ms: now_millis(),
            outcome,
            role: None,
            target: None,
            label: None,
            reason: None,
            granted: None,
            unrecognized: Vec::new(),
            token_fingerprint: None,
        }
    }

    /// Builds a decision event for a dispatched node.
    #[must_use]
    pub fn decision(
        node: &MenuNode,
        session: Option<&ActorSession>,
        decision: &AccessDecision,
    ) -> Self {
        let mut event = Self::base("gate_decision", decision.label());
        event.role = session.map(|session| session.role.as_str());
        event.target = node.target.as_ref().map(ToString::to_string);
        event.label = Some(node.label.clone());
        event.reason = decision.denial().map(|reason| reason.to_string());
        event
    }

    /// Builds a successful sign-in event.
    #[must_use]
    pub fn signed_in(session: &AuthenticatedSession, unrecognized: &[String]) -> Self {
        let mut event = Self::base("session_sign_in", "ok");
        event.role = Some(session.actor.role.as_str());
        event.granted = Some(session.actor.granted.len());
        event.unrecognized = unrecognized.to_vec();
        event.token_fingerprint = session.token.as_ref().map(|token| token.fingerprint());
        event
    }

    /// Builds a failed sign-in event.
    #[must_use]
    pub fn sign_in_failed(reason: &str) -> Self {
        let mut event = Self::base("session_sign_in_failed", "error");
        event.reason = Some(reason.to_string());
        event
    }

    /// Builds a sign-out event; `backend_error` is set when invalidation failed.
    #[must_use]
    pub fn signed_out(
        session: Option<&AuthenticatedSession>,
        backend_error: Option<&str>,
    ) -> Self {
        let outcome = if backend_error.is_some() { "error" } else { "ok" };
        let mut event = Self::base("session_sign_out", outcome);
        event.role = session.map(|session| session.actor.role.as_str());
        event.token_fingerprint =
            session.and_then(|session| session.token.as_ref()).map(|token| token.fingerprint());
        event.reason = backend_error.map(str::to_string);
        event
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for gate events.
pub trait GateAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &GateAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl GateAuditSink for StderrAuditSink {
    fn record(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl GateAuditSink for FileAuditSink {
    fn record(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that writes JSON lines to an arbitrary writer.
pub struct WriterAuditSink<W: Write + Send> {
    /// Output writer for audit records.
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAuditSink<W> {
    /// Wraps a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer lock was poisoned.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| io::Error::other("audit writer mutex poisoned"))
    }
}

impl<W: Write + Send> GateAuditSink for WriterAuditSink<W> {
    fn record(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut writer) = self.writer.lock()
        {
            let _ = writeln!(writer, "{payload}");
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl GateAuditSink for NoopAuditSink {
    fn record(&self, _event: &GateAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis())
}
