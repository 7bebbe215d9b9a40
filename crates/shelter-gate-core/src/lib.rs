// crates/shelter-gate-core/src/lib.rs
// ============================================================================
// Module: Shelter Gate Core Library
// Description: Public API surface for the client authorization gate.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Shelter Gate decides, per navigation action, whether the signed-in actor
//! of the foundation admin console may reach a screen. It combines a cached
//! permission snapshot with the Foundation override and drives consistent
//! enable/disable state and denial feedback across every entry point.
//!
//! The gate is a UX convenience. The backend enforces authorization
//! independently and remains authoritative.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::Authenticator;
pub use interfaces::BackendError;
pub use interfaces::DenialNotice;
pub use interfaces::DenialNotifier;
pub use interfaces::LoginError;
pub use interfaces::NavigationRequest;
pub use interfaces::Navigator;
pub use interfaces::SessionBackend;
pub use interfaces::SessionStore;
pub use interfaces::SignIn;
pub use interfaces::StoreError;
pub use runtime::DispatchOutcome;
pub use runtime::FileAuditSink;
pub use runtime::FileSessionStore;
pub use runtime::GateAuditEvent;
pub use runtime::GateAuditSink;
pub use runtime::InMemorySessionStore;
pub use runtime::MAX_SESSION_FILE_BYTES;
pub use runtime::MenuEntryView;
pub use runtime::NavigationDispatcher;
pub use runtime::NoopAuditSink;
pub use runtime::SignInError;
pub use runtime::SignInOutcome;
pub use runtime::StderrAuditSink;
pub use runtime::TeardownReport;
pub use runtime::WriterAuditSink;
pub use runtime::evaluate;
pub use runtime::menu_view;
pub use runtime::sign_in;
pub use runtime::sign_out;
