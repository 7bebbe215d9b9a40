// crates/shelter-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Shelter Gate Runtime
// Description: Decision function, stores, dispatch, lifecycle, and audit.
// Purpose: Implement the gate behavior on top of the core types.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime wires the pure decision function to the outside world. Only
//! [`evaluate`] decides; everything else reads its verdict.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod dispatch;
pub mod evaluate;
pub mod lifecycle;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::GateAuditEvent;
pub use audit::GateAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::WriterAuditSink;
pub use dispatch::DispatchOutcome;
pub use dispatch::NavigationDispatcher;
pub use evaluate::MenuEntryView;
pub use evaluate::evaluate;
pub use evaluate::menu_view;
pub use lifecycle::SignInError;
pub use lifecycle::SignInOutcome;
pub use lifecycle::TeardownReport;
pub use lifecycle::sign_in;
pub use lifecycle::sign_out;
pub use store::FileSessionStore;
pub use store::InMemorySessionStore;
pub use store::MAX_SESSION_FILE_BYTES;
