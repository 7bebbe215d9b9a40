// crates/shelter-gate-core/src/core/mod.rs
// ============================================================================
// Module: Shelter Gate Core Types
// Description: Capabilities, session snapshots, decisions, and the menu tree.
// Purpose: Provide stable, serializable types for the authorization gate.
// Dependencies: serde, sha2, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain data. They carry no I/O and no interior mutability;
//! the runtime module decides and dispatches on top of them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod capability;
pub mod decision;
pub mod menu;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capability::Capability;
pub use capability::CapabilitySet;
pub use decision::AccessDecision;
pub use decision::DenialReason;
pub use menu::MenuError;
pub use menu::MenuNode;
pub use menu::MenuTree;
pub use menu::Target;
pub use session::ActorSession;
pub use session::AuthenticatedSession;
pub use session::CATALOG_ROUTE;
pub use session::Credentials;
pub use session::DASHBOARD_ROUTE;
pub use session::DEFAULT_DISPLAY_NAME;
pub use session::LOGIN_ROUTE;
pub use session::Role;
pub use session::SessionToken;
