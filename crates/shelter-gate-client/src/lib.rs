// crates/shelter-gate-client/src/lib.rs
// ============================================================================
// Module: Shelter Gate Client Library
// Description: Backend collaborator adapter for the Shelter Gate.
// Purpose: Expose the HTTP client and login payload normalization.
// Dependencies: shelter-gate-core, shelter-gate-config, reqwest
// ============================================================================

//! ## Overview
//! The gate core only knows the [`shelter_gate_core::Authenticator`] and
//! [`shelter_gate_core::SessionBackend`] traits. This crate implements both
//! over blocking HTTP and normalizes the backend login payload into an
//! [`shelter_gate_core::AuthenticatedSession`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod login;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::BackendClient;
pub use client::ClientError;
pub use login::error_message;
pub use login::parse_login_response;
