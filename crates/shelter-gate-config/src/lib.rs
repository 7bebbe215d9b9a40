// crates/shelter-gate-config/src/lib.rs
// ============================================================================
// Module: Shelter Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for shelter-gate.toml semantics.
// Dependencies: shelter-gate-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `shelter-gate-config` defines the configuration model for the Shelter
//! Gate client: where the backend lives, which session store to use, where
//! audit records go, and which locale to render. Validation is strict and
//! fail-closed; unknown keys are rejected.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
