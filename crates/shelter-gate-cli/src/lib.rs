// crates/shelter-gate-cli/src/lib.rs
// ============================================================================
// Module: Shelter Gate CLI Library
// Description: Shared helpers for the Shelter Gate command-line interface.
// Purpose: Provide reusable components (i18n, rendering, shell) for the binary and tests.
// Dependencies: shelter-gate-core, shelter-gate-config, thiserror.
// ============================================================================

//! ## Overview
//! This library houses the localized message catalog, the console rendering
//! of menu views and denials, and the line-oriented session shell. The binary
//! entry point (`src/main.rs`) wires them to configuration and the backend
//! client so every user-facing line goes through the same catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Console rendering of menu views, decisions, and synthetic sessions.
pub mod render;
/// Line-oriented interactive session shell.
pub mod shell;
