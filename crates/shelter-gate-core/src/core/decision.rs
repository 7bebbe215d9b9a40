// crates/shelter-gate-core/src/core/decision.rs
// ============================================================================
// Module: Shelter Gate Access Decisions
// Description: Tagged outcome of evaluating a menu node against a session.
// Purpose: Express every gate failure as data instead of errors.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`AccessDecision`] is either `Permitted` or `Denied` with a
//! [`DenialReason`]. Reasons render as short machine-oriented strings
//! (`not authenticated`, `missing capability: CrearCategoria`); user-facing
//! copy is produced from the menu label instead, see
//! [`DenialNotice`](crate::interfaces::DenialNotice).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::capability::Capability;

// ============================================================================
// SECTION: Decision Types
// ============================================================================

/// Why a gated action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "capability", rename_all = "snake_case")]
pub enum DenialReason {
    /// No active session.
    NotAuthenticated,
    /// Authenticated, but the required capability is not granted.
    MissingCapability(Capability),
}

impl DenialReason {
    /// Returns the stable label used in audit records.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::MissingCapability(_) => "missing_capability",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => f.write_str("not authenticated"),
            Self::MissingCapability(capability) => write!(f, "missing capability: {capability}"),
        }
    }
}

/// Result of the access decision function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The actor may reach the destination.
    Permitted,
    /// The actor may not reach the destination.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns true for [`AccessDecision::Permitted`].
    #[must_use]
    pub const fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }

    /// Returns the denial reason, if any.
    #[must_use]
    pub const fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Permitted => None,
            Self::Denied(reason) => Some(*reason),
        }
    }

    /// Returns the audit label for the outcome.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Permitted => "allow",
            Self::Denied(_) => "deny",
        }
    }
}
