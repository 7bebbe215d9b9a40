// crates/shelter-gate-cli/src/render.rs
// ============================================================================
// Module: Console Rendering
// Description: Text rendering for menu views, denial notices, and sessions.
// Purpose: Keep console output for the shell and offline commands consistent.
// Dependencies: shelter-gate-core, thiserror
// ============================================================================

//! ## Overview
//! Turns [`MenuEntryView`] rows and denial reasons into localized console
//! lines, and builds synthetic sessions for offline previews.
//!
//! Line format, indented two spaces per depth level:
//! - `# Label` for grouping headers (`#` when some child is enabled, `~` when none is)
//! - `+ Label (route)` for enabled destinations
//! - `- Label (route) [reason]` for disabled destinations; the actor menu
//!   uses a generic reason, diagnostics name the missing capability

// ============================================================================
// SECTION: Imports
// ============================================================================

use shelter_gate_core::ActorSession;
use shelter_gate_core::Capability;
use shelter_gate_core::CapabilitySet;
use shelter_gate_core::DenialNotice;
use shelter_gate_core::DenialReason;
use shelter_gate_core::MenuEntryView;
use shelter_gate_core::Role;
use thiserror::Error;

use crate::t;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors building a synthetic preview session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// A `--grant` value is not a known capability name.
    #[error("unknown capability: {0}")]
    UnknownGrant(String),
}

// ============================================================================
// SECTION: Menu Rendering
// ============================================================================

/// Renders menu view rows as diagnostic lines naming missing capabilities.
#[must_use]
pub fn render_menu(entries: &[MenuEntryView]) -> Vec<String> {
    entries.iter().map(|entry| render_entry(entry, reason_text)).collect()
}

/// Renders menu view rows for the signed-in actor.
///
/// Disabled destinations carry a generic marker; capability names stay out
/// of actor-facing output.
#[must_use]
pub fn render_actor_menu(entries: &[MenuEntryView]) -> Vec<String> {
    entries.iter().map(|entry| render_entry(entry, actor_reason_text)).collect()
}

/// Renders a single menu view row, describing denials with `describe`.
fn render_entry(entry: &MenuEntryView, describe: fn(DenialReason) -> String) -> String {
    let indent = "  ".repeat(entry.depth);
    match &entry.target {
        None => {
            let marker = if entry.enabled { '#' } else { '~' };
            format!("{indent}{marker} {}", entry.label)
        }
        Some(target) if entry.enabled => format!("{indent}+ {} ({target})", entry.label),
        Some(target) => match entry.reason {
            Some(reason) => format!("{indent}- {} ({target}) [{}]", entry.label, describe(reason)),
            None => format!("{indent}- {} ({target})", entry.label),
        },
    }
}

/// Returns the localized diagnostic form of a denial reason.
#[must_use]
pub fn reason_text(reason: DenialReason) -> String {
    match reason {
        DenialReason::NotAuthenticated => t!("reason.not_authenticated"),
        DenialReason::MissingCapability(capability) => {
            t!("reason.missing_capability", capability = capability.as_str())
        }
    }
}

/// Returns the localized actor-facing form of a denial reason.
#[must_use]
pub fn actor_reason_text(reason: DenialReason) -> String {
    match reason {
        DenialReason::NotAuthenticated => t!("reason.not_authenticated"),
        DenialReason::MissingCapability(_) => t!("reason.not_permitted"),
    }
}

/// Returns the localized actor-facing text for a denial notice.
#[must_use]
pub fn denial_text(notice: &DenialNotice) -> String {
    match notice.reason {
        DenialReason::NotAuthenticated => t!("denial.not_authenticated", label = notice.label),
        DenialReason::MissingCapability(_) => {
            t!("denial.missing_capability", label = notice.label)
        }
    }
}

/// Formats a capability set as a comma-separated list of wire names.
#[must_use]
pub fn capability_list(granted: &CapabilitySet) -> String {
    if granted.is_empty() {
        return t!("shell.whoami.no_capabilities");
    }
    granted.iter().map(Capability::as_str).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Synthetic Sessions
// ============================================================================

/// Display name used for offline previews.
const PREVIEW_DISPLAY_NAME: &str = "preview";

/// Builds an actor snapshot for offline previews from exact capability names.
///
/// # Errors
///
/// Returns [`PreviewError::UnknownGrant`] for the first name that is not an
/// exact capability wire name.
pub fn synthetic_actor<S: AsRef<str>>(
    role: Role,
    grants: &[S],
) -> Result<ActorSession, PreviewError> {
    let mut granted = CapabilitySet::new();
    for name in grants {
        let name = name.as_ref();
        let capability =
            Capability::parse(name).ok_or_else(|| PreviewError::UnknownGrant(name.to_string()))?;
        granted.insert(capability);
    }
    Ok(ActorSession::new(PREVIEW_DISPLAY_NAME, role, granted))
}
