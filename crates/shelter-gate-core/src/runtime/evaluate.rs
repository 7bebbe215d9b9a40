// crates/shelter-gate-core/src/runtime/evaluate.rs
// ============================================================================
// Module: Shelter Gate Access Evaluation
// Description: Access decision function and derived menu views.
// Purpose: Decide, per destination, whether the current actor may reach it.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! [`evaluate`] is the only authority for "can the current actor reach X".
//! It is pure and total: it never errors and never mutates anything.
//! [`menu_view`] derives enable/disable state for every node from the same
//! function, so what a screen shows can never disagree with what dispatch
//! allows.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::AccessDecision;
use crate::core::ActorSession;
use crate::core::DenialReason;
use crate::core::MenuNode;
use crate::core::MenuTree;
use crate::core::Target;

// ============================================================================
// SECTION: Decision Function
// ============================================================================

/// Evaluates a menu node against the current session snapshot.
///
/// Rules, in order: no session denies; an ungated node permits; the
/// Foundation role permits; a granted capability permits; anything else
/// denies with the missing capability.
#[must_use]
pub fn evaluate(node: &MenuNode, session: Option<&ActorSession>) -> AccessDecision {
    let Some(session) = session else {
        return AccessDecision::Denied(DenialReason::NotAuthenticated);
    };
    let Some(required) = node.required else {
        return AccessDecision::Permitted;
    };
    if session.role.is_foundation() || session.granted.contains(required) {
        AccessDecision::Permitted
    } else {
        AccessDecision::Denied(DenialReason::MissingCapability(required))
    }
}

// ============================================================================
// SECTION: Menu View
// ============================================================================

/// Render-ready state of one menu node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntryView {
    /// Display label.
    pub label: String,
    /// Destination, absent for grouping headers.
    pub target: Option<Target>,
    /// Nesting depth (roots are 0).
    pub depth: usize,
    /// False for grouping headers.
    pub clickable: bool,
    /// Whether the entry should be rendered enabled.
    pub enabled: bool,
    /// Denial reason for disabled destinations.
    pub reason: Option<DenialReason>,
}

/// Computes the enable/disable state of every node, depth-first.
///
/// Destinations are enabled exactly when [`evaluate`] permits them. Headers
/// are enabled when at least one descendant destination is enabled.
#[must_use]
pub fn menu_view(tree: &MenuTree, session: Option<&ActorSession>) -> Vec<MenuEntryView> {
    let mut out = Vec::new();
    for root in tree.roots() {
        view_inner(root, 0, session, &mut out);
    }
    out
}

impl MenuTree {
    /// Computes the render-ready view of this tree for `session`.
    #[must_use]
    pub fn view(&self, session: Option<&ActorSession>) -> Vec<MenuEntryView> {
        menu_view(self, session)
    }
}

/// Appends the view of `node` and its descendants; returns whether any
/// destination in the subtree is enabled.
fn view_inner(
    node: &MenuNode,
    depth: usize,
    session: Option<&ActorSession>,
    out: &mut Vec<MenuEntryView>,
) -> bool {
    let index = out.len();
    let (enabled, reason) = if node.is_header() {
        (false, None)
    } else {
        let decision = evaluate(node, session);
        (decision.is_permitted(), decision.denial())
    };
    out.push(MenuEntryView {
        label: node.label.clone(),
        target: node.target.clone(),
        depth,
        clickable: !node.is_header(),
        enabled,
        reason,
    });
    let mut any_child_enabled = false;
    for child in &node.children {
        any_child_enabled |= view_inner(child, depth + 1, session, out);
    }
    if node.is_header() {
        if let Some(entry) = out.get_mut(index) {
            entry.enabled = any_child_enabled;
        }
        return any_child_enabled;
    }
    enabled || any_child_enabled
}
