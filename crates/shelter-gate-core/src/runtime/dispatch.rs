// crates/shelter-gate-core/src/runtime/dispatch.rs
// ============================================================================
// Module: Shelter Gate Navigation Dispatch
// Description: Turns clicks on menu nodes into navigation or denial feedback.
// Purpose: Give every entry point (sidebar item or button) the same gate.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! [`NavigationDispatcher`] reads the store at click time, asks
//! [`evaluate`] for a verdict, and then either navigates or notifies. It
//! never writes to the store and never caches a verdict, so a logout that
//! lands between two clicks is always observed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AccessDecision;
use crate::core::ActorSession;
use crate::core::MenuNode;
use crate::core::MenuTree;
use crate::core::Target;
use crate::interfaces::DenialNotice;
use crate::interfaces::DenialNotifier;
use crate::interfaces::NavigationRequest;
use crate::interfaces::Navigator;
use crate::interfaces::SessionStore;
use crate::runtime::audit::GateAuditEvent;
use crate::runtime::audit::GateAuditSink;
use crate::runtime::evaluate::evaluate;

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Navigation was performed.
    Navigated(NavigationRequest),
    /// Navigation was refused and the actor was notified.
    Denied(DenialNotice),
    /// The node is not a destination (grouping header or unknown route).
    NotDispatchable,
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Routes clicks through the access decision function.
pub struct NavigationDispatcher<'a> {
    /// Session snapshot source, read on every dispatch.
    store: &'a dyn SessionStore,
    /// Navigation side of the UI.
    navigator: &'a dyn Navigator,
    /// Denial feedback side of the UI.
    notifier: &'a dyn DenialNotifier,
    /// Audit sink for decisions.
    audit: &'a dyn GateAuditSink,
}

impl<'a> NavigationDispatcher<'a> {
    /// Creates a dispatcher over the given collaborators.
    #[must_use]
    pub const fn new(
        store: &'a dyn SessionStore,
        navigator: &'a dyn Navigator,
        notifier: &'a dyn DenialNotifier,
        audit: &'a dyn GateAuditSink,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
            audit,
        }
    }

    /// Dispatches a click on `node`.
    ///
    /// Grouping headers are not destinations: they return
    /// [`DispatchOutcome::NotDispatchable`] without evaluation.
    pub fn dispatch(&self, node: &MenuNode) -> DispatchOutcome {
        let Some(target) = &node.target else {
            return DispatchOutcome::NotDispatchable;
        };
        // Store failures read as "no session".
        let session = self.store.current().ok().flatten();
        let decision = evaluate(node, session.as_ref());
        self.audit.record(&GateAuditEvent::decision(node, session.as_ref(), &decision));
        match decision {
            AccessDecision::Permitted => {
                let request = navigation_request(target, session.as_ref());
                self.navigator.navigate(&request);
                DispatchOutcome::Navigated(request)
            }
            AccessDecision::Denied(reason) => {
                let notice = DenialNotice::new(node.label.clone(), reason);
                self.notifier.notify(&notice);
                DispatchOutcome::Denied(notice)
            }
        }
    }

    /// Resolves `target` through `tree` and dispatches the matching node.
    pub fn dispatch_target(&self, tree: &MenuTree, target: &Target) -> DispatchOutcome {
        tree.find(target).map_or(DispatchOutcome::NotDispatchable, |node| self.dispatch(node))
    }
}

/// Builds the navigation request handed to the destination.
fn navigation_request(target: &Target, session: Option<&ActorSession>) -> NavigationRequest {
    NavigationRequest {
        target: target.clone(),
        display_name: session.map(|session| session.display_name.clone()),
    }
}
