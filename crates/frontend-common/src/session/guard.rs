//! The guard decision table.
//!
//! A guard cannot await the user fetch without blocking navigation, so
//! it trusts a persisted credential as a provisional signal and relies
//! on the in-tree re-check to force a redirect if that trust turns out
//! misplaced.

use super::bridge::SessionSnapshot;

/// Outcome of a route-guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Redirect to login
    Deny,
}

/// Decide entry to a protected route from the durable credential and
/// the last published snapshot.
///
/// Without a credential the route is denied outright. With one, the
/// snapshot refines the decision: authenticated allows, a pending user
/// fetch allows optimistically, and a settled fetch that produced no
/// user means the credential is confirmed invalid. No snapshot at all
/// (first paint) allows optimistically and defers to the in-tree
/// re-check.
pub fn evaluate_guard(
    has_persisted_credential: bool,
    snapshot: Option<&SessionSnapshot>,
) -> GuardDecision {
    if !has_persisted_credential {
        return GuardDecision::Deny;
    }

    match snapshot {
        None => GuardDecision::Allow,
        Some(snapshot) if snapshot.is_authenticated => GuardDecision::Allow,
        Some(snapshot) if snapshot.is_loading => GuardDecision::Allow,
        Some(_) => GuardDecision::Deny,
    }
}
