//! Ownership authorization for place mutations.
//!
//! # Responsibility
//! - Decide whether an actor may mutate a given place.
//! - Keep the decision a pure predicate, free of storage access.
//!
//! # Invariants
//! - Only the owner is ever `Allowed`; there are no admin overrides here.
//! - Read views do not pass through this gate; they use owner-scoped
//!   queries instead.

use crate::model::place::{ActorId, Place};
use std::fmt::{Display, Formatter};

/// Mutating operation guarded by the ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOp {
    /// Transition a place from unvisited to visited.
    Visit,
    /// Remove a place permanently.
    Delete,
}

impl MutationOp {
    /// Stable string id used in logging events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::Delete => "delete",
        }
    }
}

impl Display for MutationOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied,
}

impl AccessDecision {
    /// Returns whether the decision permits the operation.
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decides whether `actor` may perform `operation` on `place`.
///
/// Allowed iff the actor is the owner. Every denial is surfaced to the
/// caller as a forbidden result; a denied mutation never runs.
pub fn authorize(actor: &ActorId, place: &Place, operation: MutationOp) -> AccessDecision {
    match operation {
        // Both guarded operations share the same rule today. Matching on the
        // operation keeps the decision table explicit for future rules.
        MutationOp::Visit | MutationOp::Delete => {
            if place.is_owned_by(actor) {
                AccessDecision::Allowed
            } else {
                AccessDecision::Denied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{authorize, AccessDecision, MutationOp};
    use crate::model::place::{ActorId, Place};

    fn actor(name: &str) -> ActorId {
        ActorId::parse(name).expect("valid actor id")
    }

    #[test]
    fn owner_is_allowed_for_both_operations() {
        let place = Place::new(actor("alice"), "Tokyo");
        for operation in [MutationOp::Visit, MutationOp::Delete] {
            assert_eq!(
                authorize(&actor("alice"), &place, operation),
                AccessDecision::Allowed
            );
        }
    }

    #[test]
    fn foreign_actor_is_denied_for_both_operations() {
        let place = Place::new(actor("alice"), "Tokyo");
        for operation in [MutationOp::Visit, MutationOp::Delete] {
            assert_eq!(
                authorize(&actor("bob"), &place, operation),
                AccessDecision::Denied
            );
        }
    }

    #[test]
    fn operation_ids_are_stable() {
        assert_eq!(MutationOp::Visit.as_str(), "visit");
        assert_eq!(MutationOp::Delete.as_str(), "delete");
    }
}
