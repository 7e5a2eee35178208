//! Use-case entry points for the excluded web layer.
//!
//! # Responsibility
//! - Expose one explicit dispatch surface: resolved actor + request in,
//!   outcome variant out.
//! - Replace framework-managed request/session state with plain parameters.
//!
//! # Invariants
//! - Every request requires a resolved, non-anonymous actor; its absence is
//!   an `Unauthenticated` outcome checked before any store access.
//! - Outcomes carry no HTTP semantics; status-code mapping belongs to the
//!   excluded layer.

use crate::model::place::{ActorId, Place, PlaceId};
use crate::repo::place_repo::PlaceRepository;
use crate::service::place_service::{NewPlace, PlaceService, PlaceServiceError};
use chrono::NaiveDate;
use log::info;

/// One request against the wishlist core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistRequest {
    /// Create a new unvisited place owned by the actor.
    Create {
        name: String,
        notes: Option<String>,
        photo_ref: Option<String>,
    },
    /// Transition a place to visited, optionally recording the date.
    MarkVisited {
        place: PlaceId,
        visited_on: Option<NaiveDate>,
    },
    /// Remove a place permanently.
    Delete { place: PlaceId },
    /// The actor's unvisited places, name ascending.
    ListUnvisited,
    /// Visited places (global projection, see service notes).
    ListVisited,
}

impl WishlistRequest {
    /// Stable string id used in logging events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::MarkVisited { .. } => "mark_visited",
            Self::Delete { .. } => "delete",
            Self::ListUnvisited => "list_unvisited",
            Self::ListVisited => "list_visited",
        }
    }
}

/// Caller-visible result of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistOutcome {
    /// Place was created.
    Created(Place),
    /// Place is visited (freshly transitioned or already there).
    Visited(Place),
    /// Place was removed.
    Deleted,
    /// Read projection result.
    Places(Vec<Place>),
    /// Actor is not the owner of the target place.
    Forbidden,
    /// Target place does not exist.
    NotFound,
    /// Input failed domain validation.
    ValidationError(String),
    /// No resolved actor identity was supplied.
    Unauthenticated,
    /// Unexpected persistence or consistency failure.
    Internal(String),
}

impl WishlistOutcome {
    /// Stable string id used in logging events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Visited(_) => "visited",
            Self::Deleted => "deleted",
            Self::Places(_) => "places",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ValidationError(_) => "validation_error",
            Self::Unauthenticated => "unauthenticated",
            Self::Internal(_) => "internal",
        }
    }
}

/// Dispatches one request on behalf of an optionally-resolved actor.
///
/// # Contract
/// - `actor = None` short-circuits to `Unauthenticated` before any guard or
///   store access.
/// - Every service error maps to exactly one outcome variant; nothing is
///   swallowed.
pub fn dispatch<R: PlaceRepository>(
    service: &PlaceService<R>,
    actor: Option<&ActorId>,
    request: WishlistRequest,
) -> WishlistOutcome {
    let request_id = request.as_str();
    let Some(actor) = actor else {
        info!("event=request_dispatched module=endpoint status=unauthenticated request={request_id}");
        return WishlistOutcome::Unauthenticated;
    };

    let outcome = match request {
        WishlistRequest::Create {
            name,
            notes,
            photo_ref,
        } => match service.create_place(
            actor,
            NewPlace {
                name,
                notes,
                photo_ref,
            },
        ) {
            Ok(place) => WishlistOutcome::Created(place),
            Err(err) => outcome_from_error(err),
        },
        WishlistRequest::MarkVisited { place, visited_on } => {
            match service.mark_visited(actor, place, visited_on) {
                Ok(place) => WishlistOutcome::Visited(place),
                Err(err) => outcome_from_error(err),
            }
        }
        WishlistRequest::Delete { place } => match service.delete_place(actor, place) {
            Ok(()) => WishlistOutcome::Deleted,
            Err(err) => outcome_from_error(err),
        },
        WishlistRequest::ListUnvisited => match service.list_unvisited(actor) {
            Ok(places) => WishlistOutcome::Places(places),
            Err(err) => outcome_from_error(err.into()),
        },
        WishlistRequest::ListVisited => match service.list_visited(actor) {
            Ok(places) => WishlistOutcome::Places(places),
            Err(err) => outcome_from_error(err.into()),
        },
    };

    info!(
        "event=request_dispatched module=endpoint status={} actor={actor} request={request_id}",
        outcome.as_str()
    );
    outcome
}

fn outcome_from_error(err: PlaceServiceError) -> WishlistOutcome {
    match err {
        PlaceServiceError::Validation(err) => WishlistOutcome::ValidationError(err.to_string()),
        PlaceServiceError::PlaceNotFound(_) => WishlistOutcome::NotFound,
        PlaceServiceError::Forbidden { .. } => WishlistOutcome::Forbidden,
        PlaceServiceError::Repo(err) => WishlistOutcome::Internal(err.to_string()),
        PlaceServiceError::InconsistentState(details) => {
            WishlistOutcome::Internal(details.to_string())
        }
    }
}
