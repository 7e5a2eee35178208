//! Place use-case service and visit state machine.
//!
//! # Responsibility
//! - Provide create/visit/delete/list entry points for core callers.
//! - Enforce the ownership guard before every mutation.
//! - Govern the unvisited -> visited transition.
//!
//! # Invariants
//! - `visited` only ever transitions false -> true; there is no reverse
//!   operation anywhere in this crate.
//! - Mutations check existence, then ownership, then state, in that order.
//! - A denied or failed check leaves the store untouched.

use crate::auth::{authorize, MutationOp};
use crate::model::place::{ActorId, Place, PlaceId, PlaceValidationError};
use crate::repo::place_repo::{PlaceRepository, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for place use-cases.
#[derive(Debug)]
pub enum PlaceServiceError {
    /// Input failed domain validation; nothing was persisted.
    Validation(PlaceValidationError),
    /// Target place does not exist.
    PlaceNotFound(PlaceId),
    /// Actor is not the owner of the target place.
    Forbidden {
        place: PlaceId,
        operation: MutationOp,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for PlaceServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PlaceNotFound(id) => write!(f, "place not found: {id}"),
            Self::Forbidden { place, operation } => {
                write!(f, "actor is not the owner of place {place}; {operation} denied")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent place state: {details}")
            }
        }
    }
}

impl Error for PlaceServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PlaceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::PlaceNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlace {
    /// Destination name. Must be non-empty after trimming.
    pub name: String,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// Optional reference into the excluded photo storage layer.
    pub photo_ref: Option<String>,
}

/// Use-case service facade over place repository implementations.
pub struct PlaceService<R: PlaceRepository> {
    repo: R,
}

impl<R: PlaceRepository> PlaceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one unvisited place owned by the acting user.
    ///
    /// # Contract
    /// - `owner = actor`, `visited = false`.
    /// - Blank names fail validation before any SQL runs.
    pub fn create_place(
        &self,
        actor: &ActorId,
        request: NewPlace,
    ) -> Result<Place, PlaceServiceError> {
        let mut place = Place::new(actor.clone(), request.name);
        place.notes = request.notes;
        place.photo_ref = request.photo_ref;
        place.validate().map_err(PlaceServiceError::Validation)?;

        let id = self.repo.create_place(&place)?;
        info!(
            "event=place_created module=service status=ok place={id} owner={actor}"
        );
        self.repo
            .get_place(id)?
            .ok_or(PlaceServiceError::InconsistentState(
                "created place not found in read-back",
            ))
    }

    /// Transitions a place from unvisited to visited.
    ///
    /// # Contract
    /// - Unknown id -> `PlaceNotFound`, no mutation.
    /// - Non-owner actor -> `Forbidden`, no mutation.
    /// - Already visited -> idempotent success; the stored row is returned
    ///   unchanged and `visited_on` is ignored (the first transition wins).
    pub fn mark_visited(
        &self,
        actor: &ActorId,
        id: PlaceId,
        visited_on: Option<NaiveDate>,
    ) -> Result<Place, PlaceServiceError> {
        let place = self.load_guarded(actor, id, MutationOp::Visit)?;

        if place.visited {
            return Ok(place);
        }

        self.repo.set_visited(id, visited_on)?;
        info!("event=place_visited module=service status=ok place={id} owner={actor}");
        self.repo
            .get_place(id)?
            .ok_or(PlaceServiceError::InconsistentState(
                "visited place not found in read-back",
            ))
    }

    /// Removes a place permanently.
    ///
    /// # Contract
    /// - Unknown id -> `PlaceNotFound` (deletion is not idempotent).
    /// - Non-owner actor -> `Forbidden`, no mutation.
    pub fn delete_place(&self, actor: &ActorId, id: PlaceId) -> Result<(), PlaceServiceError> {
        self.load_guarded(actor, id, MutationOp::Delete)?;
        self.repo.delete_place(id)?;
        info!("event=place_deleted module=service status=ok place={id} owner={actor}");
        Ok(())
    }

    /// Gets one place by stable ID.
    pub fn get_place(&self, id: PlaceId) -> RepoResult<Option<Place>> {
        self.repo.get_place(id)
    }

    /// Lists the actor's unvisited places sorted by name ascending.
    pub fn list_unvisited(&self, actor: &ActorId) -> RepoResult<Vec<Place>> {
        self.repo.list_unvisited(actor)
    }

    /// Lists visited places.
    ///
    /// The actor argument asserts the authenticated-caller precondition,
    /// but the projection itself is global: the upstream application does
    /// not owner-filter its visited view even though the unvisited view is
    /// scoped. Replicated as observed and flagged as a likely upstream bug.
    pub fn list_visited(&self, actor: &ActorId) -> RepoResult<Vec<Place>> {
        info!("event=visited_list module=service status=ok actor={actor}");
        self.repo.list_visited()
    }

    /// Loads the target and enforces existence, then ownership.
    fn load_guarded(
        &self,
        actor: &ActorId,
        id: PlaceId,
        operation: MutationOp,
    ) -> Result<Place, PlaceServiceError> {
        let place = self
            .repo
            .get_place(id)?
            .ok_or(PlaceServiceError::PlaceNotFound(id))?;

        if !authorize(actor, &place, operation).is_allowed() {
            warn!(
                "event=mutation_denied module=service status=forbidden place={id} actor={actor} operation={operation}"
            );
            return Err(PlaceServiceError::Forbidden {
                place: id,
                operation,
            });
        }

        Ok(place)
    }
}
