//! Core domain logic for the travel wishlist.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod endpoint;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::{authorize, AccessDecision, MutationOp};
pub use endpoint::{dispatch, WishlistOutcome, WishlistRequest};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::place::{ActorId, ActorIdError, Place, PlaceId, PlaceValidationError};
pub use repo::place_repo::{PlaceRepository, RepoError, RepoResult, SqlitePlaceRepository};
pub use service::place_service::{NewPlace, PlaceService, PlaceServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
