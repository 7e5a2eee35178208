//! Place domain model and actor identity.
//!
//! # Responsibility
//! - Define the canonical record for one tracked destination.
//! - Provide lifecycle helpers for the unvisited -> visited transition.
//!
//! # Invariants
//! - `id` is stable and never reused for another place.
//! - `owner` never changes after creation.
//! - `visited_on` is meaningful only while `visited` is true.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every place record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PlaceId = Uuid;

/// Identity of the user performing a request.
///
/// Always a trimmed, non-empty string. The excluded auth layer resolves
/// session state into one of these; core never sees a blank identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Parses one actor identity from raw session/user input.
    pub fn parse(value: &str) -> Result<Self, ActorIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ActorIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor identity parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorIdError {
    Empty,
}

impl Display for ActorIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "actor identity must not be empty"),
        }
    }
}

impl Error for ActorIdError {}

/// Canonical domain record for one destination a user tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Stable global ID used for linking and auditing.
    pub id: PlaceId,
    /// Actor that created the record. Fixed for the record lifetime.
    pub owner: ActorId,
    /// Destination name. Non-empty after trimming.
    pub name: String,
    /// Visit status. Starts `false`; the only transition is false -> true.
    pub visited: bool,
    /// Free-form notes about the destination.
    pub notes: Option<String>,
    /// Calendar date of the visit. Only set while `visited` is true.
    pub visited_on: Option<NaiveDate>,
    /// Opaque reference into the excluded photo storage layer.
    pub photo_ref: Option<String>,
}

impl Place {
    /// Creates a new unvisited place with a generated stable ID.
    pub fn new(owner: ActorId, name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), owner, name)
    }

    /// Creates a new unvisited place with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: PlaceId, owner: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            visited: false,
            notes: None,
            visited_on: None,
            photo_ref: None,
        }
    }

    /// Checks domain invariants before persistence.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after trimming.
    /// - `VisitDateWithoutVisit` when a visit date is set on an unvisited
    ///   place.
    pub fn validate(&self) -> Result<(), PlaceValidationError> {
        if self.name.trim().is_empty() {
            return Err(PlaceValidationError::EmptyName);
        }
        if self.visited_on.is_some() && !self.visited {
            return Err(PlaceValidationError::VisitDateWithoutVisit);
        }
        Ok(())
    }

    /// Returns whether the actor owns this place.
    pub fn is_owned_by(&self, actor: &ActorId) -> bool {
        &self.owner == actor
    }
}

/// Domain validation errors for place records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// A visit date is set while the place is still unvisited.
    VisitDateWithoutVisit,
}

impl Display for PlaceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "place name must not be empty"),
            Self::VisitDateWithoutVisit => {
                write!(f, "visit date is only valid on a visited place")
            }
        }
    }
}

impl Error for PlaceValidationError {}

#[cfg(test)]
mod tests {
    use super::{ActorId, ActorIdError, Place, PlaceValidationError};
    use chrono::NaiveDate;

    fn actor(name: &str) -> ActorId {
        ActorId::parse(name).expect("valid actor id")
    }

    #[test]
    fn actor_id_parse_trims_surrounding_whitespace() {
        let parsed = ActorId::parse("  alice  ").expect("padded id should parse");
        assert_eq!(parsed.as_str(), "alice");
    }

    #[test]
    fn actor_id_parse_rejects_blank_input() {
        let err = ActorId::parse("   ").expect_err("blank id must fail");
        assert_eq!(err, ActorIdError::Empty);
    }

    #[test]
    fn new_place_starts_unvisited_with_creating_owner() {
        let place = Place::new(actor("alice"), "Tokyo");
        assert!(!place.visited);
        assert_eq!(place.owner, actor("alice"));
        assert!(place.visited_on.is_none());
        assert!(place.notes.is_none());
        assert!(place.photo_ref.is_none());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let place = Place::new(actor("alice"), "   ");
        assert_eq!(place.validate(), Err(PlaceValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_visit_date_on_unvisited_place() {
        let mut place = Place::new(actor("alice"), "Tokyo");
        place.visited_on = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(
            place.validate(),
            Err(PlaceValidationError::VisitDateWithoutVisit)
        );
    }

    #[test]
    fn validate_accepts_visit_date_on_visited_place() {
        let mut place = Place::new(actor("alice"), "Tokyo");
        place.visited = true;
        place.visited_on = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(place.validate(), Ok(()));
    }

    #[test]
    fn ownership_check_compares_actor_identity() {
        let place = Place::new(actor("alice"), "Tokyo");
        assert!(place.is_owned_by(&actor("alice")));
        assert!(!place.is_owned_by(&actor("bob")));
    }

    #[test]
    fn place_serializes_with_stable_field_names() {
        let place = Place::new(actor("alice"), "Tokyo");
        let json = serde_json::to_value(&place).expect("place should serialize");
        assert_eq!(json["owner"], "alice");
        assert_eq!(json["visited"], false);
        assert!(json["visited_on"].is_null());
    }
}
