//! Domain model for the travel wishlist.
//!
//! # Responsibility
//! - Define the canonical place record and the actor identity type.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every place is identified by a stable `PlaceId`.
//! - Every place has exactly one owner for its entire lifetime.

pub mod place;
