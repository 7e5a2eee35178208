//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate guard and repository calls into use-case level APIs.
//! - Keep outer layers decoupled from storage details.

pub mod place_service;
