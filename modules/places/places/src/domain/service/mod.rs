//! Domain services for the places module.
//!
//! `PlacesService` drives the place aggregate; its operations are split by concern across
//! the submodules. Every read-check-write on a place writes with the version it read and
//! re-reads on a mismatch, up to `PlacesConfig::write_attempts` times.

use std::sync::Arc;

use places_sdk::Place;
use tracing::warn;

use super::error::DomainError;
use super::ports::ShortIdGenerator;
use super::repo::{GroupsRepository, PlacesRepository, UpdateOutcome};
use crate::config::PlacesConfig;

mod access;
mod booking;
mod groups;
mod layout;
mod places;
mod users;

pub use groups::GroupsService;
pub use users::UsersService;

/// Operations on the place aggregate.
pub struct PlacesService {
    repo: Arc<dyn PlacesRepository>,
    groups: Arc<dyn GroupsRepository>,
    short_ids: Arc<dyn ShortIdGenerator>,
    config: PlacesConfig,
}

impl PlacesService {
    pub fn new(
        repo: Arc<dyn PlacesRepository>,
        groups: Arc<dyn GroupsRepository>,
        short_ids: Arc<dyn ShortIdGenerator>,
        config: PlacesConfig,
    ) -> Self {
        Self {
            repo,
            groups,
            short_ids,
            config,
        }
    }

    /// Load a non-deleted place or fail with `PlaceNotFound`.
    async fn load(&self, short_id: &str) -> Result<Place, DomainError> {
        self.repo
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| DomainError::place_not_found(short_id))
    }

    fn exhausted(&self, operation: &'static str, short_id: &str) -> DomainError {
        warn!(
            operation,
            short_id,
            attempts = self.config.write_attempts(),
            "place kept changing between read and write, giving up"
        );
        DomainError::persistence_inconsistency(operation)
    }
}

/// A targeted write that was preceded by a successful read must match.
fn expect_matched(outcome: UpdateOutcome, operation: &'static str) -> Result<(), DomainError> {
    if outcome.is_matched() {
        Ok(())
    } else {
        Err(DomainError::persistence_inconsistency(operation))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("exceeds maximum length of {max}"),
        ));
    }
    Ok(())
}
