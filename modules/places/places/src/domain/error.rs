//! Domain error types for the places module.

use places_sdk::{EntityKind, PlacesError};
use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors for the places module.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Place not found: {short_id}")]
    PlaceNotFound { short_id: String },

    #[error("Grid not found: {grid_id}")]
    GridNotFound { grid_id: Uuid },

    #[error("Block not found: {block_id}")]
    BlockNotFound { block_id: Uuid },

    #[error("Reservation not found: {reservation_id}")]
    ReservationNotFound { reservation_id: Uuid },

    #[error("User '{user_name}' has no access entry")]
    UserAccessNotFound { user_name: String },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: Uuid },

    #[error("User not found: {key}")]
    UserNotFound { key: String },

    #[error("Block overlaps existing block {block_id}")]
    BlockOverlap { block_id: Uuid },

    #[error("Reservation overlaps existing reservation {reservation_id}")]
    ReservationOverlap { reservation_id: Uuid },

    #[error("User '{user_name}' already has access")]
    UserAccessExists { user_name: String },

    #[error("Short id already taken: {short_id}")]
    ShortIdTaken { short_id: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    /// A write matched no document although the preceding read found one.
    #[error("Persistence inconsistency during {operation}")]
    PersistenceInconsistency { operation: &'static str },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub fn place_not_found(short_id: impl Into<String>) -> Self {
        Self::PlaceNotFound {
            short_id: short_id.into(),
        }
    }

    #[must_use]
    pub fn grid_not_found(grid_id: Uuid) -> Self {
        Self::GridNotFound { grid_id }
    }

    #[must_use]
    pub fn block_not_found(block_id: Uuid) -> Self {
        Self::BlockNotFound { block_id }
    }

    #[must_use]
    pub fn reservation_not_found(reservation_id: Uuid) -> Self {
        Self::ReservationNotFound { reservation_id }
    }

    pub fn user_access_not_found(user_name: impl Into<String>) -> Self {
        Self::UserAccessNotFound {
            user_name: user_name.into(),
        }
    }

    #[must_use]
    pub fn group_not_found(group_id: Uuid) -> Self {
        Self::GroupNotFound { group_id }
    }

    pub fn user_not_found(key: impl Into<String>) -> Self {
        Self::UserNotFound { key: key.into() }
    }

    pub fn user_access_exists(user_name: impl Into<String>) -> Self {
        Self::UserAccessExists {
            user_name: user_name.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn persistence_inconsistency(operation: &'static str) -> Self {
        Self::PersistenceInconsistency { operation }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for PlacesError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::PlaceNotFound { short_id } => {
                PlacesError::not_found(EntityKind::Place, short_id)
            }
            DomainError::GridNotFound { grid_id } => {
                PlacesError::not_found(EntityKind::Grid, grid_id.to_string())
            }
            DomainError::BlockNotFound { block_id } => {
                PlacesError::not_found(EntityKind::Block, block_id.to_string())
            }
            DomainError::ReservationNotFound { reservation_id } => {
                PlacesError::not_found(EntityKind::Reservation, reservation_id.to_string())
            }
            DomainError::UserAccessNotFound { user_name } => {
                PlacesError::not_found(EntityKind::UserAccess, user_name)
            }
            DomainError::GroupNotFound { group_id } => {
                PlacesError::not_found(EntityKind::Group, group_id.to_string())
            }
            DomainError::UserNotFound { key } => PlacesError::not_found(EntityKind::User, key),
            DomainError::BlockOverlap { block_id } => {
                PlacesError::conflict(EntityKind::Block, block_id.to_string())
            }
            DomainError::ReservationOverlap { reservation_id } => {
                PlacesError::conflict(EntityKind::Reservation, reservation_id.to_string())
            }
            DomainError::UserAccessExists { user_name } => {
                PlacesError::conflict(EntityKind::UserAccess, user_name)
            }
            DomainError::Validation { field, message } => PlacesError::validation(field, message),
            DomainError::ShortIdTaken { .. }
            | DomainError::PersistenceInconsistency { .. }
            | DomainError::Internal(_) => PlacesError::internal(),
        }
    }
}
