//! Public error types for the `places` module.
//!
//! These errors are safe to expose to other modules and transports. Every operation
//! resolves to success, not-found, conflict, validation failure or an internal error.

use std::fmt;

use thiserror::Error;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Place,
    Grid,
    Block,
    Reservation,
    UserAccess,
    Group,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Place => "Place",
            Self::Grid => "Grid",
            Self::Block => "Block",
            Self::Reservation => "Reservation",
            Self::UserAccess => "User access",
            Self::Group => "Group",
            Self::User => "User",
        };
        f.write_str(name)
    }
}

/// Errors that can be returned by the places, groups and users APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacesError {
    /// The referenced entity does not exist or is soft-deleted.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// The change collides with an existing entity (overlap or duplicate).
    #[error("{entity} conflicts with existing {entity} {conflicting_id}")]
    Conflict {
        entity: EntityKind,
        conflicting_id: String,
    },

    /// The request carried an invalid value.
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl PlacesError {
    /// Create a `NotFound` error.
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a `Conflict` error.
    pub fn conflict(entity: EntityKind, conflicting_id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            conflicting_id: conflicting_id.into(),
        }
    }

    /// Create a `Validation` error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an `Internal` error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
