//! Places Module Implementation
//!
//! The public API is defined in `places-sdk` and re-exported here.

pub use places_sdk::{
    AccessPlace, Block, EntityKind, Grid, Group, GroupsApi, NewBlock, NewPlace, NewReservation,
    Place, PlaceAccess, PlaceAccessField, PlaceLayout, PlaceUserAccess, PlacesApi, PlacesError,
    Rect, Reservation, User, UserAccess, UserAccessLevel, UsersApi,
};

pub mod module;
pub use module::PlacesModule;

pub mod local_client;

pub mod config;
pub mod domain;
pub mod infra;
