//! Places SDK
//!
//! This crate provides the public API for the `places` module:
//! - `PlacesApi` trait for place, layout, booking and access operations
//! - `GroupsApi` trait for the per-user ordered group list
//! - `UsersApi` trait for the user directory
//! - Transport-agnostic models (`Place`, `Grid`, `Block`, `Reservation`, `Group`, ...)
//! - `PlacesError` for error handling
//!
//! ## Usage
//!
//! ```ignore
//! use places_sdk::{NewBlock, NewPlace, PlacesApi, Rect};
//!
//! let short_id = client.create_place(NewPlace::new("owner-1", "Office", "")).await?;
//! let layout = client.get_place_layout(&short_id).await?;
//! let grid_id = layout.grids[0].grid_id;
//! let block_id = client
//!     .add_block(&short_id, NewBlock::new(grid_id, Rect::new(0, 0, 10, 10), "Desk 1"))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::{GroupsApi, PlacesApi, UsersApi};
pub use errors::{EntityKind, PlacesError};
pub use models::{
    AccessPlace, Block, Grid, Group, NewBlock, NewPlace, NewReservation, Place, PlaceAccess,
    PlaceAccessField, PlaceLayout, PlaceUserAccess, Rect, Reservation, User, UserAccess,
    UserAccessLevel, DEFAULT_PLACE_COLOR,
};
