//! Public API traits for the `places` module.
//!
//! Places are addressed by their short id everywhere; grids, blocks and reservations are
//! addressed inside a place by their own ids.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::PlacesError;
use crate::models::{
    AccessPlace, Group, NewBlock, NewPlace, NewReservation, Place, PlaceAccess,
    PlaceAccessField, PlaceLayout, PlaceUserAccess, Rect, User, UserAccessLevel,
};

/// Place aggregate operations: lifecycle, access, layout and booking.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Create a place with one empty grid and default access levels.
    ///
    /// Returns the short id of the new place.
    async fn create_place(&self, new_place: NewPlace) -> Result<String, PlacesError>;

    /// Get a non-deleted place by short id.
    async fn get_place(&self, short_id: &str) -> Result<Place, PlacesError>;

    /// List non-deleted places, optionally restricted to one owner.
    async fn list_places(&self, owner_id: Option<&str>) -> Result<Vec<Place>, PlacesError>;

    /// Soft-delete a place.
    async fn delete_place(&self, short_id: &str) -> Result<(), PlacesError>;

    /// Change the name and description of a place.
    async fn update_place_details(
        &self,
        short_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), PlacesError>;

    /// Set exactly one of the three place-wide access levels.
    async fn update_place_access(
        &self,
        short_id: &str,
        field: PlaceAccessField,
        level: AccessPlace,
    ) -> Result<(), PlacesError>;

    async fn get_place_access(&self, short_id: &str) -> Result<PlaceAccess, PlacesError>;

    async fn get_place_user_access(&self, short_id: &str) -> Result<PlaceUserAccess, PlacesError>;

    async fn get_place_layout(&self, short_id: &str) -> Result<PlaceLayout, PlacesError>;

    /// Tag a place with groups owned by the place owner. Replaces the previous tags.
    async fn assign_groups(&self, short_id: &str, group_ids: Vec<Uuid>) -> Result<(), PlacesError>;

    /// Grant a named user access to a place.
    ///
    /// # Errors
    ///
    /// * `Conflict` - the user already has an entry on this place
    async fn add_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), PlacesError>;

    /// Change the level of an existing grant.
    async fn update_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), PlacesError>;

    /// Rewrite `old_user_name` to `new_user_name` in every place that grants it.
    ///
    /// Returns the number of places that were updated.
    async fn rename_user_across_places(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> Result<u64, PlacesError>;

    /// Add a block to a grid.
    ///
    /// # Errors
    ///
    /// * `Conflict` - the rectangle overlaps an existing block (carries its id)
    async fn add_block(&self, short_id: &str, new_block: NewBlock) -> Result<Uuid, PlacesError>;

    /// Move or resize a block.
    async fn update_block_coordinates(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        rect: Rect,
    ) -> Result<(), PlacesError>;

    async fn rename_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        name: &str,
    ) -> Result<(), PlacesError>;

    async fn delete_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
    ) -> Result<(), PlacesError>;

    /// Book a block for a half-open time interval.
    ///
    /// # Errors
    ///
    /// * `Conflict` - the interval overlaps a reservation of the same block
    async fn add_reservation(
        &self,
        short_id: &str,
        new_reservation: NewReservation,
    ) -> Result<Uuid, PlacesError>;

    async fn delete_reservation(
        &self,
        short_id: &str,
        reservation_id: Uuid,
    ) -> Result<(), PlacesError>;
}

/// The per-user ordered group list.
///
/// Mutations that address a single group return `Ok(false)` when the group does not exist
/// or is soft-deleted.
#[async_trait]
pub trait GroupsApi: Send + Sync {
    /// Append a group at the end of the owner's list.
    async fn create_group(&self, owner_id: &str, name: &str) -> Result<Group, PlacesError>;

    async fn get_group(&self, group_id: Uuid) -> Result<Group, PlacesError>;

    /// Non-deleted groups of the owner, ascending by order.
    async fn list_groups(&self, owner_id: &str) -> Result<Vec<Group>, PlacesError>;

    async fn rename_group(&self, group_id: Uuid, name: &str) -> Result<bool, PlacesError>;

    /// Move a group to `new_order`, shifting every group at or after it by one.
    async fn reorder_group(&self, group_id: Uuid, new_order: i64) -> Result<bool, PlacesError>;

    /// Soft-delete a group. Repeating the call keeps returning `true`.
    async fn delete_group(&self, group_id: Uuid) -> Result<bool, PlacesError>;

    /// Renumber the owner's groups to `1..n`, keeping their current order.
    async fn normalize_group_orders(&self, owner_id: &str) -> Result<Vec<Group>, PlacesError>;
}

/// The user directory.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Register a user or pick up a username change, renaming their grants on every place.
    async fn sync_user(&self, tg_id: &str, user_name: &str) -> Result<User, PlacesError>;

    async fn get_user(&self, tg_id: &str) -> Result<User, PlacesError>;

    async fn find_user_by_name(&self, user_name: &str) -> Result<User, PlacesError>;
}
