//! Local client adapter implementing the SDK API traits.
//!
//! Bridges the domain services to `PlacesApi`, `GroupsApi` and `UsersApi`, converting
//! domain errors into `PlacesError`.

use std::sync::Arc;

use async_trait::async_trait;
use places_sdk::{
    AccessPlace, Group, GroupsApi, NewBlock, NewPlace, NewReservation, Place, PlaceAccess,
    PlaceAccessField, PlaceLayout, PlaceUserAccess, PlacesApi, PlacesError, Rect, User,
    UserAccessLevel, UsersApi,
};
use uuid::Uuid;

use crate::domain::service::{GroupsService, PlacesService, UsersService};

pub struct PlacesLocalClient {
    places: Arc<PlacesService>,
    groups: Arc<GroupsService>,
    users: Arc<UsersService>,
}

impl PlacesLocalClient {
    pub fn new(
        places: Arc<PlacesService>,
        groups: Arc<GroupsService>,
        users: Arc<UsersService>,
    ) -> Self {
        Self {
            places,
            groups,
            users,
        }
    }
}

#[async_trait]
impl PlacesApi for PlacesLocalClient {
    // === Lifecycle ===

    async fn create_place(&self, new_place: NewPlace) -> Result<String, PlacesError> {
        self.places
            .create_place(new_place)
            .await
            .map_err(Into::into)
    }

    async fn get_place(&self, short_id: &str) -> Result<Place, PlacesError> {
        self.places.get_place(short_id).await.map_err(Into::into)
    }

    async fn list_places(&self, owner_id: Option<&str>) -> Result<Vec<Place>, PlacesError> {
        self.places.list_places(owner_id).await.map_err(Into::into)
    }

    async fn delete_place(&self, short_id: &str) -> Result<(), PlacesError> {
        self.places.delete_place(short_id).await.map_err(Into::into)
    }

    async fn update_place_details(
        &self,
        short_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), PlacesError> {
        self.places
            .update_place_details(short_id, name, description)
            .await
            .map_err(Into::into)
    }

    // === Access ===

    async fn update_place_access(
        &self,
        short_id: &str,
        field: PlaceAccessField,
        level: AccessPlace,
    ) -> Result<(), PlacesError> {
        self.places
            .update_place_access(short_id, field, level)
            .await
            .map_err(Into::into)
    }

    async fn get_place_access(&self, short_id: &str) -> Result<PlaceAccess, PlacesError> {
        self.places
            .get_place_access(short_id)
            .await
            .map_err(Into::into)
    }

    async fn get_place_user_access(&self, short_id: &str) -> Result<PlaceUserAccess, PlacesError> {
        self.places
            .get_place_user_access(short_id)
            .await
            .map_err(Into::into)
    }

    async fn get_place_layout(&self, short_id: &str) -> Result<PlaceLayout, PlacesError> {
        self.places
            .get_place_layout(short_id)
            .await
            .map_err(Into::into)
    }

    async fn assign_groups(&self, short_id: &str, group_ids: Vec<Uuid>) -> Result<(), PlacesError> {
        self.places
            .assign_groups(short_id, group_ids)
            .await
            .map_err(Into::into)
    }

    async fn add_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), PlacesError> {
        self.places
            .add_user_access(short_id, user_name, level)
            .await
            .map_err(Into::into)
    }

    async fn update_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), PlacesError> {
        self.places
            .update_user_access(short_id, user_name, level)
            .await
            .map_err(Into::into)
    }

    async fn rename_user_across_places(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> Result<u64, PlacesError> {
        self.places
            .rename_user_across_places(old_user_name, new_user_name)
            .await
            .map_err(Into::into)
    }

    // === Layout ===

    async fn add_block(&self, short_id: &str, new_block: NewBlock) -> Result<Uuid, PlacesError> {
        self.places
            .add_block(short_id, new_block)
            .await
            .map_err(Into::into)
    }

    async fn update_block_coordinates(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        rect: Rect,
    ) -> Result<(), PlacesError> {
        self.places
            .update_block_coordinates(short_id, grid_id, block_id, rect)
            .await
            .map_err(Into::into)
    }

    async fn rename_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        name: &str,
    ) -> Result<(), PlacesError> {
        self.places
            .rename_block(short_id, grid_id, block_id, name)
            .await
            .map_err(Into::into)
    }

    async fn delete_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
    ) -> Result<(), PlacesError> {
        self.places
            .delete_block(short_id, grid_id, block_id)
            .await
            .map_err(Into::into)
    }

    // === Booking ===

    async fn add_reservation(
        &self,
        short_id: &str,
        new_reservation: NewReservation,
    ) -> Result<Uuid, PlacesError> {
        self.places
            .add_reservation(short_id, new_reservation)
            .await
            .map_err(Into::into)
    }

    async fn delete_reservation(
        &self,
        short_id: &str,
        reservation_id: Uuid,
    ) -> Result<(), PlacesError> {
        self.places
            .delete_reservation(short_id, reservation_id)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl GroupsApi for PlacesLocalClient {
    async fn create_group(&self, owner_id: &str, name: &str) -> Result<Group, PlacesError> {
        self.groups
            .create_group(owner_id, name)
            .await
            .map_err(Into::into)
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Group, PlacesError> {
        self.groups.get_group(group_id).await.map_err(Into::into)
    }

    async fn list_groups(&self, owner_id: &str) -> Result<Vec<Group>, PlacesError> {
        self.groups.list_groups(owner_id).await.map_err(Into::into)
    }

    async fn rename_group(&self, group_id: Uuid, name: &str) -> Result<bool, PlacesError> {
        self.groups
            .rename_group(group_id, name)
            .await
            .map_err(Into::into)
    }

    async fn reorder_group(&self, group_id: Uuid, new_order: i64) -> Result<bool, PlacesError> {
        self.groups
            .reorder_group(group_id, new_order)
            .await
            .map_err(Into::into)
    }

    async fn delete_group(&self, group_id: Uuid) -> Result<bool, PlacesError> {
        self.groups.delete_group(group_id).await.map_err(Into::into)
    }

    async fn normalize_group_orders(&self, owner_id: &str) -> Result<Vec<Group>, PlacesError> {
        self.groups
            .normalize_group_orders(owner_id)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl UsersApi for PlacesLocalClient {
    async fn sync_user(&self, tg_id: &str, user_name: &str) -> Result<User, PlacesError> {
        self.users
            .sync_user(tg_id, user_name)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, tg_id: &str) -> Result<User, PlacesError> {
        self.users.get_user(tg_id).await.map_err(Into::into)
    }

    async fn find_user_by_name(&self, user_name: &str) -> Result<User, PlacesError> {
        self.users
            .find_user_by_name(user_name)
            .await
            .map_err(Into::into)
    }
}
