//! Repository traits for the places domain.
//!
//! `PlacesRepository` models a document store: whole-document reads and replaces keyed by
//! `short_id`, plus targeted partial updates addressed at embedded arrays.

use async_trait::async_trait;
use places_sdk::{
    AccessPlace, Block, Group, Place, PlaceAccessField, Rect, Reservation, User, UserAccess,
    UserAccessLevel,
};
use uuid::Uuid;

use super::error::DomainError;

/// Result of a partial update, mirroring a document store's acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents that satisfied the filter (and every array-element predicate).
    pub matched: u64,
    /// Documents actually changed.
    pub modified: u64,
}

impl UpdateOutcome {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched > 0
    }
}

/// Selects the single non-deleted place a partial update applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceFilter {
    pub short_id: String,
    /// When set, the update only matches if the stored version is still this one.
    pub expected_version: Option<u64>,
}

impl PlaceFilter {
    pub fn by_short_id(short_id: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            expected_version: None,
        }
    }

    #[must_use]
    pub fn at_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }
}

/// Typed path updates on a place document.
///
/// Variants addressing an array element only match when that element exists; a missing
/// grid, block, reservation or user entry yields `matched == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceUpdate {
    MarkDeleted,
    SetDetails {
        name: String,
        description: String,
    },
    SetAccess {
        field: PlaceAccessField,
        level: AccessPlace,
    },
    PushUserAccess(UserAccess),
    SetUserAccessLevel {
        user_name: String,
        level: UserAccessLevel,
    },
    PushBlock {
        grid_id: Uuid,
        block: Block,
    },
    SetBlockRect {
        grid_id: Uuid,
        block_id: Uuid,
        rect: Rect,
    },
    SetBlockName {
        grid_id: Uuid,
        block_id: Uuid,
        name: String,
    },
    PullBlock {
        grid_id: Uuid,
        block_id: Uuid,
    },
    PushReservation(Reservation),
    PullReservation {
        reservation_id: Uuid,
    },
}

/// Document store for place aggregates.
#[async_trait]
pub trait PlacesRepository: Send + Sync {
    /// Find a non-deleted place by short id.
    async fn find_by_short_id(&self, short_id: &str) -> anyhow::Result<Option<Place>>;

    /// Whether any place, deleted or not, uses this short id.
    async fn short_id_exists(&self, short_id: &str) -> anyhow::Result<bool>;

    /// Non-deleted places, optionally restricted to one owner.
    async fn list(&self, owner_id: Option<&str>) -> anyhow::Result<Vec<Place>>;

    /// Insert a new place.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ShortIdTaken` when the short id is already in use.
    async fn insert(&self, place: Place) -> Result<(), DomainError>;

    /// Replace the whole document if its stored version still equals `expected_version`.
    ///
    /// Returns `false` when the place is missing, deleted or was modified meanwhile.
    async fn replace(&self, place: Place, expected_version: u64) -> anyhow::Result<bool>;

    /// Apply one path update to the place selected by `filter`.
    async fn update_one(
        &self,
        filter: &PlaceFilter,
        update: PlaceUpdate,
    ) -> anyhow::Result<UpdateOutcome>;

    /// Rewrite the user name of every access entry equal to `old_user_name`, across all
    /// places. A place that already grants `new_user_name` drops the old entry instead.
    async fn rename_user_access(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> anyhow::Result<UpdateOutcome>;
}

/// Store for the per-owner group lists.
#[async_trait]
pub trait GroupsRepository: Send + Sync {
    /// Insert a group at `max(order of owner's non-deleted groups) + 1`, computed under the
    /// same lock as the insert.
    async fn insert_appended(&self, owner_id: &str, name: &str) -> anyhow::Result<Group>;

    /// Find a non-deleted group.
    async fn find_active(&self, group_id: Uuid) -> anyhow::Result<Option<Group>>;

    /// Non-deleted groups of the owner, ascending by order.
    async fn list_active(&self, owner_id: &str) -> anyhow::Result<Vec<Group>>;

    /// Increment the order of every non-deleted group of the owner with `order >= from`.
    async fn shift_orders_from(&self, owner_id: &str, from: i64) -> anyhow::Result<u64>;

    /// Set the order of a non-deleted group. Returns `false` when it does not match.
    async fn set_order(&self, group_id: Uuid, order: i64) -> anyhow::Result<bool>;

    /// Set the name of a non-deleted group. Returns `false` when it does not match.
    async fn set_name(&self, group_id: Uuid, name: &str) -> anyhow::Result<bool>;

    /// Flag a group as deleted, matching by id only. Returns the matched count.
    async fn mark_deleted(&self, group_id: Uuid) -> anyhow::Result<u64>;
}

/// Store for registered users.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_tg_id(&self, tg_id: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_user_name(&self, user_name: &str) -> anyhow::Result<Option<User>>;

    async fn insert(&self, user: User) -> anyhow::Result<()>;

    /// Returns `false` when no non-deleted user has this `tg_id`.
    async fn set_user_name(&self, tg_id: &str, user_name: &str) -> anyhow::Result<bool>;
}
