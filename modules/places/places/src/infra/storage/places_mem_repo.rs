//! In-memory document store for place aggregates.

use async_trait::async_trait;
use parking_lot::RwLock;
use places_sdk::Place;

use crate::domain::error::DomainError;
use crate::domain::repo::{PlaceFilter, PlaceUpdate, PlacesRepository, UpdateOutcome};

/// Keeps every place document in a vector guarded by a `RwLock`.
///
/// Each call takes the lock once, so a single update is atomic with respect to other
/// calls. Documents are cloned in and out; callers never hold references into the store.
#[derive(Default)]
pub struct InMemoryPlacesRepository {
    places: RwLock<Vec<Place>>,
}

impl InMemoryPlacesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies `update` to `place`.
///
/// Returns `None` when an array-element predicate did not match, otherwise whether the
/// document changed.
fn apply_update(place: &mut Place, update: PlaceUpdate) -> Option<bool> {
    match update {
        PlaceUpdate::MarkDeleted => {
            let changed = !place.is_deleted;
            place.is_deleted = true;
            Some(changed)
        }
        PlaceUpdate::SetDetails { name, description } => {
            let changed = place.name != name || place.description != description;
            place.name = name;
            place.description = description;
            Some(changed)
        }
        PlaceUpdate::SetAccess { field, level } => {
            let slot = place.access_mut(field);
            let changed = *slot != level;
            *slot = level;
            Some(changed)
        }
        PlaceUpdate::PushUserAccess(access) => {
            place.user_accesses.push(access);
            Some(true)
        }
        PlaceUpdate::SetUserAccessLevel { user_name, level } => {
            let entry = place
                .user_accesses
                .iter_mut()
                .find(|u| u.user_name == user_name)?;
            let changed = entry.level != level;
            entry.level = level;
            Some(changed)
        }
        PlaceUpdate::PushBlock { grid_id, block } => {
            let grid = place.grids.iter_mut().find(|g| g.grid_id == grid_id)?;
            grid.blocks.push(block);
            Some(true)
        }
        PlaceUpdate::SetBlockRect {
            grid_id,
            block_id,
            rect,
        } => {
            let block = place
                .grids
                .iter_mut()
                .find(|g| g.grid_id == grid_id)?
                .blocks
                .iter_mut()
                .find(|b| b.block_id == block_id)?;
            let changed = block.rect != rect;
            block.rect = rect;
            Some(changed)
        }
        PlaceUpdate::SetBlockName {
            grid_id,
            block_id,
            name,
        } => {
            let block = place
                .grids
                .iter_mut()
                .find(|g| g.grid_id == grid_id)?
                .blocks
                .iter_mut()
                .find(|b| b.block_id == block_id)?;
            let changed = block.name != name;
            block.name = name;
            Some(changed)
        }
        PlaceUpdate::PullBlock { grid_id, block_id } => {
            let grid = place.grids.iter_mut().find(|g| g.grid_id == grid_id)?;
            let before = grid.blocks.len();
            grid.blocks.retain(|b| b.block_id != block_id);
            (grid.blocks.len() != before).then_some(true)
        }
        PlaceUpdate::PushReservation(reservation) => {
            place.reservations.push(reservation);
            Some(true)
        }
        PlaceUpdate::PullReservation { reservation_id } => {
            let before = place.reservations.len();
            place
                .reservations
                .retain(|r| r.reservation_id != reservation_id);
            (place.reservations.len() != before).then_some(true)
        }
    }
}

#[async_trait]
impl PlacesRepository for InMemoryPlacesRepository {
    async fn find_by_short_id(&self, short_id: &str) -> anyhow::Result<Option<Place>> {
        let places = self.places.read();
        Ok(places
            .iter()
            .find(|p| p.short_id == short_id && !p.is_deleted)
            .cloned())
    }

    async fn short_id_exists(&self, short_id: &str) -> anyhow::Result<bool> {
        Ok(self.places.read().iter().any(|p| p.short_id == short_id))
    }

    async fn list(&self, owner_id: Option<&str>) -> anyhow::Result<Vec<Place>> {
        let places = self.places.read();
        Ok(places
            .iter()
            .filter(|p| !p.is_deleted)
            .filter(|p| owner_id.is_none_or(|owner| p.owner_id == owner))
            .cloned()
            .collect())
    }

    async fn insert(&self, place: Place) -> Result<(), DomainError> {
        let mut places = self.places.write();
        if places.iter().any(|p| p.short_id == place.short_id) {
            return Err(DomainError::ShortIdTaken {
                short_id: place.short_id,
            });
        }
        places.push(place);
        Ok(())
    }

    async fn replace(&self, mut place: Place, expected_version: u64) -> anyhow::Result<bool> {
        let mut places = self.places.write();
        let Some(slot) = places
            .iter_mut()
            .find(|p| p.short_id == place.short_id && !p.is_deleted)
        else {
            return Ok(false);
        };
        if slot.version != expected_version {
            return Ok(false);
        }
        place.version = expected_version + 1;
        *slot = place;
        Ok(true)
    }

    async fn update_one(
        &self,
        filter: &PlaceFilter,
        update: PlaceUpdate,
    ) -> anyhow::Result<UpdateOutcome> {
        let mut places = self.places.write();
        let Some(place) = places.iter_mut().find(|p| {
            p.short_id == filter.short_id
                && !p.is_deleted
                && filter.expected_version.is_none_or(|v| p.version == v)
        }) else {
            return Ok(UpdateOutcome::default());
        };

        match apply_update(place, update) {
            None => Ok(UpdateOutcome::default()),
            Some(changed) => {
                if changed {
                    place.version += 1;
                }
                Ok(UpdateOutcome {
                    matched: 1,
                    modified: u64::from(changed),
                })
            }
        }
    }

    async fn rename_user_access(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> anyhow::Result<UpdateOutcome> {
        let mut places = self.places.write();
        let mut outcome = UpdateOutcome::default();

        for place in places
            .iter_mut()
            .filter(|p| p.user_access(old_user_name).is_some())
        {
            outcome.matched += 1;
            if old_user_name == new_user_name {
                continue;
            }
            if place.user_access(new_user_name).is_some() {
                place.user_accesses.retain(|u| u.user_name != old_user_name);
            } else {
                for entry in place
                    .user_accesses
                    .iter_mut()
                    .filter(|u| u.user_name == old_user_name)
                {
                    new_user_name.clone_into(&mut entry.user_name);
                }
            }
            place.version += 1;
            outcome.modified += 1;
        }

        Ok(outcome)
    }
}
