//! Place lifecycle: create, read, list, delete, details and group tags.

use places_sdk::{
    AccessPlace, DEFAULT_PLACE_COLOR, Grid, NewPlace, Place, PlaceAccess, PlaceLayout,
    PlaceUserAccess,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{PlacesService, check_length, require_non_empty};
use crate::domain::error::DomainError;
use crate::domain::repo::{PlaceFilter, PlaceUpdate};

impl PlacesService {
    /// Create a place with one empty grid and default access levels.
    ///
    /// Short ids are drawn until one is free; a collision on insert also draws again.
    pub async fn create_place(&self, new_place: NewPlace) -> Result<String, DomainError> {
        require_non_empty("ownerId", &new_place.owner_id)?;
        require_non_empty("name", &new_place.name)?;
        check_length("name", &new_place.name, self.config.max_name_length)?;

        let NewPlace {
            owner_id,
            name,
            description,
        } = new_place;

        for attempt in 1..=self.config.short_id_max_attempts {
            let short_id = self.short_ids.new_short_id(self.config.short_id_length);
            if self.repo.short_id_exists(&short_id).await? {
                debug!(attempt, %short_id, "short id already taken, drawing another");
                continue;
            }

            let place = Place {
                place_id: Uuid::now_v7(),
                short_id: short_id.clone(),
                owner_id: owner_id.clone(),
                name: name.clone(),
                description: description.clone(),
                color: DEFAULT_PLACE_COLOR.to_owned(),
                visible: AccessPlace::All,
                editable: AccessPlace::Nobody,
                reservable: AccessPlace::All,
                group_ids: Vec::new(),
                user_accesses: Vec::new(),
                grids: vec![Grid {
                    grid_id: Uuid::now_v7(),
                    blocks: Vec::new(),
                }],
                reservations: Vec::new(),
                is_deleted: false,
                version: 0,
            };

            match self.repo.insert(place).await {
                Ok(()) => {
                    info!(%short_id, %owner_id, "Created place");
                    return Ok(short_id);
                }
                Err(DomainError::ShortIdTaken { short_id }) => {
                    debug!(attempt, %short_id, "short id taken on insert, drawing another");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.config.short_id_max_attempts,
            length = self.config.short_id_length,
            "could not allocate a free short id"
        );
        Err(DomainError::Internal(anyhow::anyhow!(
            "no free short id of length {} after {} attempts",
            self.config.short_id_length,
            self.config.short_id_max_attempts
        )))
    }

    pub async fn get_place(&self, short_id: &str) -> Result<Place, DomainError> {
        debug!(short_id, "Getting place");
        self.load(short_id).await
    }

    pub async fn list_places(&self, owner_id: Option<&str>) -> Result<Vec<Place>, DomainError> {
        let places = self.repo.list(owner_id).await?;
        debug!(?owner_id, count = places.len(), "Listed places");
        Ok(places)
    }

    pub async fn delete_place(&self, short_id: &str) -> Result<(), DomainError> {
        let outcome = self
            .repo
            .update_one(&PlaceFilter::by_short_id(short_id), PlaceUpdate::MarkDeleted)
            .await?;
        if !outcome.is_matched() {
            return Err(DomainError::place_not_found(short_id));
        }
        info!(short_id, "Deleted place");
        Ok(())
    }

    pub async fn update_place_details(
        &self,
        short_id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), DomainError> {
        require_non_empty("name", name)?;
        check_length("name", name, self.config.max_name_length)?;

        let outcome = self
            .repo
            .update_one(
                &PlaceFilter::by_short_id(short_id),
                PlaceUpdate::SetDetails {
                    name: name.to_owned(),
                    description: description.to_owned(),
                },
            )
            .await?;
        if !outcome.is_matched() {
            return Err(DomainError::place_not_found(short_id));
        }
        info!(short_id, "Updated place details");
        Ok(())
    }

    pub async fn get_place_access(&self, short_id: &str) -> Result<PlaceAccess, DomainError> {
        let place = self.load(short_id).await?;
        Ok(PlaceAccess {
            short_id: place.short_id,
            visible: place.visible,
            editable: place.editable,
            reservable: place.reservable,
        })
    }

    pub async fn get_place_user_access(
        &self,
        short_id: &str,
    ) -> Result<PlaceUserAccess, DomainError> {
        let place = self.load(short_id).await?;
        Ok(PlaceUserAccess {
            place_id: place.place_id,
            visible: place.visible,
            editable: place.editable,
            reservable: place.reservable,
            user_accesses: place.user_accesses,
        })
    }

    pub async fn get_place_layout(&self, short_id: &str) -> Result<PlaceLayout, DomainError> {
        let place = self.load(short_id).await?;
        Ok(PlaceLayout {
            grids: place.grids,
            reservations: place.reservations,
        })
    }

    /// Replace the group tags of a place. Every group must be active and belong to the
    /// place owner; duplicates are collapsed keeping the first occurrence.
    pub async fn assign_groups(
        &self,
        short_id: &str,
        group_ids: Vec<Uuid>,
    ) -> Result<(), DomainError> {
        let mut unique = Vec::with_capacity(group_ids.len());
        for id in group_ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        for attempt in 1..=self.config.write_attempts() {
            let mut place = self.load(short_id).await?;

            for &group_id in &unique {
                let group = self
                    .groups
                    .find_active(group_id)
                    .await?
                    .ok_or_else(|| DomainError::group_not_found(group_id))?;
                if group.owner_id != place.owner_id {
                    return Err(DomainError::validation(
                        "groupIds",
                        format!("group {group_id} does not belong to the place owner"),
                    ));
                }
            }

            let expected = place.version;
            place.group_ids.clone_from(&unique);
            if self.repo.replace(place, expected).await? {
                info!(short_id, groups = unique.len(), "Assigned groups to place");
                return Ok(());
            }
            debug!(attempt, short_id, "place changed concurrently, retrying group assignment");
        }

        Err(self.exhausted("assign_groups", short_id))
    }
}
