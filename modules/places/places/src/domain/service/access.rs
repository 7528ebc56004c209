//! Place-wide access levels and per-user grants.

use places_sdk::{AccessPlace, PlaceAccessField, UserAccess, UserAccessLevel};
use tracing::{debug, info};

use super::{PlacesService, require_non_empty};
use crate::domain::error::DomainError;
use crate::domain::repo::{PlaceFilter, PlaceUpdate};

impl PlacesService {
    /// Set exactly one of the visible, editable and reservable levels.
    pub async fn update_place_access(
        &self,
        short_id: &str,
        field: PlaceAccessField,
        level: AccessPlace,
    ) -> Result<(), DomainError> {
        let outcome = self
            .repo
            .update_one(
                &PlaceFilter::by_short_id(short_id),
                PlaceUpdate::SetAccess { field, level },
            )
            .await?;
        if !outcome.is_matched() {
            return Err(DomainError::place_not_found(short_id));
        }
        info!(short_id, %field, ?level, "Updated place access");
        Ok(())
    }

    /// Grant `user_name` access. User names are matched case-sensitively.
    pub async fn add_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), DomainError> {
        require_non_empty("userName", user_name)?;

        for attempt in 1..=self.config.write_attempts() {
            let place = self.load(short_id).await?;
            if place.user_access(user_name).is_some() {
                return Err(DomainError::user_access_exists(user_name));
            }

            let outcome = self
                .repo
                .update_one(
                    &PlaceFilter::by_short_id(short_id).at_version(place.version),
                    PlaceUpdate::PushUserAccess(UserAccess {
                        user_name: user_name.to_owned(),
                        level,
                    }),
                )
                .await?;
            if outcome.is_matched() {
                info!(short_id, user_name, ?level, "Granted user access");
                return Ok(());
            }
            debug!(attempt, short_id, "place changed concurrently, retrying user grant");
        }

        Err(self.exhausted("add_user_access", short_id))
    }

    pub async fn update_user_access(
        &self,
        short_id: &str,
        user_name: &str,
        level: UserAccessLevel,
    ) -> Result<(), DomainError> {
        for attempt in 1..=self.config.write_attempts() {
            let place = self.load(short_id).await?;
            if place.user_access(user_name).is_none() {
                return Err(DomainError::user_access_not_found(user_name));
            }

            let outcome = self
                .repo
                .update_one(
                    &PlaceFilter::by_short_id(short_id).at_version(place.version),
                    PlaceUpdate::SetUserAccessLevel {
                        user_name: user_name.to_owned(),
                        level,
                    },
                )
                .await?;
            if outcome.is_matched() {
                info!(short_id, user_name, ?level, "Updated user access");
                return Ok(());
            }
            debug!(attempt, short_id, "place changed concurrently, retrying user access update");
        }

        Err(self.exhausted("update_user_access", short_id))
    }

    /// Rewrite every grant of `old_user_name` to `new_user_name`, deleted places included.
    ///
    /// Returns how many places referenced the old name.
    pub async fn rename_user_across_places(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> Result<u64, DomainError> {
        require_non_empty("oldUserName", old_user_name)?;
        require_non_empty("newUserName", new_user_name)?;

        let outcome = self
            .repo
            .rename_user_access(old_user_name, new_user_name)
            .await?;
        if !outcome.is_matched() {
            return Err(DomainError::user_access_not_found(old_user_name));
        }
        info!(
            old_user_name,
            new_user_name,
            places = outcome.matched,
            "Renamed user across places"
        );
        Ok(outcome.matched)
    }
}
