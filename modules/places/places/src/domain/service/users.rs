//! The user directory and username propagation.

use std::sync::Arc;

use places_sdk::User;
use tracing::{debug, info};
use uuid::Uuid;

use super::{PlacesService, check_length, require_non_empty};
use crate::config::PlacesConfig;
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
    places: Arc<PlacesService>,
    config: PlacesConfig,
}

impl UsersService {
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        places: Arc<PlacesService>,
        config: PlacesConfig,
    ) -> Self {
        Self {
            repo,
            places,
            config,
        }
    }

    /// Register `tg_id` or pick up a changed user name.
    ///
    /// A changed name is first rewritten in every place access list, then stored.
    pub async fn sync_user(&self, tg_id: &str, user_name: &str) -> Result<User, DomainError> {
        require_non_empty("tgId", tg_id)?;
        require_non_empty("userName", user_name)?;
        check_length("userName", user_name, self.config.max_name_length)?;

        let Some(mut user) = self.repo.find_by_tg_id(tg_id).await? else {
            let user = User {
                user_id: Uuid::now_v7(),
                tg_id: tg_id.to_owned(),
                user_name: user_name.to_owned(),
                is_deleted: false,
            };
            self.repo.insert(user.clone()).await?;
            info!(tg_id, user_name, "Registered user");
            return Ok(user);
        };

        if user.user_name == user_name {
            return Ok(user);
        }

        match self
            .places
            .rename_user_across_places(&user.user_name, user_name)
            .await
        {
            Ok(places) => debug!(tg_id, places, "Propagated user rename"),
            Err(DomainError::UserAccessNotFound { .. }) => {
                debug!(tg_id, "renamed user has no place grants");
            }
            Err(e) => return Err(e),
        }

        if !self.repo.set_user_name(tg_id, user_name).await? {
            return Err(DomainError::persistence_inconsistency("sync_user"));
        }
        info!(tg_id, old = %user.user_name, new = user_name, "Renamed user");
        user_name.clone_into(&mut user.user_name);
        Ok(user)
    }

    pub async fn get_user(&self, tg_id: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_tg_id(tg_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(tg_id))
    }

    pub async fn find_user_by_name(&self, user_name: &str) -> Result<User, DomainError> {
        self.repo
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_name))
    }
}
