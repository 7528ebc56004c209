//! Places module wiring.

use std::sync::Arc;

use places_sdk::{GroupsApi, PlacesApi, UsersApi};
use tracing::info;

use crate::config::PlacesConfig;
use crate::domain::ports::ShortIdGenerator;
use crate::domain::repo::{GroupsRepository, PlacesRepository, UsersRepository};
use crate::domain::service::{GroupsService, PlacesService, UsersService};
use crate::infra::short_id::NanoShortIdGenerator;
use crate::infra::storage::{
    InMemoryGroupsRepository, InMemoryPlacesRepository, InMemoryUsersRepository,
};
use crate::local_client::PlacesLocalClient;

/// Assembled places module: services plus the client exposing the SDK traits.
pub struct PlacesModule {
    places: Arc<PlacesService>,
    groups: Arc<GroupsService>,
    users: Arc<UsersService>,
    client: Arc<PlacesLocalClient>,
}

impl PlacesModule {
    /// Build the module over in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error when `config` fails validation.
    pub fn in_memory(config: PlacesConfig) -> anyhow::Result<Self> {
        Self::with_repositories(
            config,
            Arc::new(InMemoryPlacesRepository::new()),
            Arc::new(InMemoryGroupsRepository::new()),
            Arc::new(InMemoryUsersRepository::new()),
            Arc::new(NanoShortIdGenerator),
        )
    }

    /// Build the module over caller-provided stores and short id generator.
    ///
    /// # Errors
    ///
    /// Returns an error when `config` fails validation.
    pub fn with_repositories(
        config: PlacesConfig,
        places_repo: Arc<dyn PlacesRepository>,
        groups_repo: Arc<dyn GroupsRepository>,
        users_repo: Arc<dyn UsersRepository>,
        short_ids: Arc<dyn ShortIdGenerator>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let places = Arc::new(PlacesService::new(
            places_repo,
            groups_repo.clone(),
            short_ids,
            config.clone(),
        ));
        let groups = Arc::new(GroupsService::new(groups_repo, config.clone()));
        let users = Arc::new(UsersService::new(users_repo, places.clone(), config));
        let client = Arc::new(PlacesLocalClient::new(
            places.clone(),
            groups.clone(),
            users.clone(),
        ));

        info!("Places module initialized");
        Ok(Self {
            places,
            groups,
            users,
            client,
        })
    }

    #[must_use]
    pub fn places_service(&self) -> Arc<PlacesService> {
        self.places.clone()
    }

    #[must_use]
    pub fn groups_service(&self) -> Arc<GroupsService> {
        self.groups.clone()
    }

    #[must_use]
    pub fn users_service(&self) -> Arc<UsersService> {
        self.users.clone()
    }

    #[must_use]
    pub fn places_api(&self) -> Arc<dyn PlacesApi> {
        self.client.clone()
    }

    #[must_use]
    pub fn groups_api(&self) -> Arc<dyn GroupsApi> {
        self.client.clone()
    }

    #[must_use]
    pub fn users_api(&self) -> Arc<dyn UsersApi> {
        self.client.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_rejects_invalid_config() {
        let config = PlacesConfig {
            short_id_length: 0,
            ..PlacesConfig::default()
        };
        assert!(PlacesModule::in_memory(config).is_err());
    }

    #[tokio::test]
    async fn test_in_memory_round_trip_through_client() {
        let module = PlacesModule::in_memory(PlacesConfig::default()).unwrap();
        let api = module.places_api();

        let short_id = api
            .create_place(places_sdk::NewPlace::new("u1", "Office", ""))
            .await
            .unwrap();
        assert_eq!(short_id.len(), 4);

        let place = api.get_place(&short_id).await.unwrap();
        assert_eq!(place.grids.len(), 1);
    }
}
