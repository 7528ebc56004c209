#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for writes racing with concurrent modifications of the same place

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use places::config::PlacesConfig;
use places::domain::error::DomainError;
use places::domain::repo::{PlaceFilter, PlaceUpdate, PlacesRepository, UpdateOutcome};
use places::infra::short_id::NanoShortIdGenerator;
use places::infra::storage::{
    InMemoryGroupsRepository, InMemoryPlacesRepository, InMemoryUsersRepository,
};
use places::{
    Block, EntityKind, NewBlock, NewPlace, NewReservation, Place, PlacesError, PlacesModule,
    Rect, Reservation, UserAccess, UserAccessLevel,
};
use time::macros::datetime;
use uuid::Uuid;

/// Wraps the in-memory store and slips another writer's update in right before a
/// version-checked write lands.
#[derive(Default)]
struct RacingRepo {
    inner: InMemoryPlacesRepository,
    interloper: Mutex<Option<PlaceUpdate>>,
    /// When set, every version-checked write is preceded by an unrelated modification.
    always_interfere: bool,
    bumps: AtomicU32,
}

impl RacingRepo {
    fn interfering_once(update: PlaceUpdate) -> Arc<Self> {
        Arc::new(Self {
            interloper: Mutex::new(Some(update)),
            ..Self::default()
        })
    }

    fn always_interfering() -> Arc<Self> {
        Arc::new(Self {
            always_interfere: true,
            ..Self::default()
        })
    }
}

#[async_trait]
impl PlacesRepository for RacingRepo {
    async fn find_by_short_id(&self, short_id: &str) -> anyhow::Result<Option<Place>> {
        self.inner.find_by_short_id(short_id).await
    }

    async fn short_id_exists(&self, short_id: &str) -> anyhow::Result<bool> {
        self.inner.short_id_exists(short_id).await
    }

    async fn list(&self, owner_id: Option<&str>) -> anyhow::Result<Vec<Place>> {
        self.inner.list(owner_id).await
    }

    async fn insert(&self, place: Place) -> Result<(), DomainError> {
        self.inner.insert(place).await
    }

    async fn replace(&self, place: Place, expected_version: u64) -> anyhow::Result<bool> {
        self.interfere(&place.short_id).await?;
        self.inner.replace(place, expected_version).await
    }

    async fn update_one(
        &self,
        filter: &PlaceFilter,
        update: PlaceUpdate,
    ) -> anyhow::Result<UpdateOutcome> {
        if filter.expected_version.is_some() {
            self.interfere(&filter.short_id).await?;
        }
        self.inner.update_one(filter, update).await
    }

    async fn rename_user_access(
        &self,
        old_user_name: &str,
        new_user_name: &str,
    ) -> anyhow::Result<UpdateOutcome> {
        self.inner
            .rename_user_access(old_user_name, new_user_name)
            .await
    }
}

impl RacingRepo {
    async fn interfere(&self, short_id: &str) -> anyhow::Result<()> {
        let pending = self.interloper.lock().take();
        let update = match pending {
            Some(update) => update,
            None if self.always_interfere => {
                let n = self.bumps.fetch_add(1, Ordering::SeqCst);
                PlaceUpdate::SetDetails {
                    name: format!("renamed {n}"),
                    description: String::new(),
                }
            }
            None => return Ok(()),
        };
        self.inner
            .update_one(&PlaceFilter::by_short_id(short_id), update)
            .await?;
        Ok(())
    }
}

fn module_over(repo: Arc<RacingRepo>) -> PlacesModule {
    PlacesModule::with_repositories(
        PlacesConfig::default(),
        repo,
        Arc::new(InMemoryGroupsRepository::new()),
        Arc::new(InMemoryUsersRepository::new()),
        Arc::new(NanoShortIdGenerator),
    )
    .unwrap()
}

async fn seed_place(repo: &RacingRepo) -> (String, Uuid) {
    let short_id = "race".to_owned();
    let grid_id = Uuid::now_v7();
    let mut place = Place {
        place_id: Uuid::now_v7(),
        short_id: short_id.clone(),
        owner_id: "owner".to_owned(),
        name: "Office".to_owned(),
        description: String::new(),
        color: "#8a7f8e".to_owned(),
        visible: places::AccessPlace::All,
        editable: places::AccessPlace::Nobody,
        reservable: places::AccessPlace::All,
        group_ids: Vec::new(),
        user_accesses: Vec::new(),
        grids: Vec::new(),
        reservations: Vec::new(),
        is_deleted: false,
        version: 0,
    };
    place.grids.push(places::Grid {
        grid_id,
        blocks: Vec::new(),
    });
    repo.inner.insert(place).await.unwrap();
    (short_id, grid_id)
}

#[tokio::test]
async fn test_racing_block_insert_is_rejected_after_retry() {
    let repo = Arc::new(RacingRepo::default());
    let (short_id, grid_id) = seed_place(&repo).await;
    let rival = Uuid::now_v7();
    *repo.interloper.lock() = Some(PlaceUpdate::PushBlock {
        grid_id,
        block: Block {
            block_id: rival,
            rect: Rect::new(0, 0, 10, 10),
            name: "rival".to_owned(),
            color: "#000000".to_owned(),
        },
    });
    let module = module_over(repo);
    let api = module.places_api();

    let err = api
        .add_block(&short_id, NewBlock::new(grid_id, Rect::new(5, 5, 15, 15), "mine"))
        .await
        .unwrap_err();
    assert_eq!(err, PlacesError::conflict(EntityKind::Block, rival.to_string()));

    let place = api.get_place(&short_id).await.unwrap();
    let blocks = &place.grid(grid_id).unwrap().blocks;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].block_id, rival);
}

#[tokio::test]
async fn test_racing_reservation_is_rejected_after_retry() {
    let block_id = Uuid::now_v7();
    let rival = Uuid::now_v7();
    let repo = RacingRepo::interfering_once(PlaceUpdate::PushReservation(Reservation {
        reservation_id: rival,
        grid_id: Uuid::nil(),
        block_id,
        start_time: datetime!(2025-12-10 10:00 UTC),
        end_time: datetime!(2025-12-10 12:00 UTC),
    }));
    let (short_id, grid_id) = seed_place(&repo).await;
    let module = module_over(repo);
    let api = module.places_api();

    let err = api
        .add_reservation(
            &short_id,
            NewReservation {
                grid_id,
                block_id,
                start_time: datetime!(2025-12-10 11:00 UTC),
                end_time: datetime!(2025-12-10 13:00 UTC),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PlacesError::conflict(EntityKind::Reservation, rival.to_string())
    );
    assert_eq!(
        api.get_place_layout(&short_id).await.unwrap().reservations.len(),
        1
    );
}

#[tokio::test]
async fn test_racing_user_grant_is_rejected_after_retry() {
    let repo = RacingRepo::interfering_once(PlaceUpdate::PushUserAccess(UserAccess {
        user_name: "alice".to_owned(),
        level: UserAccessLevel::Editable,
    }));
    let (short_id, _) = seed_place(&repo).await;
    let module = module_over(repo);
    let api = module.places_api();

    let err = api
        .add_user_access(&short_id, "alice", UserAccessLevel::View)
        .await
        .unwrap_err();
    assert_eq!(err, PlacesError::conflict(EntityKind::UserAccess, "alice"));

    let access = api.get_place_user_access(&short_id).await.unwrap();
    assert_eq!(access.user_accesses.len(), 1);
    assert_eq!(access.user_accesses[0].level, UserAccessLevel::Editable);
}

#[tokio::test]
async fn test_non_conflicting_race_succeeds_on_retry() {
    let repo = RacingRepo::interfering_once(PlaceUpdate::PushUserAccess(UserAccess {
        user_name: "bob".to_owned(),
        level: UserAccessLevel::View,
    }));
    let (short_id, _) = seed_place(&repo).await;
    let module = module_over(repo);
    let api = module.places_api();

    api.add_user_access(&short_id, "alice", UserAccessLevel::View)
        .await
        .unwrap();

    let place = api.get_place(&short_id).await.unwrap();
    assert!(place.user_access("alice").is_some());
    assert!(place.user_access("bob").is_some());
    assert_eq!(place.version, 2);
}

#[tokio::test]
async fn test_endless_interference_exhausts_attempts() {
    let repo = RacingRepo::always_interfering();
    let (short_id, grid_id) = seed_place(&repo).await;
    let module = module_over(repo.clone());
    let api = module.places_api();

    let err = api
        .add_block(&short_id, NewBlock::new(grid_id, Rect::new(0, 0, 1, 1), "x"))
        .await
        .unwrap_err();
    assert_eq!(err, PlacesError::Internal);
    assert_eq!(
        repo.bumps.load(Ordering::SeqCst),
        PlacesConfig::default().max_write_attempts
    );

    let err = api
        .assign_groups(&short_id, Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err, PlacesError::Internal);

    let place = api.get_place(&short_id).await.unwrap();
    assert!(place.grid(grid_id).unwrap().blocks.is_empty());
}

#[tokio::test]
async fn test_create_place_is_unaffected_by_interference() {
    let repo = RacingRepo::always_interfering();
    let module = module_over(repo);
    let api = module.places_api();

    let short_id = api
        .create_place(NewPlace::new("owner", "Office", ""))
        .await
        .unwrap();
    assert!(api.get_place(&short_id).await.is_ok());
}
