//! Scripted walk through the places module over in-memory stores.

use anyhow::{Context, Result};
use places::PlacesModule;
use places::config::PlacesConfig;
use places_sdk::{
    AccessPlace, NewBlock, NewPlace, NewReservation, PlaceAccessField, Rect, UserAccessLevel,
};
use serde::Serialize;
use time::macros::datetime;
use tracing::{info, warn};

/// What the demo prints on stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub place: places_sdk::Place,
    pub groups: Vec<places_sdk::Group>,
    pub rejected: Vec<String>,
}

/// Create a place, lay out blocks, book one and collect the final documents.
///
/// # Errors
///
/// Fails if the module cannot be built or an operation expected to succeed fails.
pub async fn run_demo(config: PlacesConfig) -> Result<DemoReport> {
    let module = PlacesModule::in_memory(config)?;
    let places = module.places_api();
    let groups = module.groups_api();
    let users = module.users_api();
    let mut rejected = Vec::new();

    let owner = users.sync_user("1001", "owner").await?;
    users.sync_user("1002", "alice").await?;

    let short_id = places
        .create_place(NewPlace::new(&owner.tg_id, "Coworking", "Open space, 3rd floor"))
        .await?;
    let grid_id = places
        .get_place_layout(&short_id)
        .await?
        .grids
        .first()
        .map(|g| g.grid_id)
        .context("new place has no grid")?;
    info!(%short_id, %grid_id, "Demo place created");

    let window = places
        .add_block(
            &short_id,
            NewBlock::new(grid_id, Rect::new(0, 0, 10, 10), "Window desk"),
        )
        .await?;
    places
        .add_block(
            &short_id,
            NewBlock::new(grid_id, Rect::new(10, 0, 20, 10), "Corner desk").with_color("#4f7cac"),
        )
        .await?;
    if let Err(e) = places
        .add_block(&short_id, NewBlock::new(grid_id, Rect::new(5, 5, 15, 15), "Squeezed"))
        .await
    {
        warn!(error = %e, "Overlapping block rejected");
        rejected.push(e.to_string());
    }

    places
        .add_reservation(
            &short_id,
            NewReservation {
                grid_id,
                block_id: window,
                start_time: datetime!(2025-12-10 10:00 UTC),
                end_time: datetime!(2025-12-10 12:00 UTC),
            },
        )
        .await?;
    if let Err(e) = places
        .add_reservation(
            &short_id,
            NewReservation {
                grid_id,
                block_id: window,
                start_time: datetime!(2025-12-10 11:00 UTC),
                end_time: datetime!(2025-12-10 13:00 UTC),
            },
        )
        .await
    {
        warn!(error = %e, "Overlapping reservation rejected");
        rejected.push(e.to_string());
    }

    places
        .update_place_access(&short_id, PlaceAccessField::Reservable, AccessPlace::Some)
        .await?;
    places
        .add_user_access(&short_id, "alice", UserAccessLevel::View)
        .await?;
    users.sync_user("1002", "alice_w").await?;

    let work = groups.create_group(&owner.tg_id, "Work").await?;
    let weekend = groups.create_group(&owner.tg_id, "Weekend").await?;
    groups.reorder_group(weekend.group_id, 1).await?;
    let ordered = groups.normalize_group_orders(&owner.tg_id).await?;
    places.assign_groups(&short_id, vec![work.group_id]).await?;

    let place = places.get_place(&short_id).await?;
    info!(%short_id, version = place.version, "Demo finished");

    Ok(DemoReport {
        place,
        groups: ordered,
        rejected,
    })
}
