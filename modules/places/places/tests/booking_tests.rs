#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for reservations

mod common;

use common::{create_module, create_place};
use places::domain::booking::intervals_overlap;
use places::{EntityKind, NewBlock, NewReservation, PlacesError, Rect};
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

fn booking(grid_id: Uuid, block_id: Uuid, start: OffsetDateTime, end: OffsetDateTime) -> NewReservation {
    NewReservation {
        grid_id,
        block_id,
        start_time: start,
        end_time: end,
    }
}

#[tokio::test]
async fn test_overlapping_reservation_conflicts_back_to_back_is_allowed() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let block_id = api
        .add_block(&short_id, NewBlock::new(grid_id, Rect::new(0, 0, 2, 2), "Desk"))
        .await
        .unwrap();

    let first = api
        .add_reservation(
            &short_id,
            booking(
                grid_id,
                block_id,
                datetime!(2025-12-10 10:00 UTC),
                datetime!(2025-12-10 12:00 UTC),
            ),
        )
        .await
        .unwrap();

    let err = api
        .add_reservation(
            &short_id,
            booking(
                grid_id,
                block_id,
                datetime!(2025-12-10 11:00 UTC),
                datetime!(2025-12-10 13:00 UTC),
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PlacesError::conflict(EntityKind::Reservation, first.to_string())
    );

    api.add_reservation(
        &short_id,
        booking(
            grid_id,
            block_id,
            datetime!(2025-12-10 12:00 UTC),
            datetime!(2025-12-10 13:00 UTC),
        ),
    )
    .await
    .unwrap();

    let layout = api.get_place_layout(&short_id).await.unwrap();
    assert_eq!(layout.reservations.len(), 2);
}

#[tokio::test]
async fn test_same_interval_on_other_block_is_allowed() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    let start = datetime!(2025-12-10 10:00 UTC);
    let end = datetime!(2025-12-10 12:00 UTC);

    api.add_reservation(&short_id, booking(grid_id, a, start, end))
        .await
        .unwrap();
    api.add_reservation(&short_id, booking(grid_id, b, start, end))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_or_inverted_interval_is_rejected() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let at = datetime!(2025-12-10 10:00 UTC);

    for (start, end) in [(at, at), (at, datetime!(2025-12-10 09:00 UTC))] {
        let err = api
            .add_reservation(&short_id, booking(grid_id, Uuid::now_v7(), start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, PlacesError::Validation { ref field, .. } if field == "endTime"));
    }
}

#[tokio::test]
async fn test_delete_reservation_frees_the_slot() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let block_id = Uuid::now_v7();
    let start = datetime!(2025-12-10 10:00 UTC);
    let end = datetime!(2025-12-10 12:00 UTC);

    let id = api
        .add_reservation(&short_id, booking(grid_id, block_id, start, end))
        .await
        .unwrap();
    api.delete_reservation(&short_id, id).await.unwrap();

    let err = api.delete_reservation(&short_id, id).await.unwrap_err();
    assert_eq!(
        err,
        PlacesError::not_found(EntityKind::Reservation, id.to_string())
    );

    api.add_reservation(&short_id, booking(grid_id, block_id, start, end))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_block_keeps_its_reservations() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let block_id = api
        .add_block(&short_id, NewBlock::new(grid_id, Rect::new(0, 0, 2, 2), "Desk"))
        .await
        .unwrap();
    api.add_reservation(
        &short_id,
        booking(
            grid_id,
            block_id,
            datetime!(2025-12-10 10:00 UTC),
            datetime!(2025-12-10 12:00 UTC),
        ),
    )
    .await
    .unwrap();

    api.delete_block(&short_id, grid_id, block_id).await.unwrap();

    let layout = api.get_place_layout(&short_id).await.unwrap();
    assert_eq!(layout.reservations.len(), 1);
    assert_eq!(layout.reservations[0].block_id, block_id);
}

#[tokio::test]
async fn test_no_two_reservations_overlap_after_sequence() {
    let module = create_module();
    let api = module.places_api();
    let (short_id, grid_id) = create_place(api.as_ref(), "owner").await;
    let block_id = Uuid::now_v7();
    let base = datetime!(2025-12-10 00:00 UTC);

    for (start_h, end_h) in [(8, 10), (9, 11), (10, 12), (11, 13), (12, 14), (7, 8), (13, 15)] {
        let _ = api
            .add_reservation(
                &short_id,
                booking(
                    grid_id,
                    block_id,
                    base + time::Duration::hours(start_h),
                    base + time::Duration::hours(end_h),
                ),
            )
            .await;
    }

    let layout = api.get_place_layout(&short_id).await.unwrap();
    let rs = &layout.reservations;
    assert_eq!(rs.len(), 4);
    for (i, a) in rs.iter().enumerate() {
        for b in &rs[i + 1..] {
            assert!(!intervals_overlap(a.start_time, a.end_time, b.start_time, b.end_time));
        }
    }
}
