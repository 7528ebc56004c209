//! Temporal rules for reservations of a block.

use places_sdk::Reservation;
use time::OffsetDateTime;
use uuid::Uuid;

/// Half-open interval test: `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
#[must_use]
pub fn intervals_overlap(
    start_a: OffsetDateTime,
    end_a: OffsetDateTime,
    start_b: OffsetDateTime,
    end_b: OffsetDateTime,
) -> bool {
    start_a < end_b && start_b < end_a
}

/// Finds a reservation of `block_id` whose interval overlaps `[start, end)`.
#[must_use]
pub fn find_reservation_conflict(
    reservations: &[Reservation],
    block_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Option<Uuid> {
    reservations
        .iter()
        .filter(|r| r.block_id == block_id)
        .find(|r| intervals_overlap(r.start_time, r.end_time, start, end))
        .map(|r| r.reservation_id)
}
