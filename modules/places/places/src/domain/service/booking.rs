//! Reservations of blocks.

use places_sdk::{NewReservation, Reservation};
use tracing::{debug, info};
use uuid::Uuid;

use super::{PlacesService, expect_matched};
use crate::domain::booking::find_reservation_conflict;
use crate::domain::error::DomainError;
use crate::domain::repo::{PlaceFilter, PlaceUpdate};

impl PlacesService {
    /// Book a block for `[start_time, end_time)` unless it overlaps a reservation of the
    /// same block. The block itself is not looked up.
    pub async fn add_reservation(
        &self,
        short_id: &str,
        new_reservation: NewReservation,
    ) -> Result<Uuid, DomainError> {
        if new_reservation.start_time >= new_reservation.end_time {
            return Err(DomainError::validation(
                "endTime",
                "must be later than startTime",
            ));
        }

        let reservation = Reservation {
            reservation_id: Uuid::now_v7(),
            grid_id: new_reservation.grid_id,
            block_id: new_reservation.block_id,
            start_time: new_reservation.start_time,
            end_time: new_reservation.end_time,
        };

        for attempt in 1..=self.config.write_attempts() {
            let place = self.load(short_id).await?;
            if let Some(existing) = find_reservation_conflict(
                &place.reservations,
                reservation.block_id,
                reservation.start_time,
                reservation.end_time,
            ) {
                debug!(short_id, %existing, "reservation overlaps an existing one");
                return Err(DomainError::ReservationOverlap {
                    reservation_id: existing,
                });
            }

            let outcome = self
                .repo
                .update_one(
                    &PlaceFilter::by_short_id(short_id).at_version(place.version),
                    PlaceUpdate::PushReservation(reservation.clone()),
                )
                .await?;
            if outcome.is_matched() {
                info!(
                    short_id,
                    reservation_id = %reservation.reservation_id,
                    block_id = %reservation.block_id,
                    "Added reservation"
                );
                return Ok(reservation.reservation_id);
            }
            debug!(attempt, short_id, "place changed concurrently, retrying reservation");
        }

        Err(self.exhausted("add_reservation", short_id))
    }

    pub async fn delete_reservation(
        &self,
        short_id: &str,
        reservation_id: Uuid,
    ) -> Result<(), DomainError> {
        let place = self.load(short_id).await?;
        if !place
            .reservations
            .iter()
            .any(|r| r.reservation_id == reservation_id)
        {
            return Err(DomainError::reservation_not_found(reservation_id));
        }

        let outcome = self
            .repo
            .update_one(
                &PlaceFilter::by_short_id(short_id),
                PlaceUpdate::PullReservation { reservation_id },
            )
            .await?;
        expect_matched(outcome, "delete_reservation")?;
        info!(short_id, %reservation_id, "Deleted reservation");
        Ok(())
    }
}
