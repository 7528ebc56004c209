//! Block placement inside the grids of a place.

use places_sdk::{Block, NewBlock, Rect};
use tracing::{debug, info};
use uuid::Uuid;

use super::{PlacesService, check_length, expect_matched};
use crate::domain::error::DomainError;
use crate::domain::layout::find_block_conflict;
use crate::domain::repo::{PlaceFilter, PlaceUpdate};

fn validate_rect(rect: &Rect) -> Result<(), DomainError> {
    if rect.is_well_formed() {
        Ok(())
    } else {
        Err(DomainError::validation(
            "rect",
            format!(
                "left top ({}, {}) must be above and left of right bottom ({}, {})",
                rect.left_top_x, rect.left_top_y, rect.right_bottom_x, rect.right_bottom_y
            ),
        ))
    }
}

impl PlacesService {
    /// Add a block to a grid unless it overlaps an existing one.
    pub async fn add_block(&self, short_id: &str, new_block: NewBlock) -> Result<Uuid, DomainError> {
        validate_rect(&new_block.rect)?;
        check_length("name", &new_block.name, self.config.max_name_length)?;

        let grid_id = new_block.grid_id;
        let block = Block {
            block_id: Uuid::now_v7(),
            rect: new_block.rect,
            name: new_block.name,
            color: new_block
                .color
                .unwrap_or_else(|| self.config.default_block_color.clone()),
        };

        for attempt in 1..=self.config.write_attempts() {
            let place = self.load(short_id).await?;
            let grid = place
                .grid(grid_id)
                .ok_or_else(|| DomainError::grid_not_found(grid_id))?;
            if let Some(existing) = find_block_conflict(grid, &block.rect, None) {
                debug!(short_id, %existing, "block overlaps an existing block");
                return Err(DomainError::BlockOverlap { block_id: existing });
            }

            let outcome = self
                .repo
                .update_one(
                    &PlaceFilter::by_short_id(short_id).at_version(place.version),
                    PlaceUpdate::PushBlock {
                        grid_id,
                        block: block.clone(),
                    },
                )
                .await?;
            if outcome.is_matched() {
                info!(short_id, %grid_id, block_id = %block.block_id, "Added block");
                return Ok(block.block_id);
            }
            debug!(attempt, short_id, "place changed concurrently, retrying block insert");
        }

        Err(self.exhausted("add_block", short_id))
    }

    /// Move or resize a block, checking it against every other block of the grid.
    pub async fn update_block_coordinates(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        rect: Rect,
    ) -> Result<(), DomainError> {
        validate_rect(&rect)?;

        for attempt in 1..=self.config.write_attempts() {
            let place = self.load(short_id).await?;
            let grid = place
                .grid(grid_id)
                .ok_or_else(|| DomainError::grid_not_found(grid_id))?;
            if grid.block(block_id).is_none() {
                return Err(DomainError::block_not_found(block_id));
            }
            if let Some(existing) = find_block_conflict(grid, &rect, Some(block_id)) {
                debug!(short_id, %block_id, %existing, "moved block would overlap");
                return Err(DomainError::BlockOverlap { block_id: existing });
            }

            let outcome = self
                .repo
                .update_one(
                    &PlaceFilter::by_short_id(short_id).at_version(place.version),
                    PlaceUpdate::SetBlockRect {
                        grid_id,
                        block_id,
                        rect,
                    },
                )
                .await?;
            if outcome.is_matched() {
                info!(short_id, %block_id, "Updated block coordinates");
                return Ok(());
            }
            debug!(attempt, short_id, "place changed concurrently, retrying block move");
        }

        Err(self.exhausted("update_block_coordinates", short_id))
    }

    pub async fn rename_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
        name: &str,
    ) -> Result<(), DomainError> {
        check_length("name", name, self.config.max_name_length)?;
        self.ensure_block(short_id, grid_id, block_id).await?;

        let outcome = self
            .repo
            .update_one(
                &PlaceFilter::by_short_id(short_id),
                PlaceUpdate::SetBlockName {
                    grid_id,
                    block_id,
                    name: name.to_owned(),
                },
            )
            .await?;
        expect_matched(outcome, "rename_block")?;
        info!(short_id, %block_id, "Renamed block");
        Ok(())
    }

    /// Remove a block. Reservations that reference it are left untouched.
    pub async fn delete_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
    ) -> Result<(), DomainError> {
        self.ensure_block(short_id, grid_id, block_id).await?;

        let outcome = self
            .repo
            .update_one(
                &PlaceFilter::by_short_id(short_id),
                PlaceUpdate::PullBlock { grid_id, block_id },
            )
            .await?;
        expect_matched(outcome, "delete_block")?;
        info!(short_id, %block_id, "Deleted block");
        Ok(())
    }

    async fn ensure_block(
        &self,
        short_id: &str,
        grid_id: Uuid,
        block_id: Uuid,
    ) -> Result<(), DomainError> {
        let place = self.load(short_id).await?;
        let grid = place
            .grid(grid_id)
            .ok_or_else(|| DomainError::grid_not_found(grid_id))?;
        if grid.block(block_id).is_none() {
            return Err(DomainError::block_not_found(block_id));
        }
        Ok(())
    }
}
