//! Spatial rules for blocks inside a grid.
//!
//! Rectangles are treated as half-open in both axes, so two blocks that only share an
//! edge do not overlap.

use places_sdk::{Grid, Rect};
use uuid::Uuid;

/// Returns `true` when the two rectangles share any interior area.
#[must_use]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let apart = a.right_bottom_x <= b.left_top_x
        || a.left_top_x >= b.right_bottom_x
        || a.right_bottom_y <= b.left_top_y
        || a.left_top_y >= b.right_bottom_y;
    !apart
}

/// Finds the first block of `grid` that `rect` would overlap.
///
/// `ignored` excludes one block by identity, used when a block is being moved.
#[must_use]
pub fn find_block_conflict(grid: &Grid, rect: &Rect, ignored: Option<Uuid>) -> Option<Uuid> {
    grid.blocks
        .iter()
        .filter(|existing| Some(existing.block_id) != ignored)
        .find(|existing| rects_overlap(rect, &existing.rect))
        .map(|existing| existing.block_id)
}
