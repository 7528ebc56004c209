//! Public models for the `places` module.
//!
//! These are the document shapes stored for a place and its embedded grids, blocks,
//! reservations and access grants, plus the per-user groups and the user directory.
//! Serialized field names follow the stored document layout (camelCase).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::PlacesError;

/// Color given to places and blocks that were created without one.
pub const DEFAULT_PLACE_COLOR: &str = "#8a7f8e";

/// Who may perform an action on a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPlace {
    All,
    Some,
    Nobody,
}

/// Selects one of the three place-wide access fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceAccessField {
    Visible,
    Editable,
    Reservable,
}

impl PlaceAccessField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Editable => "editable",
            Self::Reservable => "reservable",
        }
    }
}

impl fmt::Display for PlaceAccessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceAccessField {
    type Err = PlacesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Ok(Self::Visible),
            "editable" => Ok(Self::Editable),
            "reservable" => Ok(Self::Reservable),
            _ => Err(PlacesError::validation(
                "which",
                format!("unknown access selector '{s}' (expected visible, editable or reservable)"),
            )),
        }
    }
}

/// Access granted to a single named user on a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserAccessLevel {
    View,
    Editable,
}

/// Axis-aligned rectangle; X grows to the right, Y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub left_top_x: i32,
    pub left_top_y: i32,
    pub right_bottom_x: i32,
    pub right_bottom_y: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(left_top_x: i32, left_top_y: i32, right_bottom_x: i32, right_bottom_y: i32) -> Self {
        Self {
            left_top_x,
            left_top_y,
            right_bottom_x,
            right_bottom_y,
        }
    }

    /// A rectangle is well formed when it has a positive width and height.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.left_top_x < self.right_bottom_x && self.left_top_y < self.right_bottom_y
    }
}

/// A named, bookable region of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub block_id: Uuid,
    #[serde(flatten)]
    pub rect: Rect,
    pub name: String,
    pub color: String,
}

/// A 2-D coordinate space partitioned into non-overlapping blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub grid_id: Uuid,
    pub blocks: Vec<Block>,
}

impl Grid {
    #[must_use]
    pub fn block(&self, block_id: Uuid) -> Option<&Block> {
        self.blocks.iter().find(|b| b.block_id == block_id)
    }
}

/// A half-open time interval `[start_time, end_time)` during which a block is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub reservation_id: Uuid,
    pub grid_id: Uuid,
    pub block_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccess {
    pub user_name: String,
    pub level: UserAccessLevel,
}

/// The place aggregate. Grids, reservations and access grants are embedded and live
/// exactly as long as the place does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: Uuid,
    pub short_id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub visible: AccessPlace,
    pub editable: AccessPlace,
    pub reservable: AccessPlace,
    pub group_ids: Vec<Uuid>,
    pub user_accesses: Vec<UserAccess>,
    pub grids: Vec<Grid>,
    pub reservations: Vec<Reservation>,
    pub is_deleted: bool,
    /// Incremented by every write that modifies the document.
    pub version: u64,
}

impl Place {
    #[must_use]
    pub fn grid(&self, grid_id: Uuid) -> Option<&Grid> {
        self.grids.iter().find(|g| g.grid_id == grid_id)
    }

    #[must_use]
    pub fn user_access(&self, user_name: &str) -> Option<&UserAccess> {
        self.user_accesses.iter().find(|u| u.user_name == user_name)
    }

    #[must_use]
    pub fn access(&self, field: PlaceAccessField) -> AccessPlace {
        match field {
            PlaceAccessField::Visible => self.visible,
            PlaceAccessField::Editable => self.editable,
            PlaceAccessField::Reservable => self.reservable,
        }
    }

    pub fn access_mut(&mut self, field: PlaceAccessField) -> &mut AccessPlace {
        match field {
            PlaceAccessField::Visible => &mut self.visible,
            PlaceAccessField::Editable => &mut self.editable,
            PlaceAccessField::Reservable => &mut self.reservable,
        }
    }
}

/// Data for creating a new place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlace {
    pub owner_id: String,
    pub name: String,
    pub description: String,
}

impl NewPlace {
    pub fn new(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Data for adding a block to a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlock {
    pub grid_id: Uuid,
    pub rect: Rect,
    pub name: String,
    pub color: Option<String>,
}

impl NewBlock {
    pub fn new(grid_id: Uuid, rect: Rect, name: impl Into<String>) -> Self {
        Self {
            grid_id,
            rect,
            name: name.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Data for booking a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub grid_id: Uuid,
    pub block_id: Uuid,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
}

/// Place-wide access levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAccess {
    pub short_id: String,
    pub visible: AccessPlace,
    pub editable: AccessPlace,
    pub reservable: AccessPlace,
}

/// Place-wide access levels together with the per-user grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceUserAccess {
    pub place_id: Uuid,
    pub visible: AccessPlace,
    pub editable: AccessPlace,
    pub reservable: AccessPlace,
    pub user_accesses: Vec<UserAccess>,
}

/// Everything needed to draw and book a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceLayout {
    pub grids: Vec<Grid>,
    pub reservations: Vec<Reservation>,
}

/// A user-scoped, ordered tag used to categorize places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub order: i64,
    pub is_deleted: bool,
}

/// A registered user. `tg_id` is the external account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub tg_id: String,
    pub user_name: String,
    pub is_deleted: bool,
}
