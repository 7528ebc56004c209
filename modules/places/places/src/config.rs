//! Configuration for the places module.

use places_sdk::DEFAULT_PLACE_COLOR;
use serde::{Deserialize, Serialize};

/// Longest short id the generator is allowed to produce.
pub const MAX_SHORT_ID_LENGTH: usize = 32;

/// Configuration for the places module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PlacesConfig {
    /// Length of generated place short ids.
    pub short_id_length: usize,

    /// How many fresh short ids to try before giving up on a collision streak.
    pub short_id_max_attempts: u32,

    /// How many times a read-check-write cycle is attempted when the place
    /// changed between the read and the write.
    pub max_write_attempts: u32,

    /// Upper bound for place, block and group names.
    pub max_name_length: usize,

    /// Color assigned to blocks created without one.
    pub default_block_color: String,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            short_id_length: 4,
            short_id_max_attempts: 16,
            max_write_attempts: 5,
            max_name_length: 200,
            default_block_color: DEFAULT_PLACE_COLOR.to_owned(),
        }
    }
}

impl PlacesConfig {
    /// Checks the values that would make the services unusable.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.short_id_length == 0 || self.short_id_length > MAX_SHORT_ID_LENGTH {
            anyhow::bail!(
                "places.short_id_length must be between 1 and {MAX_SHORT_ID_LENGTH}, got {}",
                self.short_id_length
            );
        }
        if self.short_id_max_attempts == 0 {
            anyhow::bail!("places.short_id_max_attempts must be at least 1");
        }
        if self.max_write_attempts == 0 {
            anyhow::bail!("places.max_write_attempts must be at least 1");
        }
        if self.max_name_length == 0 {
            anyhow::bail!("places.max_name_length must be at least 1");
        }
        Ok(())
    }

    /// Attempts for optimistic writes, never less than one.
    #[must_use]
    pub fn write_attempts(&self) -> u32 {
        self.max_write_attempts.max(1)
    }
}
