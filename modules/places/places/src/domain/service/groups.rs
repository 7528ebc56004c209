//! The per-owner ordered group list.

use std::sync::Arc;

use places_sdk::Group;
use tracing::{debug, info};
use uuid::Uuid;

use super::{check_length, require_non_empty};
use crate::config::PlacesConfig;
use crate::domain::error::DomainError;
use crate::domain::ordering::next_order;
use crate::domain::repo::GroupsRepository;

pub struct GroupsService {
    repo: Arc<dyn GroupsRepository>,
    config: PlacesConfig,
}

impl GroupsService {
    pub fn new(repo: Arc<dyn GroupsRepository>, config: PlacesConfig) -> Self {
        Self { repo, config }
    }

    /// Append a group after the owner's last non-deleted group.
    pub async fn create_group(&self, owner_id: &str, name: &str) -> Result<Group, DomainError> {
        require_non_empty("ownerId", owner_id)?;
        require_non_empty("name", name)?;
        check_length("name", name, self.config.max_name_length)?;

        let group = self.repo.insert_appended(owner_id, name).await?;
        info!(group_id = %group.group_id, owner_id, order = group.order, "Created group");
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Group, DomainError> {
        self.repo
            .find_active(group_id)
            .await?
            .ok_or_else(|| DomainError::group_not_found(group_id))
    }

    pub async fn list_groups(&self, owner_id: &str) -> Result<Vec<Group>, DomainError> {
        Ok(self.repo.list_active(owner_id).await?)
    }

    pub async fn rename_group(&self, group_id: Uuid, name: &str) -> Result<bool, DomainError> {
        require_non_empty("name", name)?;
        check_length("name", name, self.config.max_name_length)?;

        let found = self.repo.set_name(group_id, name).await?;
        if found {
            info!(%group_id, "Renamed group");
        }
        Ok(found)
    }

    /// Move a group to `new_order`, which may be at most one past the owner's last order.
    ///
    /// Every non-deleted group of the owner at or after `new_order` (the moving one
    /// included) is shifted by one, then the group is pinned to `new_order`. The two writes
    /// are not atomic; `normalize_group_orders` repairs a list left half-way.
    pub async fn reorder_group(&self, group_id: Uuid, new_order: i64) -> Result<bool, DomainError> {
        if new_order < 1 {
            return Err(DomainError::validation("order", "must be at least 1"));
        }

        let Some(group) = self.repo.find_active(group_id).await? else {
            debug!(%group_id, "reorder of missing or deleted group");
            return Ok(false);
        };

        let siblings = self.repo.list_active(&group.owner_id).await?;
        let Some(last_slot) = next_order(siblings.iter().map(|g| g.order)) else {
            return Err(DomainError::persistence_inconsistency("reorder_group"));
        };
        if new_order > last_slot {
            return Err(DomainError::validation(
                "order",
                format!("must be at most {last_slot}"),
            ));
        }

        let shifted = self.repo.shift_orders_from(&group.owner_id, new_order).await?;
        if !self.repo.set_order(group_id, new_order).await? {
            return Err(DomainError::persistence_inconsistency("reorder_group"));
        }

        info!(%group_id, from = group.order, to = new_order, shifted, "Reordered group");
        Ok(true)
    }

    /// Soft-delete a group. Matches deleted groups too, so repeating the call keeps
    /// returning `true`.
    pub async fn delete_group(&self, group_id: Uuid) -> Result<bool, DomainError> {
        let matched = self.repo.mark_deleted(group_id).await?;
        if matched > 0 {
            info!(%group_id, "Deleted group");
        }
        Ok(matched > 0)
    }

    /// Renumber the owner's non-deleted groups to `1..n` in their current order.
    pub async fn normalize_group_orders(&self, owner_id: &str) -> Result<Vec<Group>, DomainError> {
        let groups = self.repo.list_active(owner_id).await?;
        let mut normalized = Vec::with_capacity(groups.len());
        let mut next = 1;

        for mut group in groups {
            if group.order != next {
                if !self.repo.set_order(group.group_id, next).await? {
                    debug!(group_id = %group.group_id, "group deleted during normalization");
                    continue;
                }
                group.order = next;
            }
            normalized.push(group);
            next += 1;
        }

        info!(owner_id, count = normalized.len(), "Normalized group orders");
        Ok(normalized)
    }
}
