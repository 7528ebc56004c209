//! In-memory store for the per-owner group lists.

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::RwLock;
use places_sdk::Group;
use uuid::Uuid;

use crate::domain::ordering::{is_shifted_by, next_order};
use crate::domain::repo::GroupsRepository;

#[derive(Default)]
pub struct InMemoryGroupsRepository {
    groups: RwLock<Vec<Group>>,
}

impl InMemoryGroupsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupsRepository for InMemoryGroupsRepository {
    async fn insert_appended(&self, owner_id: &str, name: &str) -> anyhow::Result<Group> {
        let mut groups = self.groups.write();
        let Some(order) = next_order(
            groups
                .iter()
                .filter(|g| g.owner_id == owner_id && !g.is_deleted)
                .map(|g| g.order),
        ) else {
            bail!("no order left after the last group of owner {owner_id}");
        };
        let group = Group {
            group_id: Uuid::now_v7(),
            owner_id: owner_id.to_owned(),
            name: name.to_owned(),
            order,
            is_deleted: false,
        };
        groups.push(group.clone());
        Ok(group)
    }

    async fn find_active(&self, group_id: Uuid) -> anyhow::Result<Option<Group>> {
        Ok(self
            .groups
            .read()
            .iter()
            .find(|g| g.group_id == group_id && !g.is_deleted)
            .cloned())
    }

    async fn list_active(&self, owner_id: &str) -> anyhow::Result<Vec<Group>> {
        let mut groups: Vec<Group> = self
            .groups
            .read()
            .iter()
            .filter(|g| g.owner_id == owner_id && !g.is_deleted)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.order);
        Ok(groups)
    }

    async fn shift_orders_from(&self, owner_id: &str, from: i64) -> anyhow::Result<u64> {
        let mut groups = self.groups.write();
        let affected =
            |g: &Group| g.owner_id == owner_id && !g.is_deleted && is_shifted_by(g.order, from);
        if groups.iter().any(|g| affected(g) && g.order == i64::MAX) {
            bail!("cannot shift past the last order for owner {owner_id}");
        }

        let mut shifted = 0;
        for group in groups.iter_mut() {
            if affected(group) {
                group.order += 1;
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    async fn set_order(&self, group_id: Uuid, order: i64) -> anyhow::Result<bool> {
        let mut groups = self.groups.write();
        match groups
            .iter_mut()
            .find(|g| g.group_id == group_id && !g.is_deleted)
        {
            Some(group) => {
                group.order = order;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_name(&self, group_id: Uuid, name: &str) -> anyhow::Result<bool> {
        let mut groups = self.groups.write();
        match groups
            .iter_mut()
            .find(|g| g.group_id == group_id && !g.is_deleted)
        {
            Some(group) => {
                name.clone_into(&mut group.name);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_deleted(&self, group_id: Uuid) -> anyhow::Result<u64> {
        let mut groups = self.groups.write();
        let mut matched = 0;
        for group in groups.iter_mut().filter(|g| g.group_id == group_id) {
            group.is_deleted = true;
            matched += 1;
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_is_scoped_per_owner() {
        let repo = InMemoryGroupsRepository::new();
        let a1 = repo.insert_appended("u1", "Work").await.unwrap();
        let a2 = repo.insert_appended("u1", "Home").await.unwrap();
        let b1 = repo.insert_appended("u2", "Gym").await.unwrap();

        assert_eq!(a1.order, 1);
        assert_eq!(a2.order, 2);
        assert_eq!(b1.order, 1);
    }

    #[tokio::test]
    async fn test_append_ignores_deleted_groups() {
        let repo = InMemoryGroupsRepository::new();
        repo.insert_appended("u1", "Work").await.unwrap();
        let last = repo.insert_appended("u1", "Home").await.unwrap();
        repo.mark_deleted(last.group_id).await.unwrap();

        let next = repo.insert_appended("u1", "Gym").await.unwrap();
        assert_eq!(next.order, 2);
    }

    #[tokio::test]
    async fn test_shift_skips_deleted_and_other_owners() {
        let repo = InMemoryGroupsRepository::new();
        let a = repo.insert_appended("u1", "a").await.unwrap();
        let b = repo.insert_appended("u1", "b").await.unwrap();
        let c = repo.insert_appended("u1", "c").await.unwrap();
        let other = repo.insert_appended("u2", "x").await.unwrap();
        repo.mark_deleted(c.group_id).await.unwrap();

        let shifted = repo.shift_orders_from("u1", 2).await.unwrap();
        assert_eq!(shifted, 1);

        let listed = repo.list_active("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].group_id, a.group_id);
        assert_eq!(listed[0].order, 1);
        assert_eq!(listed[1].group_id, b.group_id);
        assert_eq!(listed[1].order, 3);

        let other = repo.find_active(other.group_id).await.unwrap().unwrap();
        assert_eq!(other.order, 1);
    }

    #[tokio::test]
    async fn test_mark_deleted_matches_already_deleted() {
        let repo = InMemoryGroupsRepository::new();
        let g = repo.insert_appended("u1", "a").await.unwrap();

        assert_eq!(repo.mark_deleted(g.group_id).await.unwrap(), 1);
        assert_eq!(repo.mark_deleted(g.group_id).await.unwrap(), 1);
        assert_eq!(repo.mark_deleted(Uuid::now_v7()).await.unwrap(), 0);
        assert!(repo.find_active(g.group_id).await.unwrap().is_none());
        assert!(!repo.set_name(g.group_id, "b").await.unwrap());
    }

    #[tokio::test]
    async fn test_shift_refuses_to_overflow_and_leaves_orders_alone() {
        let repo = InMemoryGroupsRepository::new();
        let a = repo.insert_appended("u1", "a").await.unwrap();
        let b = repo.insert_appended("u1", "b").await.unwrap();
        assert!(repo.set_order(b.group_id, i64::MAX).await.unwrap());

        assert!(repo.shift_orders_from("u1", 1).await.is_err());
        assert!(repo.insert_appended("u1", "c").await.is_err());

        let listed = repo.list_active("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].group_id, a.group_id);
        assert_eq!(listed[0].order, 1);
        assert_eq!(listed[1].order, i64::MAX);
    }
}
