//! In-memory user directory.

use async_trait::async_trait;
use parking_lot::RwLock;
use places_sdk::User;

use crate::domain::repo::UsersRepository;

#[derive(Default)]
pub struct InMemoryUsersRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_tg_id(&self, tg_id: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.tg_id == tg_id && !u.is_deleted)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.user_name == user_name && !u.is_deleted)
            .cloned())
    }

    async fn insert(&self, user: User) -> anyhow::Result<()> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.tg_id == user.tg_id && !u.is_deleted) {
            anyhow::bail!("user with tg id {} already exists", user.tg_id);
        }
        users.push(user);
        Ok(())
    }

    async fn set_user_name(&self, tg_id: &str, user_name: &str) -> anyhow::Result<bool> {
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.tg_id == tg_id && !u.is_deleted) {
            Some(user) => {
                user_name.clone_into(&mut user.user_name);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
