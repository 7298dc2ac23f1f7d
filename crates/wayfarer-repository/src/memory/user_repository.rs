//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use wayfarer_core::{Email, User, UserId, WayfarerError, WayfarerResult};

/// In-memory user repository with a unique email constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> WayfarerResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> WayfarerResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> WayfarerResult<bool> {
        Ok(self.users.read().values().any(|u| &u.email == email))
    }

    async fn save(&self, user: &User) -> WayfarerResult<User> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == user.email) {
            return Err(WayfarerError::conflict(format!(
                "Duplicate entry '{}' for key 'uq_users_email'",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}
