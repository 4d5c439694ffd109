//! In-memory implementation of UserRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use tracing::instrument;

use estate_core::traits::{RepoResult, UserRepository};
use estate_core::{DomainError, ObjectId, User};

use super::store::StoredUser;
use super::MemoryStore;

/// In-memory implementation of UserRepository
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<User>> {
        Ok(self.store.users.get(&id).map(|entry| entry.user.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.store.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.store.users.contains_key(&id))
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        // Claiming the email first makes the uniqueness check atomic
        match self.store.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        self.store.users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_avatar(&self, id: ObjectId, avatar: &str) -> RepoResult<()> {
        let mut stored = self
            .store
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        stored.user.set_avatar(Some(avatar.to_string()));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: ObjectId) -> RepoResult<Option<String>> {
        Ok(self
            .store
            .users
            .get(&id)
            .map(|entry| entry.password_hash.clone()))
    }
}
