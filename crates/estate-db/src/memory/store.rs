//! Shared state behind the in-memory repositories

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

use estate_core::{Comment, ObjectId, Offer, User};

/// A user row together with its password hash
#[derive(Debug, Clone)]
pub(crate) struct StoredUser {
    pub user: User,
    pub password_hash: String,
}

/// Tables of the in-memory backend
///
/// Comments live behind a single lock: creating a comment and deleting its
/// offer both take the write lock, so no comment can outlive its offer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) users: DashMap<ObjectId, StoredUser>,
    /// Email to user id, doubles as the unique index
    pub(crate) emails: DashMap<String, ObjectId>,
    pub(crate) offers: DashMap<ObjectId, Offer>,
    pub(crate) comments: RwLock<Vec<Comment>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}
