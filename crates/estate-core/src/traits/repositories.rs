//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;

use crate::entities::{Comment, Offer, User};
use crate::error::DomainError;
use crate::value_objects::{City, ObjectId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Offer Repository
// ============================================================================

#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Newest offers first
    async fn find(&self, limit: i64) -> RepoResult<Vec<Offer>>;

    /// Find offer by ID
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Offer>>;

    /// Newest premium offers in a city
    async fn find_premium(&self, city: City, limit: i64) -> RepoResult<Vec<Offer>>;

    /// Newest offers flagged as favorite
    async fn find_favorite(&self, limit: i64) -> RepoResult<Vec<Offer>>;

    /// Check whether an offer exists
    async fn exists(&self, id: ObjectId) -> RepoResult<bool>;

    /// Persist a new offer
    async fn create(&self, offer: &Offer) -> RepoResult<()>;

    /// Overwrite the mutable fields of an existing offer
    async fn update(&self, offer: &Offer) -> RepoResult<()>;

    /// Set or clear the favorite flag
    async fn set_favorite(&self, id: ObjectId, is_favorite: bool) -> RepoResult<()>;

    /// Recompute `comment_count` and `rating` from the stored comments
    async fn refresh_comment_stats(&self, id: ObjectId) -> RepoResult<()>;

    /// Delete an offer; returns false when nothing was deleted
    async fn delete(&self, id: ObjectId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Newest comments of an offer first
    async fn find_by_offer_id(&self, offer_id: ObjectId, limit: i64) -> RepoResult<Vec<Comment>>;

    /// Delete every comment of an offer, returning how many were removed
    async fn delete_by_offer_id(&self, offer_id: ObjectId) -> RepoResult<u64>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check whether a user exists
    async fn exists(&self, id: ObjectId) -> RepoResult<bool>;

    /// Create a new user; fails with `EmailAlreadyExists` on duplicate email
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update the avatar file name
    async fn update_avatar(&self, id: ObjectId, avatar: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: ObjectId) -> RepoResult<Option<String>>;
}
