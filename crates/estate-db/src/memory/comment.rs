//! In-memory implementation of CommentRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use estate_core::traits::{CommentRepository, RepoResult};
use estate_core::{Comment, DomainError, ObjectId};

use super::{take_count, MemoryStore};

/// In-memory implementation of CommentRepository
#[derive(Clone)]
pub struct MemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut comments = self.store.comments.write();
        if !self.store.offers.contains_key(&comment.offer_id) {
            return Err(DomainError::OfferNotFound(comment.offer_id));
        }
        if !self.store.users.contains_key(&comment.author_id) {
            return Err(DomainError::UserNotFound(comment.author_id));
        }
        comments.push(comment.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_offer_id(&self, offer_id: ObjectId, limit: i64) -> RepoResult<Vec<Comment>> {
        let mut found: Vec<Comment> = self
            .store
            .comments
            .read()
            .iter()
            .filter(|comment| comment.is_about(offer_id))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        found.truncate(take_count(limit));
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn delete_by_offer_id(&self, offer_id: ObjectId) -> RepoResult<u64> {
        let mut comments = self.store.comments.write();
        let before = comments.len();
        comments.retain(|comment| !comment.is_about(offer_id));
        Ok((before - comments.len()) as u64)
    }
}
