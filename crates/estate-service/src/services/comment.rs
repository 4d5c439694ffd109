//! Comment service

use std::collections::HashMap;

use tracing::{info, instrument};

use estate_core::{Comment, ObjectId, User};

use crate::dto::{CommentWithAuthor, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::limits::{resolve_limit, DEFAULT_COMMENT_LIMIT};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Leave a comment on an offer
    ///
    /// The offer's counters are refreshed separately through
    /// `OfferService::register_comment`.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: ObjectId,
        offer_id: ObjectId,
        request: CreateCommentRequest,
    ) -> ServiceResult<Comment> {
        let comment = Comment::new(
            self.ctx.generate_id(),
            offer_id,
            author_id,
            request.text,
            request.rating,
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, offer_id = %offer_id, "Comment created");

        Ok(comment)
    }

    /// Newest comments of an offer
    #[instrument(skip(self))]
    pub async fn find_by_offer_id(
        &self,
        offer_id: ObjectId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<Comment>> {
        let limit = resolve_limit(limit, DEFAULT_COMMENT_LIMIT);
        Ok(self.ctx.comment_repo().find_by_offer_id(offer_id, limit).await?)
    }

    /// Newest comments of an offer with their authors resolved
    #[instrument(skip(self))]
    pub async fn find_with_authors(
        &self,
        offer_id: ObjectId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<CommentWithAuthor>> {
        let comments = self.find_by_offer_id(offer_id, limit).await?;

        let mut authors: HashMap<ObjectId, Option<User>> = HashMap::new();
        for comment in &comments {
            if !authors.contains_key(&comment.author_id) {
                let author = self.ctx.user_repo().find_by_id(comment.author_id).await?;
                authors.insert(comment.author_id, author);
            }
        }

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithAuthor {
                author: authors.get(&comment.author_id).cloned().flatten(),
                comment,
            })
            .collect())
    }

    /// Remove every comment of an offer, returning how many were deleted
    #[instrument(skip(self))]
    pub async fn delete_by_offer_id(&self, offer_id: ObjectId) -> ServiceResult<u64> {
        let deleted = self.ctx.comment_repo().delete_by_offer_id(offer_id).await?;
        info!(offer_id = %offer_id, deleted, "Comments deleted");
        Ok(deleted)
    }
}
