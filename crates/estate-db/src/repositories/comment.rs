//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use estate_core::traits::{CommentRepository, RepoResult};
use estate_core::{Comment, DomainError, ObjectId};

use crate::mappers::CommentInsert;
use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let row = CommentInsert::new(comment);

        sqlx::query(
            r"
            INSERT INTO comments (id, text, rating, offer_id, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(row.id)
        .bind(row.text)
        .bind(row.rating)
        .bind(row.offer_id)
        .bind(row.author_id)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let violated = e
                .as_database_error()
                .filter(|db_err| db_err.is_foreign_key_violation())
                .and_then(|db_err| db_err.constraint().map(str::to_owned));
            match violated.as_deref() {
                Some("comments_offer_id_fkey") => DomainError::OfferNotFound(comment.offer_id),
                Some("comments_author_id_fkey") => DomainError::UserNotFound(comment.author_id),
                _ => map_db_error(e),
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_offer_id(&self, offer_id: ObjectId, limit: i64) -> RepoResult<Vec<Comment>> {
        let models = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, text, rating, offer_id, author_id, created_at
            FROM comments
            WHERE offer_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(offer_id.to_hex())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Comment::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete_by_offer_id(&self, offer_id: ObjectId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE offer_id = $1")
            .bind(offer_id.to_hex())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
