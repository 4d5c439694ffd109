//! Comment entity <-> model mapper

use estate_core::{Comment, DomainError};

use crate::models::CommentModel;

use super::parse_id;

/// Convert CommentModel to Comment entity
impl TryFrom<CommentModel> for Comment {
    type Error = DomainError;

    fn try_from(model: CommentModel) -> Result<Self, Self::Error> {
        let rating = u8::try_from(model.rating).map_err(|_| {
            DomainError::DatabaseError(format!("corrupt comments.rating value {}", model.rating))
        })?;

        Ok(Comment {
            id: parse_id("comments.id", &model.id)?,
            text: model.text,
            rating,
            offer_id: parse_id("comments.offer_id", &model.offer_id)?,
            author_id: parse_id("comments.author_id", &model.author_id)?,
            created_at: model.created_at,
        })
    }
}

/// Comment entity values for database insertion
pub struct CommentInsert<'a> {
    pub id: String,
    pub text: &'a str,
    pub rating: i16,
    pub offer_id: String,
    pub author_id: String,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.to_hex(),
            text: &comment.text,
            rating: i16::from(comment.rating),
            offer_id: comment.offer_id.to_hex(),
            author_id: comment.author_id.to_hex(),
        }
    }
}
