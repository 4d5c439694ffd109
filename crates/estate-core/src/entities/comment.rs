//! Comment entity - a review left on an offer

use chrono::{DateTime, Utc};

use crate::value_objects::ObjectId;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: ObjectId,
    pub text: String,
    pub rating: u8,
    pub offer_id: ObjectId,
    pub author_id: ObjectId,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(
        id: ObjectId,
        offer_id: ObjectId,
        author_id: ObjectId,
        text: String,
        rating: u8,
    ) -> Self {
        Self {
            id,
            text,
            rating,
            offer_id,
            author_id,
            created_at: Utc::now(),
        }
    }

    /// Check whether the comment belongs to `offer_id`
    #[inline]
    pub fn is_about(&self, offer_id: ObjectId) -> bool {
        self.offer_id == offer_id
    }
}
