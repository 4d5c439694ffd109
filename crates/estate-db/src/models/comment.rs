//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: String,
    pub text: String,
    pub rating: i16,
    pub offer_id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}
