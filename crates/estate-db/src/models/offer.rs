//! Offer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for offers table
#[derive(Debug, Clone, FromRow)]
pub struct OfferModel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: String,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<String>,
    pub author_id: String,
    pub comment_count: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
