//! Offer entity - a rental listing

use chrono::{DateTime, Utc};

use crate::value_objects::{City, Goods, HousingType, Location, ObjectId};

/// Number of gallery images every offer carries
pub const OFFER_IMAGE_COUNT: usize = 6;

/// Offer entity
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: HousingType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<Goods>,
    pub author_id: ObjectId,
    pub comment_count: i32,
    pub location: Location,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the author when listing a new offer
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDraft {
    pub title: String,
    pub description: String,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub housing_type: HousingType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<Goods>,
    pub location: Location,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub city: Option<City>,
    pub preview_image: Option<String>,
    pub images: Option<Vec<String>>,
    pub is_premium: Option<bool>,
    pub housing_type: Option<HousingType>,
    pub rooms: Option<i32>,
    pub guests: Option<i32>,
    pub price: Option<i32>,
    pub goods: Option<Vec<Goods>>,
    pub location: Option<Location>,
}

impl Offer {
    /// Create a new offer owned by `author_id`
    pub fn new(id: ObjectId, author_id: ObjectId, draft: OfferDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            city: draft.city,
            preview_image: draft.preview_image,
            images: draft.images,
            is_premium: draft.is_premium,
            is_favorite: false,
            rating: 0.0,
            housing_type: draft.housing_type,
            rooms: draft.rooms,
            guests: draft.guests,
            price: draft.price,
            goods: draft.goods,
            author_id,
            comment_count: 0,
            location: draft.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `user_id` listed this offer
    #[inline]
    pub fn is_owned_by(&self, user_id: ObjectId) -> bool {
        self.author_id == user_id
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: OfferPatch) {
        let OfferPatch {
            title,
            description,
            city,
            preview_image,
            images,
            is_premium,
            housing_type,
            rooms,
            guests,
            price,
            goods,
            location,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(city) = city {
            self.city = city;
        }
        if let Some(preview_image) = preview_image {
            self.preview_image = preview_image;
        }
        if let Some(images) = images {
            self.images = images;
        }
        if let Some(is_premium) = is_premium {
            self.is_premium = is_premium;
        }
        if let Some(housing_type) = housing_type {
            self.housing_type = housing_type;
        }
        if let Some(rooms) = rooms {
            self.rooms = rooms;
        }
        if let Some(guests) = guests {
            self.guests = guests;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(goods) = goods {
            self.goods = goods;
        }
        if let Some(location) = location {
            self.location = location;
        }
        self.updated_at = Utc::now();
    }

    /// Recompute the comment counters from the full list of comment ratings
    pub fn set_comment_stats(&mut self, ratings: &[u8]) {
        self.comment_count = ratings.len() as i32;
        self.rating = average_rating(ratings);
    }
}

impl OfferPatch {
    /// Check whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Average rating rounded to one decimal place, 0 when there are no ratings
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    let average = f64::from(sum) / ratings.len() as f64;
    (average * 10.0).round() / 10.0
}
