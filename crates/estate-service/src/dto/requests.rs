//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use estate_core::{City, Goods, HousingType, Location, OfferDraft, OfferPatch, UserType};

// ============================================================================
// Offer Requests
// ============================================================================

/// Map coordinates of an offer
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LocationPayload {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}

impl From<LocationPayload> for Location {
    fn from(payload: LocationPayload) -> Self {
        Location::new(payload.latitude, payload.longitude)
    }
}

/// Create offer request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[validate(length(min = 10, max = 100, message = "Title must be 10-100 characters"))]
    pub title: String,

    #[validate(length(min = 20, max = 1024, message = "Description must be 20-1024 characters"))]
    pub description: String,

    pub city: City,

    #[validate(length(min = 1, message = "Preview image is required"))]
    pub preview_image: String,

    #[validate(length(equal = 6, message = "Exactly 6 images are required"))]
    pub images: Vec<String>,

    pub is_premium: bool,

    #[serde(rename = "type")]
    pub housing_type: HousingType,

    #[validate(range(min = 1, max = 8, message = "Rooms must be between 1 and 8"))]
    pub rooms: i32,

    #[validate(range(min = 1, max = 10, message = "Guests must be between 1 and 10"))]
    pub guests: i32,

    #[validate(range(min = 100, max = 100_000, message = "Price must be between 100 and 100000"))]
    pub price: i32,

    #[validate(length(min = 1, message = "At least one good is required"))]
    pub goods: Vec<Goods>,

    #[validate(nested)]
    pub location: LocationPayload,
}

impl From<CreateOfferRequest> for OfferDraft {
    fn from(request: CreateOfferRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            city: request.city,
            preview_image: request.preview_image,
            images: request.images,
            is_premium: request.is_premium,
            housing_type: request.housing_type,
            rooms: request.rooms,
            guests: request.guests,
            price: request.price,
            goods: request.goods,
            location: request.location.into(),
        }
    }
}

/// Partial offer update; omitted fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    #[validate(length(min = 10, max = 100, message = "Title must be 10-100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 20, max = 1024, message = "Description must be 20-1024 characters"))]
    pub description: Option<String>,

    pub city: Option<City>,

    #[validate(length(min = 1, message = "Preview image must not be empty"))]
    pub preview_image: Option<String>,

    #[validate(length(equal = 6, message = "Exactly 6 images are required"))]
    pub images: Option<Vec<String>>,

    pub is_premium: Option<bool>,

    #[serde(rename = "type")]
    pub housing_type: Option<HousingType>,

    #[validate(range(min = 1, max = 8, message = "Rooms must be between 1 and 8"))]
    pub rooms: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "Guests must be between 1 and 10"))]
    pub guests: Option<i32>,

    #[validate(range(min = 100, max = 100_000, message = "Price must be between 100 and 100000"))]
    pub price: Option<i32>,

    #[validate(length(min = 1, message = "At least one good is required"))]
    pub goods: Option<Vec<Goods>>,

    #[validate(nested)]
    pub location: Option<LocationPayload>,
}

impl From<UpdateOfferRequest> for OfferPatch {
    fn from(request: UpdateOfferRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            city: request.city,
            preview_image: request.preview_image,
            images: request.images,
            is_premium: request.is_premium,
            housing_type: request.housing_type,
            rooms: request.rooms,
            guests: request.guests,
            price: request.price,
            goods: request.goods,
            location: request.location.map(Location::from),
        }
    }
}

/// `?limit=` query accepted by list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 5, max = 1024, message = "Comment must be 5-1024 characters"))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
}

// ============================================================================
// User Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 15, message = "Name must be 1-15 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 12, message = "Password must be 6-12 characters"))]
    pub password: String,

    #[serde(rename = "type", default)]
    pub user_type: UserType,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
