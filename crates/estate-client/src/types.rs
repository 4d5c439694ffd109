//! Request and response shapes used by client actions
//!
//! Response types mirror the JSON the server sends. Input types are what a
//! caller fills in; they are adapted to the wire body before sending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use estate_core::{City, Goods, HousingType, Location, UserType};

// ============================================================================
// Responses
// ============================================================================

/// Public user data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Issued token and the account it belongs to
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Offer as listed on the main, premium and favorite pages
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub id: String,
    pub title: String,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub housing_type: HousingType,
    pub price: i32,
    pub comment_count: i32,
    pub location: Location,
}

/// Offer with every field and its author
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub housing_type: HousingType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<Goods>,
    pub author_id: String,
    #[serde(default)]
    pub author: Option<UserInfo>,
    pub comment_count: i32,
    pub location: Location,
}

/// Review left on an offer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInfo {
    pub id: String,
    pub text: String,
    pub rating: u8,
    pub post_date: DateTime<Utc>,
    pub offer_id: String,
    #[serde(default)]
    pub author: Option<UserInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PreviewImageBody {
    pub preview_image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferImagesBody {
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvatarBody {
    pub avatar: String,
}

// ============================================================================
// Inputs
// ============================================================================

/// An image to upload
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn png(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }

    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "image/jpeg".to_string(),
            bytes,
        }
    }
}

/// Offer as entered in the listing form
///
/// `preview_image` and `images` are names of already hosted images. Files
/// in `preview_upload` and `image_uploads` are sent after the offer exists
/// and replace those names.
#[derive(Debug, Clone)]
pub struct NewOffer {
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
    /// Map position; the city center when unset
    pub location: Option<Location>,
    pub preview_upload: Option<ImageFile>,
    pub image_uploads: Vec<ImageFile>,
}

/// Wire body of `POST /offers`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOfferBody<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub city: City,
    pub preview_image: &'a str,
    pub images: &'a [String],
    pub is_premium: bool,
    #[serde(rename = "type")]
    pub housing_type: HousingType,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<Goods>,
    pub location: Location,
}

impl<'a> From<&'a NewOffer> for CreateOfferBody<'a> {
    fn from(offer: &'a NewOffer) -> Self {
        let mut goods = Vec::with_capacity(offer.goods.len());
        for good in &offer.goods {
            if !goods.contains(good) {
                goods.push(*good);
            }
        }

        Self {
            title: offer.title.trim(),
            description: offer.description.trim(),
            city: offer.city,
            preview_image: &offer.preview_image,
            images: &offer.images,
            is_premium: offer.is_premium,
            housing_type: offer.housing_type,
            rooms: offer.rooms,
            guests: offer.guests,
            price: offer.price,
            goods,
            location: offer.location.unwrap_or_else(|| offer.city.center()),
        }
    }
}

/// Partial offer update; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub housing_type: Option<HousingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods: Option<Vec<Goods>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Review form
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub text: String,
    pub rating: u8,
}

/// Sign-up form
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub avatar: Option<ImageFile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl<'a> From<&'a NewUser> for RegisterBody<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: user.name.trim(),
            email: user.email.trim(),
            password: &user.password,
            user_type: user.user_type,
        }
    }
}

/// Login form
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
