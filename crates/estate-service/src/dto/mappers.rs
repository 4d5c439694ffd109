//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use estate_core::{Comment, Offer, User};

use super::responses::{CommentResponse, OfferPreviewResponse, OfferResponse, UserResponse};

/// Offer joined with its author, as returned by the detail endpoint
#[derive(Debug, Clone)]
pub struct OfferWithAuthor {
    pub offer: Offer,
    pub author: Option<User>,
}

/// Comment joined with its author
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            user_type: user.user_type,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Offer Mappers
// ============================================================================

impl From<&Offer> for OfferPreviewResponse {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.to_hex(),
            title: offer.title.clone(),
            post_date: offer.created_at,
            city: offer.city,
            preview_image: offer.preview_image.clone(),
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            rating: offer.rating,
            housing_type: offer.housing_type,
            price: offer.price,
            comment_count: offer.comment_count,
            location: offer.location,
        }
    }
}

impl From<&Offer> for OfferResponse {
    fn from(offer: &Offer) -> Self {
        Self {
            id: offer.id.to_hex(),
            title: offer.title.clone(),
            description: offer.description.clone(),
            post_date: offer.created_at,
            city: offer.city,
            preview_image: offer.preview_image.clone(),
            images: offer.images.clone(),
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            rating: offer.rating,
            housing_type: offer.housing_type,
            rooms: offer.rooms,
            guests: offer.guests,
            price: offer.price,
            goods: offer.goods.clone(),
            author_id: offer.author_id.to_hex(),
            author: None,
            comment_count: offer.comment_count,
            location: offer.location,
        }
    }
}

impl From<&OfferWithAuthor> for OfferResponse {
    fn from(details: &OfferWithAuthor) -> Self {
        Self {
            author: details.author.as_ref().map(UserResponse::from),
            ..Self::from(&details.offer)
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_hex(),
            text: comment.text.clone(),
            rating: comment.rating,
            post_date: comment.created_at,
            offer_id: comment.offer_id.to_hex(),
            author: None,
        }
    }
}

impl From<&CommentWithAuthor> for CommentResponse {
    fn from(details: &CommentWithAuthor) -> Self {
        Self {
            author: details.author.as_ref().map(UserResponse::from),
            ..Self::from(&details.comment)
        }
    }
}
