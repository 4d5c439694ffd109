//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Ids are rendered
//! as hex strings and write-only fields such as the password hash never
//! appear here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use estate_core::{City, Goods, HousingType, Location, UserType};

// ============================================================================
// User Responses
// ============================================================================

/// Public user representation
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

/// Successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(token: String, expires_in: i64, user: UserResponse) -> Self {
        Self {
            token,
            expires_in,
            user,
        }
    }
}

// ============================================================================
// Offer Responses
// ============================================================================

/// Short offer shape used by list endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPreviewResponse {
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

/// Full offer shape with the author embedded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
    pub comment_count: i32,
    pub location: Location,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment with its author
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub text: String,
    pub rating: u8,
    pub post_date: DateTime<Utc>,
    pub offer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserResponse>,
}

// ============================================================================
// Upload Responses
// ============================================================================

/// Stored preview image
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewImageResponse {
    pub preview_image: String,
}

/// Stored gallery images
#[derive(Debug, Serialize)]
pub struct OfferImagesResponse {
    pub images: Vec<String>,
}

/// Stored avatar
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Liveness probe
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness probe
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
