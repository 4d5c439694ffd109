//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//!
//! Field names are camelCase on the wire.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreateOfferRequest, CreateUserRequest, LimitQuery, LocationPayload,
    LoginRequest, UpdateOfferRequest,
};

pub use responses::{
    AvatarResponse, CommentResponse, HealthChecks, HealthResponse, LoginResponse,
    OfferImagesResponse, OfferPreviewResponse, OfferResponse, PreviewImageResponse,
    ReadinessResponse, UserResponse,
};

pub use mappers::{CommentWithAuthor, OfferWithAuthor};
