//! Route definitions
//!
//! Paths mirror the public REST surface; ids are 24-hex strings.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{comments, health, offers, users};
use crate::state::AppState;

/// Create the API router (health and static files are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().merge(offer_routes()).merge(user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Offer and comment routes
fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/offers", get(offers::index).post(offers::create))
        .route("/offers/favorite", get(offers::favorites))
        .route("/offers/premium/:city", get(offers::premium))
        .route(
            "/offers/:offerId",
            get(offers::show).patch(offers::update).delete(offers::delete),
        )
        .route(
            "/offers/:offerId/comments",
            get(comments::index).post(comments::create),
        )
        .route("/offers/:offerId/favorite/:status", put(offers::set_favorite))
        .route("/offers/:offerId/previewImage", post(offers::upload_preview_image))
        .route("/offers/:offerId/offerImages", post(offers::upload_images))
}

/// Account routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login).get(users::check))
        .route("/users/:userId/avatar", post(users::upload_avatar))
}
