//! Comment handlers

use axum::{extract::State, Json};
use estate_service::dto::{CommentResponse, CommentWithAuthor, CreateCommentRequest};
use estate_service::{CommentService, OfferService, UserService};

use crate::extractors::{AuthUser, Existing, Limit, OfferIdParam, ValidatedJson};
use crate::response::{origin, ApiResult, Created, WithOrigin};
use crate::state::AppState;

const ORIGIN: &str = origin::COMMENT_CONTROLLER;

/// Comments of an offer, newest first
///
/// GET /offers/:offerId/comments
pub async fn index(
    State(state): State<AppState>,
    offer: Existing<OfferIdParam>,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = CommentService::new(state.service_context())
        .find_with_authors(offer.id, limit)
        .await
        .origin(ORIGIN)?;

    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// Leave a comment and refresh the offer's rating
///
/// POST /offers/:offerId/comments
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    offer: Existing<OfferIdParam>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let ctx = state.service_context();

    let comment = CommentService::new(ctx)
        .create(auth.user_id, offer.id, request)
        .await
        .origin(ORIGIN)?;
    OfferService::new(ctx)
        .register_comment(offer.id)
        .await
        .origin(ORIGIN)?;

    let author = UserService::new(ctx)
        .find_by_id(auth.user_id)
        .await
        .origin(ORIGIN)?;

    Ok(Created(CommentResponse::from(&CommentWithAuthor {
        comment,
        author,
    })))
}
