//! Offer handlers
//!
//! Listing, detail, editing, favorites, and image uploads.

use axum::{extract::State, Json};
use estate_core::{ObjectId, OFFER_IMAGE_COUNT};
use estate_service::dto::{
    CreateOfferRequest, OfferImagesResponse, OfferPreviewResponse, OfferResponse,
    PreviewImageResponse, UpdateOfferRequest,
};
use estate_service::{CommentService, OfferService};
use tracing::info;

use crate::extractors::{
    AuthUser, CityParam, Existing, FavoriteStatus, Limit, OfferIdParam, OfferImagesField,
    OwnedOffer, PreviewImageField, UploadedFile, UploadedFiles, ValidatedJson,
};
use crate::response::{origin, ApiError, ApiResult, Created, NoContent, WithOrigin};
use crate::state::AppState;

const ORIGIN: &str = origin::OFFER_CONTROLLER;

fn previews(offers: &[estate_core::Offer]) -> Vec<OfferPreviewResponse> {
    offers.iter().map(OfferPreviewResponse::from).collect()
}

/// Offer with its author, as returned by the detail endpoints
async fn detail(service: &OfferService<'_>, id: ObjectId) -> ApiResult<OfferResponse> {
    let offer = service
        .find_with_author(id)
        .await
        .origin(ORIGIN)?
        .ok_or_else(|| {
            ApiError::not_found(format!("Offer with id {id} not found.")).with_origin(ORIGIN)
        })?;

    Ok(OfferResponse::from(&offer))
}

/// List offers, newest first
///
/// GET /offers
pub async fn index(
    State(state): State<AppState>,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<OfferPreviewResponse>>> {
    let offers = OfferService::new(state.service_context())
        .find(limit)
        .await
        .origin(ORIGIN)?;
    Ok(Json(previews(&offers)))
}

/// List a new offer
///
/// POST /offers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateOfferRequest>,
) -> ApiResult<Created<OfferResponse>> {
    let service = OfferService::new(state.service_context());
    let offer = service.create(auth.user_id, request).await.origin(ORIGIN)?;
    Ok(Created(detail(&service, offer.id).await?))
}

/// Get one offer
///
/// GET /offers/:offerId
pub async fn show(
    State(state): State<AppState>,
    offer: Existing<OfferIdParam>,
) -> ApiResult<Json<OfferResponse>> {
    let service = OfferService::new(state.service_context());
    Ok(Json(detail(&service, offer.id).await?))
}

/// Edit an offer
///
/// PATCH /offers/:offerId
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    offer: Existing<OfferIdParam>,
    ValidatedJson(request): ValidatedJson<UpdateOfferRequest>,
) -> ApiResult<Json<OfferResponse>> {
    let service = OfferService::new(state.service_context());

    let current = service.find_by_id(offer.id).await.origin(ORIGIN)?.ok_or_else(|| {
        ApiError::not_found(format!("Offer with id {} not found.", offer.id)).with_origin(ORIGIN)
    })?;
    OfferService::ensure_author(&current, auth.user_id).origin(origin::CHECK_OWNER)?;

    service.update_by_id(offer.id, request).await.origin(ORIGIN)?;
    Ok(Json(detail(&service, offer.id).await?))
}

/// Delete an offer together with its comments and uploaded images
///
/// DELETE /offers/:offerId
pub async fn delete(
    State(state): State<AppState>,
    OwnedOffer { offer, .. }: OwnedOffer,
) -> ApiResult<NoContent> {
    let ctx = state.service_context();

    let comments = CommentService::new(ctx)
        .delete_by_offer_id(offer.id)
        .await
        .origin(ORIGIN)?;
    OfferService::new(ctx)
        .delete_by_id(offer.id)
        .await
        .origin(ORIGIN)?;

    info!(offer_id = %offer.id, comments, "Offer removed");
    state
        .uploads()
        .remove_replaced(std::iter::once(&offer.preview_image).chain(&offer.images))
        .await;
    Ok(NoContent)
}

/// Newest premium offers in a city
///
/// GET /offers/premium/:city
pub async fn premium(
    State(state): State<AppState>,
    CityParam(city): CityParam,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<OfferPreviewResponse>>> {
    let offers = OfferService::new(state.service_context())
        .find_premium(city, limit)
        .await
        .origin(ORIGIN)?;
    Ok(Json(previews(&offers)))
}

/// Offers marked as favorite
///
/// GET /offers/favorite
pub async fn favorites(
    State(state): State<AppState>,
    _auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<OfferPreviewResponse>>> {
    let offers = OfferService::new(state.service_context())
        .find_favorite(limit)
        .await
        .origin(ORIGIN)?;
    Ok(Json(previews(&offers)))
}

/// Set or clear the favorite flag
///
/// PUT /offers/:offerId/favorite/:status
pub async fn set_favorite(
    State(state): State<AppState>,
    _auth: AuthUser,
    offer: Existing<OfferIdParam>,
    FavoriteStatus(status): FavoriteStatus,
) -> ApiResult<Json<OfferResponse>> {
    let service = OfferService::new(state.service_context());
    service.set_favorite(offer.id, status).await.origin(ORIGIN)?;
    Ok(Json(detail(&service, offer.id).await?))
}

/// Replace the preview image
///
/// POST /offers/:offerId/previewImage
pub async fn upload_preview_image(
    State(state): State<AppState>,
    OwnedOffer { offer, .. }: OwnedOffer,
    UploadedFile { file_name, .. }: UploadedFile<PreviewImageField>,
) -> ApiResult<Created<PreviewImageResponse>> {
    let result = OfferService::new(state.service_context())
        .set_preview_image(offer.id, file_name.clone())
        .await;

    match result {
        Ok(updated) => {
            state.uploads().remove_replaced([&offer.preview_image]).await;
            Ok(Created(PreviewImageResponse {
                preview_image: updated.preview_image,
            }))
        }
        Err(e) => {
            state.uploads().remove_all(&[file_name]).await;
            Err(ApiError::from(e).with_origin(ORIGIN))
        }
    }
}

/// Replace gallery images
///
/// POST /offers/:offerId/offerImages
pub async fn upload_images(
    State(state): State<AppState>,
    OwnedOffer { offer, .. }: OwnedOffer,
    UploadedFiles { file_names, .. }: UploadedFiles<OfferImagesField, { OFFER_IMAGE_COUNT }>,
) -> ApiResult<Created<OfferImagesResponse>> {
    let result = OfferService::new(state.service_context())
        .set_images(offer.id, file_names.clone())
        .await;

    match result {
        Ok(updated) => {
            let replaced = offer
                .images
                .iter()
                .filter(|name| !updated.images.contains(*name));
            state.uploads().remove_replaced(replaced).await;
            Ok(Created(OfferImagesResponse {
                images: updated.images,
            }))
        }
        Err(e) => {
            state.uploads().remove_all(&file_names).await;
            Err(ApiError::from(e).with_origin(ORIGIN))
        }
    }
}
