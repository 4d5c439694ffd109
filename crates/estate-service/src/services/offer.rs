//! Offer service
//!
//! Listing, creation, editing, and removal of offers, plus the premium,
//! favorite, and comment-counter operations.

use async_trait::async_trait;
use tracing::{info, instrument};

use estate_core::{City, ObjectId, Offer, OfferPatch, OFFER_IMAGE_COUNT};

use crate::dto::{CreateOfferRequest, OfferWithAuthor, UpdateOfferRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::exists::DocumentExists;
use super::limits::{
    resolve_limit, DEFAULT_FAVORITE_LIMIT, DEFAULT_OFFER_LIMIT, DEFAULT_PREMIUM_LIMIT,
};

/// Offer service
pub struct OfferService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OfferService<'a> {
    /// Create a new OfferService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest offers first
    #[instrument(skip(self))]
    pub async fn find(&self, limit: Option<i64>) -> ServiceResult<Vec<Offer>> {
        let limit = resolve_limit(limit, DEFAULT_OFFER_LIMIT);
        Ok(self.ctx.offer_repo().find(limit).await?)
    }

    /// Find an offer by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ObjectId) -> ServiceResult<Option<Offer>> {
        Ok(self.ctx.offer_repo().find_by_id(id).await?)
    }

    /// Find an offer by id together with its author
    #[instrument(skip(self))]
    pub async fn find_with_author(&self, id: ObjectId) -> ServiceResult<Option<OfferWithAuthor>> {
        let Some(offer) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = self.ctx.user_repo().find_by_id(offer.author_id).await?;

        Ok(Some(OfferWithAuthor { offer, author }))
    }

    /// List a new offer on behalf of `author_id`
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        author_id: ObjectId,
        request: CreateOfferRequest,
    ) -> ServiceResult<Offer> {
        let offer = Offer::new(self.ctx.generate_id(), author_id, request.into());
        self.ctx.offer_repo().create(&offer).await?;

        info!(offer_id = %offer.id, author_id = %author_id, "Offer created");

        Ok(offer)
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update_by_id(
        &self,
        id: ObjectId,
        request: UpdateOfferRequest,
    ) -> ServiceResult<Offer> {
        self.apply_patch(id, request.into()).await
    }

    /// Delete an offer, returning it when it existed
    ///
    /// Comments are not touched here; callers pair this with
    /// `CommentService::delete_by_offer_id`.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: ObjectId) -> ServiceResult<Option<Offer>> {
        let Some(offer) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if !self.ctx.offer_repo().delete(id).await? {
            return Ok(None);
        }

        info!(offer_id = %id, "Offer deleted");
        Ok(Some(offer))
    }

    /// Check whether an offer exists
    #[instrument(skip(self))]
    pub async fn exists(&self, id: ObjectId) -> ServiceResult<bool> {
        Ok(self.ctx.offer_repo().exists(id).await?)
    }

    /// Newest premium offers in a city
    #[instrument(skip(self))]
    pub async fn find_premium(&self, city: City, limit: Option<i64>) -> ServiceResult<Vec<Offer>> {
        let limit = resolve_limit(limit, DEFAULT_PREMIUM_LIMIT);
        Ok(self.ctx.offer_repo().find_premium(city, limit).await?)
    }

    /// Newest favorite offers
    #[instrument(skip(self))]
    pub async fn find_favorite(&self, limit: Option<i64>) -> ServiceResult<Vec<Offer>> {
        let limit = resolve_limit(limit, DEFAULT_FAVORITE_LIMIT);
        Ok(self.ctx.offer_repo().find_favorite(limit).await?)
    }

    /// Set or clear the favorite flag
    #[instrument(skip(self))]
    pub async fn set_favorite(&self, id: ObjectId, is_favorite: bool) -> ServiceResult<Offer> {
        self.ctx.offer_repo().set_favorite(id, is_favorite).await?;
        self.require(id).await
    }

    /// Recompute comment count and rating after a comment was added
    #[instrument(skip(self))]
    pub async fn register_comment(&self, id: ObjectId) -> ServiceResult<Offer> {
        self.ctx.offer_repo().refresh_comment_stats(id).await?;
        self.require(id).await
    }

    /// Replace the preview image
    #[instrument(skip(self))]
    pub async fn set_preview_image(&self, id: ObjectId, file_name: String) -> ServiceResult<Offer> {
        let patch = OfferPatch {
            preview_image: Some(file_name),
            ..OfferPatch::default()
        };
        self.apply_patch(id, patch).await
    }

    /// Replace the leading gallery images with freshly uploaded ones
    ///
    /// The gallery always keeps `OFFER_IMAGE_COUNT` entries; images beyond
    /// the uploaded ones stay in place.
    #[instrument(skip(self))]
    pub async fn set_images(&self, id: ObjectId, file_names: Vec<String>) -> ServiceResult<Offer> {
        if file_names.is_empty() || file_names.len() > OFFER_IMAGE_COUNT {
            return Err(ServiceError::validation(format!(
                "Between 1 and {OFFER_IMAGE_COUNT} images can be uploaded"
            )));
        }

        let offer = self.require(id).await?;
        let mut images = offer.images;
        images.resize(OFFER_IMAGE_COUNT, String::new());
        for (slot, name) in images.iter_mut().zip(file_names) {
            *slot = name;
        }

        let patch = OfferPatch {
            images: Some(images),
            ..OfferPatch::default()
        };
        self.apply_patch(id, patch).await
    }

    /// Reject mutations by anyone but the author
    pub fn ensure_author(offer: &Offer, user_id: ObjectId) -> ServiceResult<()> {
        if offer.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(format!(
                "Offer {} was created by another user",
                offer.id
            )))
        }
    }

    async fn require(&self, id: ObjectId) -> ServiceResult<Offer> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Offer", id.to_hex()))
    }

    async fn apply_patch(&self, id: ObjectId, patch: OfferPatch) -> ServiceResult<Offer> {
        let mut offer = self.require(id).await?;
        if patch.is_empty() {
            return Ok(offer);
        }

        offer.apply(patch);
        self.ctx.offer_repo().update(&offer).await?;

        info!(offer_id = %id, "Offer updated");
        Ok(offer)
    }
}

#[async_trait]
impl DocumentExists for OfferService<'_> {
    fn document_kind(&self) -> &'static str {
        "Offer"
    }

    async fn exists(&self, id: ObjectId) -> ServiceResult<bool> {
        OfferService::exists(self, id).await
    }
}
