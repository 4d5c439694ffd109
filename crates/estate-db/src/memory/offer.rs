//! In-memory implementation of OfferRepository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use estate_core::traits::{OfferRepository, RepoResult};
use estate_core::{City, DomainError, ObjectId, Offer};

use super::{sort_newest_first, take_count, MemoryStore};

/// In-memory implementation of OfferRepository
#[derive(Clone)]
pub struct MemoryOfferRepository {
    store: Arc<MemoryStore>,
}

impl MemoryOfferRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn select<F>(&self, limit: i64, filter: F) -> Vec<Offer>
    where
        F: Fn(&Offer) -> bool,
    {
        let mut offers: Vec<Offer> = self
            .store
            .offers
            .iter()
            .filter(|entry| filter(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        sort_newest_first(&mut offers);
        offers.truncate(take_count(limit));
        offers
    }
}

#[async_trait]
impl OfferRepository for MemoryOfferRepository {
    #[instrument(skip(self))]
    async fn find(&self, limit: i64) -> RepoResult<Vec<Offer>> {
        Ok(self.select(limit, |_| true))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Offer>> {
        Ok(self.store.offers.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self))]
    async fn find_premium(&self, city: City, limit: i64) -> RepoResult<Vec<Offer>> {
        Ok(self.select(limit, |offer| offer.is_premium && offer.city == city))
    }

    #[instrument(skip(self))]
    async fn find_favorite(&self, limit: i64) -> RepoResult<Vec<Offer>> {
        Ok(self.select(limit, |offer| offer.is_favorite))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        Ok(self.store.offers.contains_key(&id))
    }

    #[instrument(skip(self, offer), fields(offer_id = %offer.id))]
    async fn create(&self, offer: &Offer) -> RepoResult<()> {
        if !self.store.users.contains_key(&offer.author_id) {
            return Err(DomainError::UserNotFound(offer.author_id));
        }
        self.store.offers.insert(offer.id, offer.clone());
        Ok(())
    }

    #[instrument(skip(self, offer), fields(offer_id = %offer.id))]
    async fn update(&self, offer: &Offer) -> RepoResult<()> {
        let mut stored = self
            .store
            .offers
            .get_mut(&offer.id)
            .ok_or(DomainError::OfferNotFound(offer.id))?;

        // Counters and the favorite flag are owned by their own operations
        let Offer {
            is_favorite,
            rating,
            comment_count,
            author_id,
            created_at,
            ..
        } = *stored.value();
        *stored = Offer {
            is_favorite,
            rating,
            comment_count,
            author_id,
            created_at,
            updated_at: chrono::Utc::now(),
            ..offer.clone()
        };
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_favorite(&self, id: ObjectId, is_favorite: bool) -> RepoResult<()> {
        let mut stored = self
            .store
            .offers
            .get_mut(&id)
            .ok_or(DomainError::OfferNotFound(id))?;
        stored.is_favorite = is_favorite;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn refresh_comment_stats(&self, id: ObjectId) -> RepoResult<()> {
        let ratings: Vec<u8> = self
            .store
            .comments
            .read()
            .iter()
            .filter(|comment| comment.is_about(id))
            .map(|comment| comment.rating)
            .collect();

        let mut stored = self
            .store
            .offers
            .get_mut(&id)
            .ok_or(DomainError::OfferNotFound(id))?;
        stored.set_comment_stats(&ratings);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        let mut comments = self.store.comments.write();
        let removed = self.store.offers.remove(&id).is_some();
        if removed {
            comments.retain(|comment| !comment.is_about(id));
        }
        Ok(removed)
    }
}
