//! PostgreSQL implementation of OfferRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use estate_core::traits::{OfferRepository, RepoResult};
use estate_core::{City, ObjectId, Offer};

use crate::mappers::{OfferInsert, OfferUpdate};
use crate::models::OfferModel;

use super::error::{map_db_error, offer_not_found};

const OFFER_COLUMNS: &str = r"
    id, title, description, city, preview_image, images, is_premium, is_favorite,
    rating, housing_type, rooms, guests, price, goods, author_id, comment_count,
    latitude, longitude, created_at, updated_at
";

/// PostgreSQL implementation of OfferRepository
#[derive(Clone)]
pub struct PgOfferRepository {
    pool: PgPool,
}

impl PgOfferRepository {
    /// Create a new PgOfferRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_offers(models: Vec<OfferModel>) -> RepoResult<Vec<Offer>> {
    models.into_iter().map(Offer::try_from).collect()
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    #[instrument(skip(self))]
    async fn find(&self, limit: i64) -> RepoResult<Vec<Offer>> {
        let models = sqlx::query_as::<_, OfferModel>(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_offers(models)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> RepoResult<Option<Offer>> {
        let result = sqlx::query_as::<_, OfferModel>(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1"
        ))
        .bind(id.to_hex())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Offer::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_premium(&self, city: City, limit: i64) -> RepoResult<Vec<Offer>> {
        let models = sqlx::query_as::<_, OfferModel>(&format!(
            r"
            SELECT {OFFER_COLUMNS} FROM offers
            WHERE city = $1 AND is_premium
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "
        ))
        .bind(city.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_offers(models)
    }

    #[instrument(skip(self))]
    async fn find_favorite(&self, limit: i64) -> RepoResult<Vec<Offer>> {
        let models = sqlx::query_as::<_, OfferModel>(&format!(
            r"
            SELECT {OFFER_COLUMNS} FROM offers
            WHERE is_favorite
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_offers(models)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: ObjectId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM offers WHERE id = $1)")
            .bind(id.to_hex())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, offer), fields(offer_id = %offer.id))]
    async fn create(&self, offer: &Offer) -> RepoResult<()> {
        let row = OfferInsert::new(offer);

        sqlx::query(
            r"
            INSERT INTO offers (
                id, title, description, city, preview_image, images, is_premium, is_favorite,
                rating, housing_type, rooms, guests, price, goods, author_id, comment_count,
                latitude, longitude, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            ",
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.description)
        .bind(row.city)
        .bind(row.preview_image)
        .bind(row.images)
        .bind(row.is_premium)
        .bind(row.is_favorite)
        .bind(row.rating)
        .bind(row.housing_type)
        .bind(row.rooms)
        .bind(row.guests)
        .bind(row.price)
        .bind(row.goods)
        .bind(row.author_id)
        .bind(row.comment_count)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(offer.created_at)
        .bind(offer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, offer), fields(offer_id = %offer.id))]
    async fn update(&self, offer: &Offer) -> RepoResult<()> {
        let row = OfferUpdate::new(offer);

        let result = sqlx::query(
            r"
            UPDATE offers
            SET title = $2, description = $3, city = $4, preview_image = $5, images = $6,
                is_premium = $7, housing_type = $8, rooms = $9, guests = $10, price = $11,
                goods = $12, latitude = $13, longitude = $14, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.description)
        .bind(row.city)
        .bind(row.preview_image)
        .bind(row.images)
        .bind(row.is_premium)
        .bind(row.housing_type)
        .bind(row.rooms)
        .bind(row.guests)
        .bind(row.price)
        .bind(row.goods)
        .bind(row.latitude)
        .bind(row.longitude)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(offer_not_found(offer.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_favorite(&self, id: ObjectId, is_favorite: bool) -> RepoResult<()> {
        let result = sqlx::query("UPDATE offers SET is_favorite = $2 WHERE id = $1")
            .bind(id.to_hex())
            .bind(is_favorite)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(offer_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn refresh_comment_stats(&self, id: ObjectId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE offers o
            SET comment_count = s.count,
                rating = s.rating
            FROM (
                SELECT COUNT(*)::INT AS count,
                       COALESCE(ROUND(AVG(rating)::NUMERIC, 1), 0)::FLOAT8 AS rating
                FROM comments
                WHERE offer_id = $1
            ) s
            WHERE o.id = $1
            ",
        )
        .bind(id.to_hex())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(offer_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> RepoResult<bool> {
        // Comments go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id.to_hex())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
