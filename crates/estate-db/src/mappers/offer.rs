//! Offer entity <-> model mapper

use estate_core::{Goods, Location, Offer};

use crate::models::OfferModel;

use super::{parse_column, parse_id};

/// Convert OfferModel to Offer entity
impl TryFrom<OfferModel> for Offer {
    type Error = estate_core::DomainError;

    fn try_from(model: OfferModel) -> Result<Self, Self::Error> {
        let goods = model
            .goods
            .iter()
            .map(|g| parse_column::<Goods>("offers.goods", g))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Offer {
            id: parse_id("offers.id", &model.id)?,
            title: model.title,
            description: model.description,
            city: parse_column("offers.city", &model.city)?,
            preview_image: model.preview_image,
            images: model.images,
            is_premium: model.is_premium,
            is_favorite: model.is_favorite,
            rating: model.rating,
            housing_type: parse_column("offers.housing_type", &model.housing_type)?,
            rooms: model.rooms,
            guests: model.guests,
            price: model.price,
            goods,
            author_id: parse_id("offers.author_id", &model.author_id)?,
            comment_count: model.comment_count,
            location: Location::new(model.latitude, model.longitude),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Offer entity values for database insertion
pub struct OfferInsert<'a> {
    pub id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub city: &'static str,
    pub preview_image: &'a str,
    pub images: &'a [String],
    pub is_premium: bool,
    pub is_favorite: bool,
    pub rating: f64,
    pub housing_type: &'static str,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<&'static str>,
    pub author_id: String,
    pub comment_count: i32,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> OfferInsert<'a> {
    pub fn new(offer: &'a Offer) -> Self {
        Self {
            id: offer.id.to_hex(),
            title: &offer.title,
            description: &offer.description,
            city: offer.city.as_str(),
            preview_image: &offer.preview_image,
            images: &offer.images,
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            rating: offer.rating,
            housing_type: offer.housing_type.as_str(),
            rooms: offer.rooms,
            guests: offer.guests,
            price: offer.price,
            goods: offer.goods.iter().map(Goods::as_str).collect(),
            author_id: offer.author_id.to_hex(),
            comment_count: offer.comment_count,
            latitude: offer.location.latitude,
            longitude: offer.location.longitude,
        }
    }
}

/// Offer entity values for database update (author-editable fields only)
pub struct OfferUpdate<'a> {
    pub id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub city: &'static str,
    pub preview_image: &'a str,
    pub images: &'a [String],
    pub is_premium: bool,
    pub housing_type: &'static str,
    pub rooms: i32,
    pub guests: i32,
    pub price: i32,
    pub goods: Vec<&'static str>,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> OfferUpdate<'a> {
    pub fn new(offer: &'a Offer) -> Self {
        Self {
            id: offer.id.to_hex(),
            title: &offer.title,
            description: &offer.description,
            city: offer.city.as_str(),
            preview_image: &offer.preview_image,
            images: &offer.images,
            is_premium: offer.is_premium,
            housing_type: offer.housing_type.as_str(),
            rooms: offer.rooms,
            guests: offer.guests,
            price: offer.price,
            goods: offer.goods.iter().map(Goods::as_str).collect(),
            latitude: offer.location.latitude,
            longitude: offer.location.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_core::{City, HousingType};

    fn model() -> OfferModel {
        OfferModel {
            id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            title: "Canal view loft".to_string(),
            description: "Bright loft right on the canal, close to everything".to_string(),
            city: "Amsterdam".to_string(),
            preview_image: "preview.jpg".to_string(),
            images: vec!["1.jpg".to_string(); 6],
            is_premium: true,
            is_favorite: false,
            rating: 4.5,
            housing_type: "apartment".to_string(),
            rooms: 2,
            guests: 3,
            price: 250,
            goods: vec!["Breakfast".to_string(), "Air conditioning".to_string()],
            author_id: "65a1f0c2e4b0a1b2c3d4e5f7".to_string(),
            comment_count: 2,
            latitude: 52.37,
            longitude: 4.89,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let offer = Offer::try_from(model()).unwrap();

        assert_eq!(offer.city, City::Amsterdam);
        assert_eq!(offer.housing_type, HousingType::Apartment);
        assert_eq!(offer.goods, vec![Goods::Breakfast, Goods::AirConditioning]);
        assert_eq!(offer.author_id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f7");
    }

    #[test]
    fn test_corrupt_city_is_database_error() {
        let mut model = model();
        model.city = "Atlantis".to_string();

        let err = Offer::try_from(model).unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_insert_round_trips_strings() {
        let offer = Offer::try_from(model()).unwrap();
        let insert = OfferInsert::new(&offer);

        assert_eq!(insert.id, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(insert.city, "Amsterdam");
        assert_eq!(insert.goods, vec!["Breakfast", "Air conditioning"]);
    }
}
