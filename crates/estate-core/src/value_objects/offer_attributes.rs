//! Housing type and amenities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of accommodation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HousingType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HousingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Room => "room",
            Self::Hotel => "hotel",
        }
    }
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HousingType {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(Self::Apartment),
            "house" => Ok(Self::House),
            "room" => Ok(Self::Room),
            "hotel" => Ok(Self::Hotel),
            other => Err(UnknownAttribute(other.to_string())),
        }
    }
}

/// Amenities an offer may list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goods {
    Breakfast,
    #[serde(rename = "Air conditioning")]
    AirConditioning,
    #[serde(rename = "Laptop friendly workspace")]
    LaptopFriendlyWorkspace,
    #[serde(rename = "Baby seat")]
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

impl Goods {
    pub const ALL: [Goods; 7] = [
        Goods::Breakfast,
        Goods::AirConditioning,
        Goods::LaptopFriendlyWorkspace,
        Goods::BabySeat,
        Goods::Washer,
        Goods::Towels,
        Goods::Fridge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::AirConditioning => "Air conditioning",
            Self::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Self::BabySeat => "Baby seat",
            Self::Washer => "Washer",
            Self::Towels => "Towels",
            Self::Fridge => "Fridge",
        }
    }
}

impl fmt::Display for Goods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Goods {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goods::ALL
            .into_iter()
            .find(|goods| goods.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Error for stored values that no longer map to a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute value: {0}")]
pub struct UnknownAttribute(pub String);
