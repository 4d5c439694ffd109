//! City and location value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cities offers can be listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    /// All supported cities
    pub const ALL: [City; 6] = [
        City::Paris,
        City::Cologne,
        City::Brussels,
        City::Amsterdam,
        City::Hamburg,
        City::Dusseldorf,
    ];

    /// Canonical name, as stored and sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paris => "Paris",
            Self::Cologne => "Cologne",
            Self::Brussels => "Brussels",
            Self::Amsterdam => "Amsterdam",
            Self::Hamburg => "Hamburg",
            Self::Dusseldorf => "Dusseldorf",
        }
    }

    /// City center, used as the default map position
    pub fn center(&self) -> Location {
        match self {
            Self::Paris => Location::new(48.85661, 2.351499),
            Self::Cologne => Location::new(50.938361, 6.959974),
            Self::Brussels => Location::new(50.846557, 4.351697),
            Self::Amsterdam => Location::new(52.370216, 4.895168),
            Self::Hamburg => Location::new(53.550341, 10.000654),
            Self::Dusseldorf => Location::new(51.225402, 6.776314),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown city name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown city: {0}")]
pub struct UnknownCity(pub String);

impl std::str::FromStr for City {
    type Err = UnknownCity;

    /// Matching is case-insensitive so `/offers/premium/paris` works
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCity(s.to_string()))
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are within their valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
