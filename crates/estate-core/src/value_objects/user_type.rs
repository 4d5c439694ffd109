//! User account type

use serde::{Deserialize, Serialize};
use std::fmt;

use super::offer_attributes::UnknownAttribute;

/// Account type; `pro` accounts are shown with a badge on their offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Regular,
    Pro,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            "pro" => Ok(Self::Pro),
            other => Err(UnknownAttribute(other.to_string())),
        }
    }
}
