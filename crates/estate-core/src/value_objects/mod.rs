//! Value objects - immutable types that represent domain concepts

mod city;
mod object_id;
mod offer_attributes;
mod user_type;

pub use city::{City, Location, UnknownCity};
pub use object_id::{ObjectId, ObjectIdGenerator, ObjectIdParseError};
pub use offer_attributes::{Goods, HousingType, UnknownAttribute};
pub use user_type::UserType;
