//! # estate-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    average_rating, Comment, Offer, OfferDraft, OfferPatch, User, OFFER_IMAGE_COUNT,
};
pub use error::DomainError;
pub use traits::{CommentRepository, OfferRepository, RepoResult, UserRepository};
pub use value_objects::{
    City, Goods, HousingType, Location, ObjectId, ObjectIdGenerator, ObjectIdParseError,
    UnknownAttribute, UnknownCity, UserType,
};
