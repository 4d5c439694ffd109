//! Domain entities - core business objects

mod comment;
mod offer;
mod user;

pub use comment::Comment;
pub use offer::{average_rating, Offer, OfferDraft, OfferPatch, OFFER_IMAGE_COUNT};
pub use user::User;
