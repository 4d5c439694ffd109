//! Database models
//!
//! Row shapes for each table, decoded with SQLx `FromRow`.

mod comment;
mod offer;
mod user;

pub use comment::CommentModel;
pub use offer::OfferModel;
pub use user::UserModel;
