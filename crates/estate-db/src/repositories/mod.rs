//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in estate-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod offer;
mod user;

pub use comment::PgCommentRepository;
pub use offer::PgOfferRepository;
pub use user::PgUserRepository;
