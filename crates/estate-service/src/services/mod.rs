//! Business logic services
//!
//! Services are stateless views over a borrowed [`ServiceContext`]; create one
//! per request with `XService::new(&ctx)`.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod exists;
pub mod limits;
pub mod offer;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use exists::DocumentExists;
pub use offer::OfferService;
pub use user::UserService;
