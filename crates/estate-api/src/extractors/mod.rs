//! Axum extractors for request handling
//!
//! Each extractor is one pipeline step. Handlers list them in the order the
//! checks must run; parts-based steps always run before the body is read.

mod auth;
mod document;
mod limit;
mod path;
mod upload;
mod validated;

pub use auth::AuthUser;
pub use document::{DocumentParam, Existing, OwnAccount, OwnedOffer};
pub use limit::Limit;
pub use path::{CityParam, FavoriteStatus, IdParam, OfferIdParam, UserIdParam, ValidObjectId};
pub use upload::{
    AvatarField, OfferImagesField, PreviewImageField, UploadField, UploadedFile, UploadedFiles,
};
pub use validated::ValidatedJson;
