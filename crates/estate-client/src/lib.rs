//! # estate-client
//!
//! Typed async client for the estate REST API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), estate_client::ClientError> {
//! use estate_client::{Credentials, EstateClient};
//!
//! let client = EstateClient::new("http://127.0.0.1:4000")?;
//! client
//!     .login(&Credentials {
//!         email: "keks@example.com".to_string(),
//!         password: "secret1".to_string(),
//!     })
//!     .await?;
//! let favorites = client.fetch_favorite_offers().await?;
//! # let _ = favorites;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::EstateClient;
pub use error::{ClientError, ClientResult};
pub use types::{
    AuthInfo, CommentInfo, Credentials, ImageFile, NewComment, NewOffer, NewUser, OfferDetails,
    OfferSummary, OfferUpdate, UserInfo,
};
