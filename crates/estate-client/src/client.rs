//! # Estate Client
//!
//! Async actions over the REST API. Each action issues one or more HTTP
//! calls and adapts the payload for the caller.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{
    multipart::{Form, Part},
    Client, Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use estate_core::City;

use crate::error::{ClientError, ClientResult};
use crate::types::{
    AuthInfo, AvatarBody, CommentInfo, CreateOfferBody, Credentials, ImageFile, NewComment,
    NewOffer, NewUser, OfferDetails, OfferImagesBody, OfferSummary, OfferUpdate,
    PreviewImageBody, RegisterBody, UserInfo,
};

/// Request timeout applied to every call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client bound to one API server
///
/// Holds the token of the logged in user; private actions send it as a
/// bearer token.
#[derive(Debug)]
pub struct EstateClient {
    base_url: String,
    http: Client,
    token: RwLock<Option<String>>,
}

impl EstateClient {
    /// Create a client for the server at `base_url`, e.g. `http://127.0.0.1:4000`
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_http_client(base_url, http))
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Use a token obtained elsewhere
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Public URL of a stored upload
    pub fn upload_url(&self, file_name: &str) -> String {
        format!("{}/upload/{file_name}", self.base_url)
    }

    // ========================================================================
    // Offers
    // ========================================================================

    /// `GET /offers`
    pub async fn fetch_offers(&self, limit: Option<i64>) -> ClientResult<Vec<OfferSummary>> {
        let mut request = self.request(Method::GET, "/offers");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        self.send_json(request).await
    }

    /// `GET /offers/:offerId`
    pub async fn fetch_offer(&self, offer_id: &str) -> ClientResult<OfferDetails> {
        self.send_json(self.request(Method::GET, &format!("/offers/{offer_id}")))
            .await
    }

    /// `GET /offers/premium/:city`
    pub async fn fetch_premium_offers(&self, city: City) -> ClientResult<Vec<OfferSummary>> {
        self.send_json(self.request(Method::GET, &format!("/offers/premium/{city}")))
            .await
    }

    /// `GET /offers/favorite`
    pub async fn fetch_favorite_offers(&self) -> ClientResult<Vec<OfferSummary>> {
        self.send_json(self.request(Method::GET, "/offers/favorite"))
            .await
    }

    /// Create an offer, then upload its images when files were given
    ///
    /// Returns the offer as stored after all uploads.
    #[tracing::instrument(skip(self, offer), fields(title = %offer.title))]
    pub async fn create_offer(&self, offer: NewOffer) -> ClientResult<OfferDetails> {
        let body = CreateOfferBody::from(&offer);
        let created: OfferDetails = self
            .send_json(self.request(Method::POST, "/offers").json(&body))
            .await?;
        info!(offer_id = %created.id, "Offer created");

        let has_uploads = offer.preview_upload.is_some() || !offer.image_uploads.is_empty();

        if let Some(preview) = offer.preview_upload {
            self.upload_preview_image(&created.id, preview).await?;
        }
        if !offer.image_uploads.is_empty() {
            self.upload_offer_images(&created.id, offer.image_uploads)
                .await?;
        }

        if has_uploads {
            self.fetch_offer(&created.id).await
        } else {
            Ok(created)
        }
    }

    /// `PATCH /offers/:offerId`
    pub async fn update_offer(
        &self,
        offer_id: &str,
        update: &OfferUpdate,
    ) -> ClientResult<OfferDetails> {
        self.send_json(
            self.request(Method::PATCH, &format!("/offers/{offer_id}"))
                .json(update),
        )
        .await
    }

    /// `DELETE /offers/:offerId`
    pub async fn delete_offer(&self, offer_id: &str) -> ClientResult<()> {
        self.send_empty(self.request(Method::DELETE, &format!("/offers/{offer_id}")))
            .await
    }

    /// `PUT /offers/:offerId/favorite/:status`
    pub async fn set_favorite(&self, offer_id: &str, favorite: bool) -> ClientResult<OfferDetails> {
        let status = u8::from(favorite);
        self.send_json(self.request(
            Method::PUT,
            &format!("/offers/{offer_id}/favorite/{status}"),
        ))
        .await
    }

    /// `POST /offers/:offerId/previewImage`, returning the stored file name
    pub async fn upload_preview_image(
        &self,
        offer_id: &str,
        image: ImageFile,
    ) -> ClientResult<String> {
        let form = Form::new().part("previewImage", image_part(image)?);
        let body: PreviewImageBody = self
            .send_json(
                self.request(Method::POST, &format!("/offers/{offer_id}/previewImage"))
                    .multipart(form),
            )
            .await?;
        Ok(body.preview_image)
    }

    /// `POST /offers/:offerId/offerImages`, returning the full gallery
    pub async fn upload_offer_images(
        &self,
        offer_id: &str,
        images: Vec<ImageFile>,
    ) -> ClientResult<Vec<String>> {
        let mut form = Form::new();
        for image in images {
            form = form.part("offerImages", image_part(image)?);
        }
        let body: OfferImagesBody = self
            .send_json(
                self.request(Method::POST, &format!("/offers/{offer_id}/offerImages"))
                    .multipart(form),
            )
            .await?;
        Ok(body.images)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// `GET /offers/:offerId/comments`
    pub async fn fetch_comments(&self, offer_id: &str) -> ClientResult<Vec<CommentInfo>> {
        self.send_json(self.request(Method::GET, &format!("/offers/{offer_id}/comments")))
            .await
    }

    /// `POST /offers/:offerId/comments`
    pub async fn post_comment(
        &self,
        offer_id: &str,
        comment: &NewComment,
    ) -> ClientResult<CommentInfo> {
        self.send_json(
            self.request(Method::POST, &format!("/offers/{offer_id}/comments"))
                .json(comment),
        )
        .await
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Create an account
    ///
    /// With an avatar, the new user is logged in and the avatar uploaded;
    /// the token stays stored afterwards.
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: NewUser) -> ClientResult<UserInfo> {
        let mut created: UserInfo = self
            .send_json(
                self.request(Method::POST, "/register")
                    .json(&RegisterBody::from(&user)),
            )
            .await?;
        info!(user_id = %created.id, "User registered");

        if let Some(avatar) = user.avatar {
            self.login(&Credentials {
                email: created.email.clone(),
                password: user.password,
            })
            .await?;
            created.avatar = Some(self.upload_avatar(&created.id, avatar).await?);
        }

        Ok(created)
    }

    /// `POST /login`; stores the issued token
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthInfo> {
        let auth: AuthInfo = self
            .send_json(self.request(Method::POST, "/login").json(credentials))
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        self.set_token(auth.token.clone());
        info!(user_id = %auth.user.id, "Logged in");
        Ok(auth)
    }

    /// `GET /login`: the user the stored token belongs to
    pub async fn check_auth(&self) -> ClientResult<UserInfo> {
        self.send_json(self.request(Method::GET, "/login")).await
    }

    /// Forget the stored token
    pub fn logout(&self) {
        if self.token.write().take().is_some() {
            debug!("Token dropped");
        }
    }

    /// `POST /users/:userId/avatar`, returning the stored file name
    pub async fn upload_avatar(&self, user_id: &str, image: ImageFile) -> ClientResult<String> {
        let form = Form::new().part("avatar", image_part(image)?);
        let body: AvatarBody = self
            .send_json(
                self.request(Method::POST, &format!("/users/{user_id}/avatar"))
                    .multipart(form),
            )
            .await?;
        Ok(body.avatar)
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match self.token.read().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await?;
        let err = ClientError::from_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %err, "Request rejected");
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> ClientResult<()> {
        self.send(request).await?;
        Ok(())
    }
}

fn image_part(image: ImageFile) -> ClientResult<Part> {
    Ok(Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?)
}
