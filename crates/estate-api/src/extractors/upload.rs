//! Multipart upload extractors
//!
//! Must be the last handler argument: the body is consumed here, after
//! every parts-based step has passed.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Multipart, Request},
};

use crate::response::{origin, ApiError, ApiResult};
use crate::state::AppState;
use crate::storage::{multipart_error, UploadGuard, UploadStore};

/// A multipart form field that carries image files
pub trait UploadField: Send + Sync + 'static {
    /// Field name as sent by the client, e.g. `previewImage`
    const NAME: &'static str;
}

/// `previewImage`
#[derive(Debug, Clone, Copy)]
pub struct PreviewImageField;

impl UploadField for PreviewImageField {
    const NAME: &'static str = "previewImage";
}

/// `offerImages`
#[derive(Debug, Clone, Copy)]
pub struct OfferImagesField;

impl UploadField for OfferImagesField {
    const NAME: &'static str = "offerImages";
}

/// `avatar`
#[derive(Debug, Clone, Copy)]
pub struct AvatarField;

impl UploadField for AvatarField {
    const NAME: &'static str = "avatar";
}

/// Up to `MAX` image files of field `F` stored in the upload directory
///
/// Non-file form fields are ignored; a file under any other field name is
/// rejected. If any file is rejected, or the request is dropped before the
/// body has been read, the files already stored for it are removed again.
#[derive(Debug, Clone)]
pub struct UploadedFiles<F, const MAX: usize> {
    pub file_names: Vec<String>,
    _field: PhantomData<F>,
}

async fn store_files(
    multipart: &mut Multipart,
    store: &UploadStore,
    field_name: &str,
    max: usize,
    saved: &mut UploadGuard,
) -> ApiResult<()> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.file_name().is_none() {
            continue;
        }
        let name = field.name().unwrap_or_default();
        if name != field_name {
            return Err(ApiError::invalid_upload(format!(
                "Unexpected file field '{name}', expected '{field_name}'"
            )));
        }
        if saved.len() == max {
            return Err(ApiError::invalid_upload(format!(
                "At most {max} files can be uploaded"
            )));
        }
        saved.push(store.save_field(field).await?);
    }

    if saved.is_empty() {
        return Err(ApiError::invalid_upload(format!(
            "No file was uploaded in field '{field_name}'"
        )));
    }
    Ok(())
}

#[async_trait]
impl<S, F, const MAX: usize> FromRequest<S> for UploadedFiles<F, MAX>
where
    S: Send + Sync,
    F: UploadField,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            ApiError::invalid_upload(e.body_text()).with_origin(origin::UPLOAD_FILE)
        })?;

        let app_state = AppState::from_ref(state);
        let store = app_state.uploads();
        let mut saved = store.guard();

        store_files(&mut multipart, store, F::NAME, MAX, &mut saved)
            .await
            .map_err(|e| e.with_origin(origin::UPLOAD_FILE))?;

        let file_names = saved.commit();
        tracing::info!(field = F::NAME, count = file_names.len(), "Files uploaded");
        Ok(Self {
            file_names,
            _field: PhantomData,
        })
    }
}

/// A single stored image file of field `F`
#[derive(Debug, Clone)]
pub struct UploadedFile<F> {
    pub file_name: String,
    _field: PhantomData<F>,
}

#[async_trait]
impl<S, F> FromRequest<S> for UploadedFile<F>
where
    S: Send + Sync,
    F: UploadField,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let UploadedFiles { mut file_names, .. } =
            UploadedFiles::<F, 1>::from_request(req, state).await?;

        let file_name = file_names.pop().ok_or_else(|| {
            ApiError::invalid_upload("No file was uploaded").with_origin(origin::UPLOAD_FILE)
        })?;

        Ok(Self {
            file_name,
            _field: PhantomData,
        })
    }
}
