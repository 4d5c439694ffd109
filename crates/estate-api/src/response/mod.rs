//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use estate_common::{AppError, ErrorResponse};
use estate_core::DomainError;
use estate_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// Names of the pipeline steps and controllers that raise errors
pub mod origin {
    pub const PRIVATE_ROUTE: &str = "PrivateRoute";
    pub const VALIDATE_OBJECT_ID: &str = "ValidateObjectId";
    pub const DOCUMENT_EXISTS: &str = "DocumentExists";
    pub const CHECK_OWNER: &str = "CheckOwner";
    pub const VALIDATE_DTO: &str = "ValidateDto";
    pub const UPLOAD_FILE: &str = "UploadFile";
    pub const OFFER_CONTROLLER: &str = "OfferController";
    pub const COMMENT_CONTROLLER: &str = "CommentController";
    pub const USER_CONTROLLER: &str = "UserController";
}

/// What went wrong
#[derive(Debug, Error)]
pub enum ApiErrorKind {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidId(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Unauthorized")]
    MissingAuth,
}

/// API error type for consistent error responses
///
/// Carries the component that raised it so clients can tell a rejected
/// pipeline step apart from a failing controller.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ApiError {
    kind: ApiErrorKind,
    origin: Option<&'static str>,
}

impl ApiError {
    fn new(kind: ApiErrorKind) -> Self {
        Self { kind, origin: None }
    }

    /// Tag the error with the component that raised it
    ///
    /// An origin set closer to the failure is kept.
    #[must_use]
    pub fn with_origin(mut self, origin: &'static str) -> Self {
        self.origin.get_or_insert(origin);
        self
    }

    /// The failure itself
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// Component that raised the error
    pub fn origin(&self) -> Option<&'static str> {
        self.origin
    }

    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::App(e) => from_u16(e.status_code()),
            ApiErrorKind::Service(e) => from_u16(e.status_code()),
            ApiErrorKind::Domain(e) => from_u16(e.status_code()),
            ApiErrorKind::Validation(_)
            | ApiErrorKind::InvalidId(_)
            | ApiErrorKind::InvalidPath(_)
            | ApiErrorKind::InvalidQuery(_)
            | ApiErrorKind::InvalidBody(_)
            | ApiErrorKind::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ApiErrorKind::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiErrorKind::MissingAuth => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match &self.kind {
            ApiErrorKind::App(e) => e.error_code(),
            ApiErrorKind::Service(e) => e.error_code(),
            ApiErrorKind::Domain(e) => e.code(),
            ApiErrorKind::Validation(_) => "VALIDATION_ERROR",
            ApiErrorKind::InvalidId(_) => "INVALID_ID",
            ApiErrorKind::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            ApiErrorKind::InvalidQuery(_) => "INVALID_QUERY_PARAMETER",
            ApiErrorKind::InvalidBody(_) => "INVALID_BODY",
            ApiErrorKind::InvalidUpload(_) => "INVALID_UPLOAD",
            ApiErrorKind::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiErrorKind::NotFound(_) => "NOT_FOUND",
            ApiErrorKind::Forbidden(_) => "FORBIDDEN",
            ApiErrorKind::MissingAuth => "UNAUTHORIZED",
        }
    }

    /// Malformed document id
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidId(msg.into()))
    }

    /// Unparsable path parameter
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidPath(msg.into()))
    }

    /// Create an invalid query error
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidQuery(msg.into()))
    }

    /// Body is not the expected JSON
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidBody(msg.into()))
    }

    /// Rejected multipart upload
    pub fn invalid_upload(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidUpload(msg.into()))
    }

    /// Upload over the size limit
    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::PayloadTooLarge(msg.into()))
    }

    /// Missing document
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound(msg.into()))
    }

    /// Caller may not touch the document
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Forbidden(msg.into()))
    }

    /// No bearer token on a private route
    pub fn missing_auth() -> Self {
        Self::new(ApiErrorKind::MissingAuth)
    }
}

fn from_u16(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::new(err.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::new(err.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::new(err.into())
    }
}

/// Attach an origin tag while converting into [`ApiError`]
pub trait WithOrigin<T> {
    fn origin(self, origin: &'static str) -> ApiResult<T>;
}

impl<T, E> WithOrigin<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn origin(self, origin: &'static str) -> ApiResult<T> {
        self.map_err(|e| e.into().with_origin(origin))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self.kind, origin = ?self.origin, "Server error occurred");
        }

        // Build details for validation errors
        let details = match &self.kind {
            ApiErrorKind::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorResponse {
                code: self.error_code().to_string(),
                message: self.to_string(),
                origin: self.origin.map(str::to_string),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
