//! User handlers
//!
//! Registration, login, session check, and avatar upload.

use axum::{extract::State, Json};
use estate_core::ObjectId;
use estate_service::dto::{
    AvatarResponse, CreateUserRequest, LoginRequest, LoginResponse, UserResponse,
};
use estate_service::{AuthService, ServiceResult, UserService};

use crate::extractors::{AuthUser, AvatarField, OwnAccount, UploadedFile, ValidatedJson};
use crate::response::{origin, ApiError, ApiResult, Created, WithOrigin};
use crate::state::AppState;

const ORIGIN: &str = origin::USER_CONTROLLER;

/// Register a new account
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<UserResponse>> {
    let user = UserService::new(state.service_context())
        .create(request)
        .await
        .origin(ORIGIN)?;
    Ok(Created(UserResponse::from(user)))
}

/// Exchange credentials for a token
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await
        .origin(ORIGIN)?;
    Ok(Json(response))
}

/// Current account behind the token
///
/// GET /login
pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = AuthService::new(state.service_context())
        .check(auth.user_id)
        .await
        .origin(origin::PRIVATE_ROUTE)?;
    Ok(Json(UserResponse::from(user)))
}

/// Store the new avatar and return the one it replaced
async fn replace_avatar(
    service: &UserService<'_>,
    id: ObjectId,
    file_name: &str,
) -> ServiceResult<Option<String>> {
    let previous = service.find_by_id(id).await?.and_then(|user| user.avatar);
    service.update_avatar(id, file_name).await?;
    Ok(previous)
}

/// Replace the avatar of the caller's own account
///
/// POST /users/:userId/avatar
pub async fn upload_avatar(
    State(state): State<AppState>,
    OwnAccount { user }: OwnAccount,
    UploadedFile { file_name, .. }: UploadedFile<AvatarField>,
) -> ApiResult<Created<AvatarResponse>> {
    let service = UserService::new(state.service_context());
    let result = replace_avatar(&service, user.user_id, &file_name).await;

    match result {
        Ok(previous) => {
            state.uploads().remove_replaced(&previous).await;
            Ok(Created(AvatarResponse { avatar: file_name }))
        }
        Err(e) => {
            state.uploads().remove_all(&[file_name]).await;
            Err(ApiError::from(e).with_origin(ORIGIN))
        }
    }
}
