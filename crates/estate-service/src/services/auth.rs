//! Authentication service
//!
//! Password login and token-based session checks.

use estate_common::auth::verify_password;
use estate_common::AppError;
use estate_core::{ObjectId, User};
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, LoginResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let jwt = self.ctx.jwt_service();
        let token = jwt.issue(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse::new(token, jwt.expiry(), UserResponse::from(&user)))
    }

    /// Resolve the account behind an authenticated request
    #[instrument(skip(self))]
    pub async fn check(&self, user_id: ObjectId) -> ServiceResult<User> {
        self.ctx.user_repo().find_by_id(user_id).await?.ok_or_else(|| {
            warn!(user_id = %user_id, "Token refers to a missing user");
            ServiceError::App(AppError::InvalidToken)
        })
    }
}
